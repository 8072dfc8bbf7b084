//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `MALICE_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`). Unset selects the in-memory order store.
//! - `MALICE_HOST` - Bind address (default: 127.0.0.1)
//! - `MALICE_PORT` - Listen port (default: 3000)
//! - `MALICE_BASE_URL` - Public URL (default: `http://localhost:3000`)
//! - `MALICE_EXPORT_MODE` - `download` or `remote` (default: download)
//! - `MALICE_MOCK_DELAY_MS` - Latency of simulated remote calls (default: 500)
//! - `MALICE_REPORT_EMAIL` - Recipient named in the simulated monthly report
//! - `MALICE_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - (default: 1.0)

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MOCK_DELAY_MS: u64 = 500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How the admin export buttons deliver their output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportMode {
    /// XML/CSV file downloads.
    #[default]
    Download,
    /// Simulated spreadsheet post and email report.
    Remote,
}

impl FromStr for ExportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "download" => Ok(Self::Download),
            "remote" => Ok(Self::Remote),
            other => Err(format!("expected 'download' or 'remote', got '{other}'")),
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Download => write!(f, "download"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Application configuration.
///
/// Implements `Debug` manually to redact the database URL.
#[derive(Clone)]
pub struct MaliceConfig {
    /// `PostgreSQL` connection URL (contains password). `None` keeps orders in memory.
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Download files or call the simulated remote services
    pub export_mode: ExportMode,
    /// Artificial latency of the simulated remote services
    pub mock_delay: Duration,
    /// Recipient shown for the simulated monthly report
    pub report_email: Option<String>,
    /// Emit JSON logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl fmt::Debug for MaliceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaliceConfig")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("export_mode", &self.export_mode)
            .field("mock_delay", &self.mock_delay)
            .field("report_email", &self.report_email)
            .field("log_json", &self.log_json)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish_non_exhaustive()
    }
}

impl Default for MaliceConfig {
    /// Local development defaults: in-memory store, file downloads.
    fn default() -> Self {
        Self {
            database_url: None,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: format!("http://localhost:{DEFAULT_PORT}"),
            export_mode: ExportMode::Download,
            mock_delay: Duration::from_millis(DEFAULT_MOCK_DELAY_MS),
            report_email: None,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

impl MaliceConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparsable values.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let database_url = get("MALICE_DATABASE_URL")
            .or_else(|| get("DATABASE_URL"))
            .map(SecretString::from);
        let host = parse_or(get("MALICE_HOST"), "MALICE_HOST", defaults.host)?;
        let port = parse_or(get("MALICE_PORT"), "MALICE_PORT", defaults.port)?;
        let base_url = get("MALICE_BASE_URL").unwrap_or_else(|| format!("http://localhost:{port}"));
        let export_mode = parse_or(
            get("MALICE_EXPORT_MODE"),
            "MALICE_EXPORT_MODE",
            defaults.export_mode,
        )?;
        let mock_delay = Duration::from_millis(parse_or(
            get("MALICE_MOCK_DELAY_MS"),
            "MALICE_MOCK_DELAY_MS",
            DEFAULT_MOCK_DELAY_MS,
        )?);
        let report_email = get("MALICE_REPORT_EMAIL");
        let log_json = get("MALICE_LOG_JSON").is_some();

        let sentry_dsn = get("SENTRY_DSN");
        let sentry_environment = get("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            export_mode,
            mock_delay,
            report_email,
            log_json,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Returns the database URL, or an error naming the variable to set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when no database is configured.
    pub fn require_database_url(&self) -> Result<&SecretString, ConfigError> {
        self.database_url
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("MALICE_DATABASE_URL".to_string()))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional value, falling back to `default` when unset.
fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.map_or(Ok(default), |v| {
        v.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<MaliceConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        MaliceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.export_mode, ExportMode::Download);
        assert_eq!(config.mock_delay, Duration::from_millis(500));
        assert!(!config.log_json);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://fallback/db")]).unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://fallback/db"
        );

        let config = load(&[
            ("MALICE_DATABASE_URL", "postgres://primary/db"),
            ("DATABASE_URL", "postgres://fallback/db"),
        ])
        .unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://primary/db"
        );
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MALICE_HOST", "0.0.0.0"),
            ("MALICE_PORT", "8080"),
            ("MALICE_EXPORT_MODE", "Remote"),
            ("MALICE_MOCK_DELAY_MS", "0"),
            ("MALICE_REPORT_EMAIL", "racunovodstvo@example.com"),
            ("MALICE_LOG_JSON", "1"),
            ("MALICE_BASE_URL", "https://malice.example.com"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.export_mode, ExportMode::Remote);
        assert_eq!(config.mock_delay, Duration::ZERO);
        assert_eq!(
            config.report_email.as_deref(),
            Some("racunovodstvo@example.com")
        );
        assert!(config.log_json);
        assert!(config.is_secure());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("MALICE_PORT", "http")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "MALICE_PORT"
        ));
        assert!(matches!(
            load(&[("MALICE_EXPORT_MODE", "fax")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "MALICE_EXPORT_MODE"
        ));
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = load(&[("MALICE_DATABASE_URL", "postgres://user:hunter2@db/malice")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_require_database_url() {
        assert!(matches!(
            MaliceConfig::default().require_database_url(),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }
}
