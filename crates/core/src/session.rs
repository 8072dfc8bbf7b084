//! Per-browser session state: identity, current view and the admin gate.
//!
//! [`SessionState`] is a plain value. The web layer loads it from the
//! session store, applies one transition and stores it back.

use serde::{Deserialize, Serialize};

use crate::employee::{Employee, EmployeeDirectory};
use crate::types::{EmployeeId, Role, View};

/// Errors from session transitions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Login with an id that is not in the directory.
    #[error("Prosimo, izberite svoje ime s seznama.")]
    UnknownEmployee,
    /// Guest login with a blank name.
    #[error("Prosimo, vnesite svoje ime in priimek.")]
    GuestNameRequired,
    /// Wrong PIN, or the identity is not an admin.
    #[error("Napačna koda PIN. Poskusite znova.")]
    InvalidPin,
}

/// Session copy of the logged-in identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    /// `None` for guests.
    pub id: Option<EmployeeId>,
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    /// Returns `true` for a guest identity.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        self.id.is_none()
    }
}

impl From<&Employee> for CurrentUser {
    fn from(employee: &Employee) -> Self {
        Self {
            id: Some(employee.id.clone()),
            name: employee.name.clone(),
            role: employee.role,
        }
    }
}

/// Outcome of asking for the admin view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAccess {
    /// Not logged in, or not an admin. Nothing changed.
    Denied,
    /// Already authenticated this session; the view is now `Admin`.
    Granted,
    /// A PIN must be entered first.
    PinRequired,
}

/// Identity, view and admin flag of one browser session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    current: Option<CurrentUser>,
    view: View,
    admin_authenticated: bool,
}

impl SessionState {
    /// The logged-in identity, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&CurrentUser> {
        self.current.as_ref()
    }

    /// The current view.
    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Whether the PIN was entered in this session.
    #[must_use]
    pub const fn is_admin_authenticated(&self) -> bool {
        self.admin_authenticated
    }

    /// Whether the admin panel should be shown.
    #[must_use]
    pub fn shows_admin_view(&self) -> bool {
        self.admin_authenticated
            && self.view == View::Admin
            && self.current.as_ref().is_some_and(|u| u.role.is_admin())
    }

    /// Id of the logged-in employee (`None` for guests and anonymous sessions).
    #[must_use]
    pub fn employee_id(&self) -> Option<&EmployeeId> {
        self.current.as_ref().and_then(|u| u.id.as_ref())
    }

    /// Log in as a directory employee.
    ///
    /// Starts in the user view with the admin flag cleared.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownEmployee`] and leaves the state
    /// unchanged if `id` is not in the directory.
    pub fn login(
        &mut self,
        directory: &EmployeeDirectory,
        id: &EmployeeId,
    ) -> Result<&CurrentUser, SessionError> {
        let employee = directory.find(id).ok_or(SessionError::UnknownEmployee)?;
        self.view = View::User;
        self.admin_authenticated = false;
        Ok(self.current.insert(CurrentUser::from(employee)))
    }

    /// Log in as a guest with a free-text name.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::GuestNameRequired`] for a blank name.
    pub fn login_guest(&mut self, name: &str) -> Result<&CurrentUser, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::GuestNameRequired);
        }
        self.view = View::User;
        self.admin_authenticated = false;
        Ok(self.current.insert(CurrentUser {
            id: None,
            name: name.to_owned(),
            role: Role::User,
        }))
    }

    /// Forget the identity and the admin flag.
    pub fn logout(&mut self) {
        self.current = None;
        self.admin_authenticated = false;
        self.view = View::User;
    }

    /// Ask to switch to the admin view.
    pub fn request_admin_view(&mut self) -> AdminAccess {
        if !self.current.as_ref().is_some_and(|u| u.role.is_admin()) {
            return AdminAccess::Denied;
        }
        if self.admin_authenticated {
            self.view = View::Admin;
            AdminAccess::Granted
        } else {
            AdminAccess::PinRequired
        }
    }

    /// Check a PIN against the directory record of the current identity.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidPin`] and leaves the state unchanged
    /// unless the identity is an admin whose stored PIN equals `pin`.
    pub fn submit_pin(
        &mut self,
        directory: &EmployeeDirectory,
        pin: &str,
    ) -> Result<(), SessionError> {
        let is_admin = self.current.as_ref().is_some_and(|u| u.role.is_admin());
        let matches = self
            .employee_id()
            .and_then(|id| directory.find(id))
            .is_some_and(|e| e.pin_matches(pin));

        if !(is_admin && matches) {
            return Err(SessionError::InvalidPin);
        }
        self.admin_authenticated = true;
        self.view = View::Admin;
        Ok(())
    }

    /// Switch back to the user view. The admin flag is kept.
    pub fn show_user_view(&mut self) {
        self.view = View::User;
    }

    /// Refresh the session copy after `employee` was edited, if it is us.
    pub fn refresh_identity(&mut self, employee: &Employee) {
        if self.employee_id() == Some(&employee.id) {
            self.current = Some(CurrentUser::from(employee));
        }
    }

    /// Bring the session copy in line with the directory record.
    ///
    /// An employee removed from the directory is logged out. One who is no
    /// longer an admin loses the admin flag and returns to the user view.
    /// Guests and anonymous sessions are left alone. Returns `true` if the
    /// state changed.
    pub fn sync_with_directory(&mut self, directory: &EmployeeDirectory) -> bool {
        let Some(id) = self.employee_id() else {
            return false;
        };
        let before = self.clone();
        match directory.find(id) {
            None => self.logout(),
            Some(employee) => {
                self.current = Some(CurrentUser::from(employee));
                if !employee.role.is_admin() {
                    self.admin_authenticated = false;
                    self.view = View::User;
                }
            }
        }
        *self != before
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::employee::EmployeeInput;

    fn logged_in(id: &str) -> (SessionState, EmployeeDirectory) {
        let dir = EmployeeDirectory::seeded();
        let mut session = SessionState::default();
        session.login(&dir, &EmployeeId::new(id)).unwrap();
        (session, dir)
    }

    #[test]
    fn test_login_sets_identity_and_user_view() {
        let (session, _) = logged_in("emp-1");
        let user = session.current().unwrap();
        assert_eq!(user.name, "Ana Novak");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(session.view(), View::User);
        assert!(!session.is_admin_authenticated());
    }

    #[test]
    fn test_login_unknown_id_changes_nothing() {
        let (mut session, dir) = logged_in("emp-2");
        let before = session.clone();
        assert_eq!(
            session.login(&dir, &EmployeeId::new("emp-404")).unwrap_err(),
            SessionError::UnknownEmployee
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_fresh_login_resets_admin_flag() {
        let (mut session, dir) = logged_in("emp-1");
        session.submit_pin(&dir, "1234").unwrap();
        assert!(session.is_admin_authenticated());

        session.login(&dir, &EmployeeId::new("emp-1")).unwrap();
        assert!(!session.is_admin_authenticated());
        assert_eq!(session.view(), View::User);
    }

    #[test]
    fn test_guest_login() {
        let mut session = SessionState::default();
        assert_eq!(
            session.login_guest("   ").unwrap_err(),
            SessionError::GuestNameRequired
        );
        let guest = session.login_guest(" Janez Novak ").unwrap();
        assert!(guest.is_guest());
        assert_eq!(guest.name, "Janez Novak");
        assert_eq!(session.request_admin_view(), AdminAccess::Denied);
    }

    #[test]
    fn test_request_admin_view_for_plain_user_is_noop() {
        let (mut session, _) = logged_in("emp-2");
        let before = session.clone();
        assert_eq!(session.request_admin_view(), AdminAccess::Denied);
        assert_eq!(session, before);
    }

    #[test]
    fn test_admin_needs_pin_then_is_granted_directly() {
        let (mut session, dir) = logged_in("emp-7");
        assert_eq!(session.request_admin_view(), AdminAccess::PinRequired);
        assert_eq!(session.view(), View::User);

        session.submit_pin(&dir, "8520").unwrap();
        assert!(session.is_admin_authenticated());
        assert_eq!(session.view(), View::Admin);
        assert!(session.shows_admin_view());

        session.show_user_view();
        assert!(!session.shows_admin_view());
        assert_eq!(session.request_admin_view(), AdminAccess::Granted);
        assert!(session.shows_admin_view());
    }

    #[test]
    fn test_wrong_pin_leaves_state_unchanged() {
        let (mut session, dir) = logged_in("emp-1");
        let before = session.clone();
        for wrong in ["", "0000", "123", "12345", "8520"] {
            assert_eq!(
                session.submit_pin(&dir, wrong).unwrap_err(),
                SessionError::InvalidPin
            );
        }
        assert_eq!(session, before);
        assert!(!session.is_admin_authenticated());
    }

    #[test]
    fn test_pin_for_non_admin_fails() {
        let (mut session, dir) = logged_in("emp-2");
        assert_eq!(
            session.submit_pin(&dir, "1234").unwrap_err(),
            SessionError::InvalidPin
        );
    }

    #[test]
    fn test_logout_clears_everything() {
        let (mut session, dir) = logged_in("emp-1");
        session.submit_pin(&dir, "1234").unwrap();
        session.logout();
        assert!(session.current().is_none());
        assert!(!session.is_admin_authenticated());
        assert_eq!(session.view(), View::User);
    }

    #[test]
    fn test_refresh_identity_only_touches_self() {
        let (mut session, mut dir) = logged_in("emp-1");
        let other = dir
            .update(
                &EmployeeId::new("emp-2"),
                &EmployeeInput {
                    name: "Luka H.".to_owned(),
                    email: "luka@example.com".to_owned(),
                    role: Role::User,
                    pin: None,
                },
            )
            .unwrap();
        session.refresh_identity(&other);
        assert_eq!(session.current().unwrap().name, "Ana Novak");

        let me = dir
            .update(
                &EmployeeId::new("emp-1"),
                &EmployeeInput {
                    name: "Ana N.".to_owned(),
                    email: "ana@example.com".to_owned(),
                    role: Role::User,
                    pin: None,
                },
            )
            .unwrap();
        session.refresh_identity(&me);
        let current = session.current().unwrap();
        assert_eq!(current.name, "Ana N.");
        assert_eq!(current.role, Role::User);
        assert_eq!(session.request_admin_view(), AdminAccess::Denied);
    }

    #[test]
    fn test_sync_logs_out_removed_employee() {
        let (mut session, mut dir) = logged_in("emp-7");
        session.submit_pin(&dir, "8520").unwrap();

        assert!(!session.sync_with_directory(&dir));
        assert!(session.shows_admin_view());

        dir.delete(&EmployeeId::new("emp-7"), Some(&EmployeeId::new("emp-1")))
            .unwrap();
        assert!(session.sync_with_directory(&dir));
        assert!(session.current().is_none());
        assert!(!session.is_admin_authenticated());
    }

    #[test]
    fn test_sync_drops_admin_flag_after_demotion() {
        let (mut session, mut dir) = logged_in("emp-7");
        session.submit_pin(&dir, "8520").unwrap();
        dir.update(
            &EmployeeId::new("emp-7"),
            &EmployeeInput {
                name: "Anja".to_owned(),
                email: "anja@example.com".to_owned(),
                role: Role::User,
                pin: None,
            },
        )
        .unwrap();

        assert!(session.sync_with_directory(&dir));
        assert_eq!(session.current().unwrap().role, Role::User);
        assert!(!session.is_admin_authenticated());
        assert_eq!(session.view(), View::User);
        assert!(!session.shows_admin_view());
    }

    #[test]
    fn test_sync_ignores_guests() {
        let dir = EmployeeDirectory::seeded();
        let mut session = SessionState::default();
        session.login_guest("Janez").unwrap();
        assert!(!session.sync_with_directory(&dir));
        assert_eq!(session.current().unwrap().name, "Janez");
    }
}
