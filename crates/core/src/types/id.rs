//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. IDs are strings
//! (`emp-1`, `order-1718000000000-3f2a`) because that is how they are
//! stored in the order slot and shown in forms.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `generate()` producing `<prefix>-<unix millis>-<random hex>`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use malice_core::define_id;
/// define_id!(TicketId, "ticket");
/// define_id!(RoomId, "room");
///
/// let ticket = TicketId::new("ticket-1");
/// assert_eq!(ticket.as_str(), "ticket-1");
/// assert!(TicketId::generate().as_str().starts_with("ticket-"));
///
/// // These are different types, so this won't compile:
/// // let _: RoomId = ticket;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used by [`Self::generate`].
            pub const PREFIX: &'static str = $prefix;

            /// Wrap an existing ID value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Create a fresh ID from the current time plus a random suffix.
            #[must_use]
            pub fn generate() -> Self {
                let millis = ::chrono::Utc::now().timestamp_millis();
                let suffix: u16 = ::rand::random();
                Self(format!("{}-{millis}-{suffix:04x}", Self::PREFIX))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(EmployeeId, "emp");
define_id!(MealId, "meal");
define_id!(OrderId, "order");
