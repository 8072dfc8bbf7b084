//! Employees and the employee directory.
//!
//! The directory is seeded with a fixed list at start-up and mutated by
//! admins. It is never persisted.
//!
//! Error messages are user-facing and shown verbatim in the feedback banner.

use serde::{Deserialize, Serialize};

use crate::types::{Email, EmailError, EmployeeId, Pin, PinError, Role};

/// Errors from employee validation and directory operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmployeeError {
    /// Name or email is blank.
    #[error("Ime in e-pošta uporabnika ne smeta biti prazna.")]
    MissingNameOrEmail,
    /// Email is present but malformed.
    #[error("Neveljaven e-poštni naslov.")]
    InvalidEmail(#[source] EmailError),
    /// Admin role without a PIN.
    #[error("Koda PIN je obvezna za administratorje.")]
    PinRequired,
    /// Admin PIN is present but not four digits.
    #[error("Koda PIN mora vsebovati natanko 4 številke.")]
    InvalidPin(#[source] PinError),
    /// No employee with this id.
    #[error("Uporabnik ne obstaja.")]
    NotFound(EmployeeId),
    /// Attempt to delete the identity of the acting session.
    #[error("Ne morete izbrisati uporabnika, s katerim ste trenutno prijavljeni.")]
    DeleteSelf,
}

/// An employee profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    /// Present iff `role` is [`Role::Admin`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<Pin>,
}

impl Employee {
    /// Returns `true` when this employee is an admin and `entered` equals the stored PIN.
    #[must_use]
    pub fn pin_matches(&self, entered: &str) -> bool {
        self.role.is_admin() && self.pin.as_ref().is_some_and(|pin| pin.matches(entered))
    }
}

/// Raw add/update form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub pin: Option<String>,
}

/// Validated mutable fields of an employee.
struct Profile {
    name: String,
    email: Email,
    role: Role,
    pin: Option<Pin>,
}

impl EmployeeInput {
    fn validate(&self) -> Result<Profile, EmployeeError> {
        let name = self.name.trim();
        if name.is_empty() || self.email.trim().is_empty() {
            return Err(EmployeeError::MissingNameOrEmail);
        }
        let email = Email::parse(&self.email).map_err(EmployeeError::InvalidEmail)?;

        let pin = match self.role {
            Role::Admin => {
                let raw = self.pin.as_deref().unwrap_or_default();
                match Pin::parse(raw) {
                    Ok(pin) => Some(pin),
                    Err(PinError::Empty) => return Err(EmployeeError::PinRequired),
                    Err(e) => return Err(EmployeeError::InvalidPin(e)),
                }
            }
            // Demotion drops any previous PIN.
            Role::User => None,
        };

        Ok(Profile {
            name: name.to_owned(),
            email,
            role: self.role,
            pin,
        })
    }
}

/// In-memory employee directory, in insertion order.
#[derive(Debug, Clone)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
}

impl Default for EmployeeDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

impl EmployeeDirectory {
    /// Create a directory from an existing list.
    #[must_use]
    pub const fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    /// The start-up directory.
    #[must_use]
    pub fn seeded() -> Self {
        const SEED: &[(&str, &str, &str, Option<&str>)] = &[
            ("emp-1", "Ana Novak", "ana.novak@example.com", Some("1234")),
            ("emp-7", "Anja", "anja@example.com", Some("8520")),
            ("emp-2", "Luka Horvat", "luka.horvat@example.com", None),
            ("emp-3", "Eva Kovačič", "eva.kovacic@example.com", None),
            ("emp-4", "Jan Kovač", "jan.kovac@example.com", None),
            ("emp-5", "Nina Zupančič", "nina.zupancic@example.com", None),
            ("emp-6", "Marko Krajnc", "marko.krajnc@example.com", None),
        ];

        let employees = SEED
            .iter()
            .filter_map(|&(id, name, email, pin)| {
                let email = Email::parse(email).ok()?;
                let pin = pin.and_then(|p| Pin::parse(p).ok());
                Some(Employee {
                    id: EmployeeId::new(id),
                    name: name.to_owned(),
                    email,
                    role: if pin.is_some() { Role::Admin } else { Role::User },
                    pin,
                })
            })
            .collect();

        Self { employees }
    }

    /// All employees in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Employee] {
        &self.employees
    }

    /// Number of employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns `true` if the directory has no employees.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Look up an employee by id.
    #[must_use]
    pub fn find(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    /// Validate and append a new employee with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns a validation error when name/email are blank, the email is
    /// malformed, or an admin has no valid PIN.
    pub fn add(&mut self, input: &EmployeeInput) -> Result<Employee, EmployeeError> {
        let profile = input.validate()?;
        let employee = Employee {
            id: EmployeeId::generate(),
            name: profile.name,
            email: profile.email,
            role: profile.role,
            pin: profile.pin,
        };
        self.employees.push(employee.clone());
        Ok(employee)
    }

    /// Validate and replace the mutable fields of an existing employee.
    ///
    /// # Errors
    ///
    /// Returns the same validation errors as [`Self::add`], or
    /// [`EmployeeError::NotFound`] for an unknown id.
    pub fn update(
        &mut self,
        id: &EmployeeId,
        input: &EmployeeInput,
    ) -> Result<Employee, EmployeeError> {
        let profile = input.validate()?;
        let employee = self
            .employees
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| EmployeeError::NotFound(id.clone()))?;

        employee.name = profile.name;
        employee.email = profile.email;
        employee.role = profile.role;
        employee.pin = profile.pin;
        Ok(employee.clone())
    }

    /// Remove an employee unless it is the acting session's identity.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeError::DeleteSelf`] when `id == acting`, or
    /// [`EmployeeError::NotFound`] for an unknown id.
    pub fn delete(
        &mut self,
        id: &EmployeeId,
        acting: Option<&EmployeeId>,
    ) -> Result<Employee, EmployeeError> {
        if acting == Some(id) {
            return Err(EmployeeError::DeleteSelf);
        }
        let index = self
            .employees
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| EmployeeError::NotFound(id.clone()))?;
        Ok(self.employees.remove(index))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, role: Role, pin: Option<&str>) -> EmployeeInput {
        EmployeeInput {
            name: name.to_owned(),
            email: email.to_owned(),
            role,
            pin: pin.map(str::to_owned),
        }
    }

    #[test]
    fn test_seeded_directory() {
        let dir = EmployeeDirectory::seeded();
        assert_eq!(dir.len(), 7);

        let ana = dir.find(&EmployeeId::new("emp-1")).unwrap();
        assert_eq!(ana.name, "Ana Novak");
        assert_eq!(ana.role, Role::Admin);
        assert!(ana.pin_matches("1234"));

        let luka = dir.find(&EmployeeId::new("emp-2")).unwrap();
        assert_eq!(luka.role, Role::User);
        assert!(luka.pin.is_none());
    }

    #[test]
    fn test_add_employee() {
        let mut dir = EmployeeDirectory::seeded();
        let added = dir
            .add(&input(" Maja ", "maja@example.com", Role::User, Some("9999")))
            .unwrap();

        assert_eq!(added.name, "Maja");
        assert!(added.id.as_str().starts_with("emp-"));
        // Plain users never keep a PIN.
        assert!(added.pin.is_none());
        assert_eq!(dir.len(), 8);
        assert_eq!(dir.find(&added.id), Some(&added));
    }

    #[test]
    fn test_add_rejects_blank_fields() {
        let mut dir = EmployeeDirectory::seeded();
        assert_eq!(
            dir.add(&input("  ", "x@example.com", Role::User, None)),
            Err(EmployeeError::MissingNameOrEmail)
        );
        assert_eq!(
            dir.add(&input("Maja", "", Role::User, None)),
            Err(EmployeeError::MissingNameOrEmail)
        );
        assert_eq!(dir.len(), 7);
    }

    #[test]
    fn test_add_admin_requires_pin() {
        let mut dir = EmployeeDirectory::seeded();
        assert_eq!(
            dir.add(&input("Maja", "maja@example.com", Role::Admin, None)),
            Err(EmployeeError::PinRequired)
        );
        assert_eq!(
            dir.add(&input("Maja", "maja@example.com", Role::Admin, Some("   "))),
            Err(EmployeeError::PinRequired)
        );
        assert!(matches!(
            dir.add(&input("Maja", "maja@example.com", Role::Admin, Some("12"))),
            Err(EmployeeError::InvalidPin(_))
        ));
        assert_eq!(dir.len(), 7);
    }

    #[test]
    fn test_update_replaces_fields_and_drops_pin_on_demotion() {
        let mut dir = EmployeeDirectory::seeded();
        let id = EmployeeId::new("emp-7");
        let updated = dir
            .update(&id, &input("Anja K.", "anja.k@example.com", Role::User, Some("8520")))
            .unwrap();

        assert_eq!(updated.name, "Anja K.");
        assert_eq!(updated.email.as_str(), "anja.k@example.com");
        assert_eq!(updated.role, Role::User);
        assert!(updated.pin.is_none());
        assert_eq!(dir.find(&id), Some(&updated));
    }

    #[test]
    fn test_update_unknown_id() {
        let mut dir = EmployeeDirectory::seeded();
        let id = EmployeeId::new("emp-404");
        assert_eq!(
            dir.update(&id, &input("X", "x@example.com", Role::User, None)),
            Err(EmployeeError::NotFound(id))
        );
    }

    #[test]
    fn test_delete_self_is_rejected() {
        let mut dir = EmployeeDirectory::seeded();
        let me = EmployeeId::new("emp-1");
        let before = dir.all().to_vec();

        assert_eq!(dir.delete(&me, Some(&me)), Err(EmployeeError::DeleteSelf));
        assert_eq!(dir.all(), before.as_slice());
    }

    #[test]
    fn test_delete_other_removes_exactly_one() {
        let mut dir = EmployeeDirectory::seeded();
        let me = EmployeeId::new("emp-1");
        let other = EmployeeId::new("emp-4");

        let removed = dir.delete(&other, Some(&me)).unwrap();
        assert_eq!(removed.name, "Jan Kovač");
        assert_eq!(dir.len(), 6);
        assert!(dir.find(&other).is_none());
        assert!(dir.find(&me).is_some());
    }
}
