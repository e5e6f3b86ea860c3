//! Value types shared across the notification pipeline.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

/// Unique identifier of a subject: a staff account or an employee.
///
/// Stored and transported as a plain string; the wrapper exists so subject
/// ids cannot be confused with other string-typed ids at API boundaries.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
pub struct SubjectId(String);

impl SubjectId {
    /// Creates a new `SubjectId`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `id` is empty.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        debug_assert!(!id.is_empty(), "SubjectId must not be empty");
        Self(id)
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SubjectId").field(&self.0).finish()
    }
}

impl Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SubjectId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for SubjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The two kinds of subjects the pipeline addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubjectKind {
    /// An administrative user account (admin, HR, manager...).
    Staff,
    /// An individual employee.
    Employee,
}

impl Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectKind::Staff => write!(f, "staff"),
            SubjectKind::Employee => write!(f, "employee"),
        }
    }
}

/// Role of a staff account.
///
/// A typed role set checked with a membership predicate, rather than an
/// untyped role blob filtered in memory per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaffRole {
    SuperAdmin,
    Admin,
    Hr,
    Manager,
    Employee,
}

/// Roles that receive submission notifications ("many raise, few decide").
pub const PRIVILEGED_ROLES: [StaffRole; 4] = [
    StaffRole::SuperAdmin,
    StaffRole::Admin,
    StaffRole::Hr,
    StaffRole::Manager,
];

impl StaffRole {
    /// Whether the role belongs to the privileged decision-making set.
    pub fn is_privileged(&self) -> bool {
        PRIVILEGED_ROLES.contains(self)
    }
}

/// A resolved recipient of a notification.
///
/// A proper tagged value; receiver identity is never encoded as a
/// delimiter-joined string at any boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Receiver {
    pub kind: SubjectKind,
    pub id: SubjectId,
}

impl Receiver {
    /// A staff receiver.
    pub fn staff(id: impl Into<SubjectId>) -> Self {
        Self {
            kind: SubjectKind::Staff,
            id: id.into(),
        }
    }

    /// An employee receiver.
    pub fn employee(id: impl Into<SubjectId>) -> Self {
        Self {
            kind: SubjectKind::Employee,
            id: id.into(),
        }
    }
}

impl Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind, self.id)
    }
}

/// A subject that contributed to a notification.
///
/// The display name is captured at publish time (when the emitting module
/// supplies one) so rendering never has to consult the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: SubjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<SubjectId>, display_name: Option<String>) -> Self {
        Self {
            id: id.into(),
            display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_id_new_and_as_str() {
        let id = SubjectId::new("42");
        assert_eq!(id.as_str(), "42");
        assert_eq!(format!("{}", id), "42");
        assert_eq!(format!("{:?}", id), "SubjectId(\"42\")");
    }

    #[test]
    fn subject_id_serde_is_transparent() {
        let id = SubjectId::new("emp-7");
        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, "\"emp-7\"");
        let deserialized: SubjectId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "SubjectId must not be empty")]
    fn subject_id_empty_panics() {
        SubjectId::new("");
    }

    #[test]
    fn subject_kind_display_and_serde() {
        assert_eq!(format!("{}", SubjectKind::Staff), "staff");
        assert_eq!(format!("{}", SubjectKind::Employee), "employee");
        assert_eq!(
            serde_json::to_string(&SubjectKind::Employee).unwrap(),
            "\"employee\""
        );
    }

    #[test]
    fn staff_role_privilege_predicate() {
        assert!(StaffRole::SuperAdmin.is_privileged());
        assert!(StaffRole::Admin.is_privileged());
        assert!(StaffRole::Hr.is_privileged());
        assert!(StaffRole::Manager.is_privileged());
        assert!(!StaffRole::Employee.is_privileged());
    }

    #[test]
    fn receiver_constructors_and_display() {
        let staff = Receiver::staff("a1");
        assert_eq!(staff.kind, SubjectKind::Staff);
        assert_eq!(format!("{}", staff), "staff_a1");

        let employee = Receiver::employee("42");
        assert_eq!(employee.kind, SubjectKind::Employee);
        assert_eq!(format!("{}", employee), "employee_42");
    }

    #[test]
    fn actor_serde_skips_absent_display_name() {
        let anonymous = Actor::new("9", None);
        assert_eq!(serde_json::to_string(&anonymous).unwrap(), r#"{"id":"9"}"#);

        let named = Actor::new("9", Some("Dana".to_string()));
        let round_trip: Actor =
            serde_json::from_str(&serde_json::to_string(&named).unwrap()).unwrap();
        assert_eq!(round_trip, named);
    }
}
