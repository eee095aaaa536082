//! Strictness knobs for the entity store.
//!
//! The defaults reproduce the console's historical behavior: blank fields are
//! accepted, `User::role` is a free string, and unknown ids are silently
//! ignored. Each knob can be tightened on its own.

use serde::{Deserialize, Serialize};

/// How candidate fields are checked on add and edit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Blank names, emails and roles are stored as given
    #[default]
    Lenient,
    /// Required fields must be non-blank and role names unique
    Strict,
}

/// Whether `User::role` must name a live role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RoleReferenceMode {
    /// Any string is accepted; dangling references are only reported
    #[default]
    Loose,
    /// Adds and edits must reference an existing role by name.
    /// Deleting a role still never cascades.
    Enforced,
}

/// What happens when an operation targets an id that does not exist.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MissingIdPolicy {
    /// The operation is a no-op
    #[default]
    Ignore,
    /// The operation fails with `CoreError::NotFound`
    Report,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(default)]
pub struct StorePolicy {
    pub validation: ValidationMode,
    pub role_references: RoleReferenceMode,
    pub missing_ids: MissingIdPolicy,
}

impl StorePolicy {
    /// Every knob at its strictest setting.
    pub fn strict() -> Self {
        Self {
            validation: ValidationMode::Strict,
            role_references: RoleReferenceMode::Enforced,
            missing_ids: MissingIdPolicy::Report,
        }
    }

    pub fn is_strict_validation(&self) -> bool {
        self.validation == ValidationMode::Strict
    }

    pub fn enforces_role_references(&self) -> bool {
        self.role_references == RoleReferenceMode::Enforced
    }

    pub fn reports_missing_ids(&self) -> bool {
        self.missing_ids == MissingIdPolicy::Report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lenient() {
        let policy = StorePolicy::default();
        assert!(!policy.is_strict_validation());
        assert!(!policy.enforces_role_references());
        assert!(!policy.reports_missing_ids());
    }

    #[test]
    fn partial_policy_deserializes() {
        let policy: StorePolicy =
            serde_json::from_str(r#"{ "missing_ids": "report" }"#).unwrap();
        assert!(policy.reports_missing_ids());
        assert_eq!(policy.validation, ValidationMode::Lenient);
    }
}
