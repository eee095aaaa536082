use crate::ids::RoleId;
use crate::permission::{PermissionSet, PermissionType};

/// A role that users reference by name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Role {
    /// Store-assigned identifier
    pub id: RoleId,
    /// Human-facing name (e.g., "admin"), referenced by `User::role`
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Permissions granted by this role
    pub permissions: PermissionSet,
}

impl Role {
    /// Check if this role grants a permission
    pub fn has_permission(&self, permission: PermissionType) -> bool {
        self.permissions.contains(permission)
    }
}

/// Candidate for a role that does not have an id yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NewRole {
    pub name: String,
    pub description: String,
    pub permissions: PermissionSet,
}

impl NewRole {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        permissions: impl Into<PermissionSet>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            permissions: permissions.into(),
        }
    }

    /// Attach an id, producing the stored record.
    pub fn into_role(self, id: RoleId) -> Role {
        Role {
            id,
            name: self.name,
            description: self.description,
            permissions: self.permissions,
        }
    }
}
