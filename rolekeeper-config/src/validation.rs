use std::collections::HashSet;

use rolekeeper_model::{PermissionType, RoleId, UserId};
use thiserror::Error;

use crate::models::RolekeeperConfig;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("seed role `{role}` grants `{permission}`, which is not in the permission universe")]
    PermissionOutsideUniverse {
        role: String,
        permission: PermissionType,
    },
    #[error("seed role id {0} appears more than once")]
    DuplicateRoleId(RoleId),
    #[error("seed user id {0} appears more than once")]
    DuplicateUserId(UserId),
    #[error(
        "seed user {user_id} references unknown role `{role}` while role references are enforced"
    )]
    UnknownSeedRole { user_id: UserId, role: String },
}

/// A configuration the store accepts but that is probably a mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigWarning {
    #[error("permission universe is empty; roles cannot be granted anything")]
    EmptyUniverse,
    #[error("seed role name `{0}` is used by more than one role")]
    DuplicateRoleName(String),
    #[error("seed role {0} has a blank name")]
    BlankRoleName(RoleId),
    #[error("seed user {user_id} references unknown role `{role}`")]
    DanglingRole { user_id: UserId, role: String },
}

impl ConfigWarning {
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ConfigWarning::EmptyUniverse => Some(
                "list at least one of create, read, update, delete under `permissions`",
            ),
            ConfigWarning::DanglingRole { .. } => {
                Some("add the role under `seed.roles` or fix the user's role")
            }
            ConfigWarning::BlankRoleName(_) => {
                Some("strict validation only checks roles added later")
            }
            ConfigWarning::DuplicateRoleName(_) => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigWarnings(Vec<ConfigWarning>);

impl ConfigWarnings {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConfigWarning> {
        self.0.iter()
    }

    fn push(&mut self, warning: ConfigWarning) {
        self.0.push(warning);
    }
}

pub fn apply_guard_rails(
    config: &RolekeeperConfig,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();
    let universe = config.universe();

    if universe.permissions().is_empty() {
        warnings.push(ConfigWarning::EmptyUniverse);
    }

    let mut role_ids = HashSet::new();
    let mut role_names = HashSet::new();
    for role in &config.seed.roles {
        if !role_ids.insert(role.id) {
            return Err(ConfigGuardRailError::DuplicateRoleId(role.id));
        }
        if let Some(permission) =
            role.permissions.iter().find(|p| !universe.allows(*p))
        {
            return Err(ConfigGuardRailError::PermissionOutsideUniverse {
                role: role.name.clone(),
                permission,
            });
        }
        if !role_names.insert(role.name.as_str()) {
            warnings.push(ConfigWarning::DuplicateRoleName(role.name.clone()));
        }
        if config.policy.is_strict_validation() && role.name.trim().is_empty()
        {
            warnings.push(ConfigWarning::BlankRoleName(role.id));
        }
    }

    let mut user_ids = HashSet::new();
    for user in &config.seed.users {
        if !user_ids.insert(user.id) {
            return Err(ConfigGuardRailError::DuplicateUserId(user.id));
        }
        if role_names.contains(user.role.as_str()) {
            continue;
        }
        if config.policy.enforces_role_references() {
            return Err(ConfigGuardRailError::UnknownSeedRole {
                user_id: user.id,
                role: user.role.clone(),
            });
        }
        warnings.push(ConfigWarning::DanglingRole {
            user_id: user.id,
            role: user.role.clone(),
        });
    }

    Ok(warnings)
}
