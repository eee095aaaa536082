use rolekeeper_model::{PermissionType, Role, RoleId};
use tracing::info;

use super::EntityStore;
use crate::error::{EntityKind, Result, ValidationError};
use crate::notifications::Notification;

/// Copy of `role` with `permission`'s membership flipped.
///
/// Applying it twice yields the original permission set.
pub fn toggle_permission(role: &Role, permission: PermissionType) -> Role {
    Role {
        permissions: role.permissions.toggled(permission),
        ..role.clone()
    }
}

impl EntityStore {
    /// Flip one permission on one role and return the updated role.
    ///
    /// Other roles are untouched. An unknown `role_id` follows the store's
    /// missing-id policy; a permission outside the universe is rejected.
    pub fn toggle_permission(
        &mut self,
        role_id: RoleId,
        permission: PermissionType,
    ) -> Result<Option<Role>> {
        let Some(index) = self.roles.iter().position(|role| role.id == role_id)
        else {
            return self.missing(EntityKind::Role, role_id.get());
        };
        if !self.universe.allows(permission) {
            return Err(
                ValidationError::PermissionOutsideUniverse(permission).into()
            );
        }

        let role = &mut self.roles[index];

        *role = toggle_permission(role, permission);
        let granted = role.has_permission(permission);
        let updated = role.clone();

        info!(
            role_id = %role_id,
            %permission,
            granted,
            permissions = %updated.permissions,
            "Role permission toggled"
        );
        self.committed(Notification::PermissionToggled {
            role_id,
            permission,
            granted,
        });
        Ok(Some(updated))
    }
}
