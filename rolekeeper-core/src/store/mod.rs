//! Entity store
//!
//! Owns the canonical user and role collections together with the permission
//! universe. It is the only place entities are added or removed, and every
//! mutation goes through the checks selected by its [`StorePolicy`].
//!
//! ## Invariants
//!
//! - User ids and role ids are unique within their collection and come from a
//!   monotonic [`IdSequence`], so a delete followed by an add never collides.
//! - Every role's permission set is a subset of the store's
//!   [`PermissionUniverse`].
//! - Deleting a role never rewrites users that reference it by name.
//!
//! ## Example
//!
//! ```
//! use rolekeeper_core::store::EntityStore;
//! use rolekeeper_model::{NewUser, UserStatus};
//!
//! let mut store = EntityStore::seeded();
//! let amy = store
//!     .add_user(NewUser::new("Amy Lane", "amy@x.com", "viewer", UserStatus::Active))
//!     .unwrap();
//! assert_eq!(amy.id.get(), 4);
//! ```

mod permissions;
pub mod seed;
mod sequence;

pub use permissions::toggle_permission;
pub use sequence::IdSequence;

use sequence::StoreToken;

use std::collections::HashSet;

use rolekeeper_model::{
    NewRole, NewUser, PermissionSet, PermissionUniverse, Role, RoleId, User,
    UserField, UserId, UserStatus,
};
use tracing::{debug, info, warn};

use crate::error::{CoreError, EntityKind, Result, ValidationError};
use crate::notifications::{Notification, NotificationEvent, NotificationQueue};
use crate::policy::StorePolicy;

#[derive(Debug, Clone)]
pub struct EntityStore {
    users: Vec<User>,
    roles: Vec<Role>,
    universe: PermissionUniverse,
    policy: StorePolicy,
    user_ids: IdSequence,
    role_ids: IdSequence,
    revision: u64,
    token: StoreToken,
    notifications: NotificationQueue,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new(PermissionUniverse::default(), StorePolicy::default())
    }
}

impl EntityStore {
    /// Empty store over the given permission universe.
    pub fn new(universe: PermissionUniverse, policy: StorePolicy) -> Self {
        Self {
            users: Vec::new(),
            roles: Vec::new(),
            universe,
            policy,
            user_ids: IdSequence::default(),
            role_ids: IdSequence::default(),
            revision: 0,
            token: StoreToken::default(),
            notifications: NotificationQueue::default(),
        }
    }

    /// Store holding the demo users and roles with the default policy.
    pub fn seeded() -> Self {
        Self {
            users: seed::demo_users(),
            roles: seed::demo_roles(),
            user_ids: IdSequence::starting_after(3),
            role_ids: IdSequence::starting_after(3),
            ..Self::default()
        }
    }

    /// Build a store from existing records.
    ///
    /// Rejects duplicate ids, role permissions outside `universe` and, under
    /// [`RoleReferenceMode::Enforced`](crate::policy::RoleReferenceMode),
    /// users naming a role that is not part of `roles`.
    pub fn from_seed(
        users: Vec<User>,
        roles: Vec<Role>,
        universe: PermissionUniverse,
        policy: StorePolicy,
    ) -> Result<Self> {
        let mut store = Self::new(universe, policy);

        let mut seen_roles = HashSet::new();
        for role in &roles {
            if !seen_roles.insert(role.id) {
                return Err(ValidationError::DuplicateId {
                    entity: EntityKind::Role,
                    id: role.id.get(),
                }
                .into());
            }
            store.check_universe(&role.permissions)?;
            store.role_ids.observe(role.id.get());
        }
        store.roles = roles;

        let mut seen_users = HashSet::new();
        for user in &users {
            if !seen_users.insert(user.id) {
                return Err(ValidationError::DuplicateId {
                    entity: EntityKind::User,
                    id: user.id.get(),
                }
                .into());
            }
            store.check_role_reference(&user.role)?;
            store.user_ids.observe(user.id.get());
        }
        store.users = users;

        debug!(
            users = store.users.len(),
            roles = store.roles.len(),
            "Entity store seeded"
        );
        Ok(store)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    /// First role with exactly this name.
    pub fn role_by_name(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.name == name)
    }

    pub fn permission_universe(&self) -> &PermissionUniverse {
        &self.universe
    }

    pub fn policy(&self) -> &StorePolicy {
        &self.policy
    }

    /// Bumped on every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Identity of this store instance; clones get a fresh one.
    pub(crate) fn token(&self) -> u64 {
        self.token.get()
    }

    /// Users whose `role` does not name any current role.
    pub fn dangling_role_references(&self) -> Vec<&User> {
        self.users
            .iter()
            .filter(|user| self.role_by_name(&user.role).is_none())
            .collect()
    }

    pub fn pending_notifications(&self) -> &[NotificationEvent] {
        self.notifications.pending()
    }

    pub fn drain_notifications(&mut self) -> Vec<NotificationEvent> {
        self.notifications.drain()
    }

    pub fn add_user(&mut self, candidate: NewUser) -> Result<User> {
        if self.policy.is_strict_validation() {
            require(EntityKind::User, "name", &candidate.name)?;
            require(EntityKind::User, "email", &candidate.email)?;
            require(EntityKind::User, "role", &candidate.role)?;
        }
        self.check_role_reference(&candidate.role)?;

        let id = UserId(self.user_ids.next());
        let user = candidate.into_user(id);
        self.users.push(user.clone());

        info!(user_id = %id, role = %user.role, "User added");
        self.committed(Notification::UserAdded {
            user_id: id,
            name: user.name.clone(),
        });
        Ok(user)
    }

    /// Remove a user. `Ok(None)` when the id is unknown and the policy ignores
    /// missing ids.
    pub fn delete_user(&mut self, id: UserId) -> Result<Option<User>> {
        let Some(index) = self.users.iter().position(|user| user.id == id)
        else {
            return self.missing(EntityKind::User, id.get());
        };

        let user = self.users.remove(index);
        info!(user_id = %id, "User deleted");
        self.committed(Notification::UserDeleted { user_id: id });
        Ok(Some(user))
    }

    pub fn add_role(&mut self, candidate: NewRole) -> Result<Role> {
        if self.policy.is_strict_validation() {
            require(EntityKind::Role, "name", &candidate.name)?;
            if self.role_by_name(&candidate.name).is_some() {
                return Err(
                    ValidationError::DuplicateRoleName(candidate.name).into()
                );
            }
        }

        self.check_universe(&candidate.permissions)?;

        let id = RoleId(self.role_ids.next());
        let role = candidate.into_role(id);
        self.roles.push(role.clone());

        info!(
            role_id = %id,
            name = %role.name,
            permissions = %role.permissions,
            "Role added"
        );
        self.committed(Notification::RoleAdded {
            role_id: id,
            name: role.name.clone(),
        });
        Ok(role)
    }

    /// Remove a role. Users that reference it keep their `role` string.
    pub fn delete_role(&mut self, id: RoleId) -> Result<Option<Role>> {
        let Some(index) = self.roles.iter().position(|role| role.id == id)
        else {
            return self.missing(EntityKind::Role, id.get());
        };

        let role = self.roles.remove(index);
        let orphaned = self
            .users
            .iter()
            .filter(|user| user.role == role.name)
            .count();
        if orphaned > 0 {
            warn!(
                role_id = %id,
                name = %role.name,
                orphaned,
                "Role deleted while still referenced by users"
            );
        } else {
            info!(role_id = %id, name = %role.name, "Role deleted");
        }
        self.committed(Notification::RoleDeleted { role_id: id });
        Ok(Some(role))
    }

    pub fn set_user_role(
        &mut self,
        id: UserId,
        role: impl Into<String>,
    ) -> Result<Option<User>> {
        let role = role.into();
        let Some(index) = self.users.iter().position(|user| user.id == id)
        else {
            return self.missing(EntityKind::User, id.get());
        };
        if self.policy.is_strict_validation() {
            require(EntityKind::User, "role", &role)?;
        }
        self.check_role_reference(&role)?;

        let user = &mut self.users[index];
        user.role = role;
        let updated = user.clone();

        info!(user_id = %id, role = %updated.role, "User role updated");
        self.committed(Notification::UserUpdated {
            user_id: id,
            field: UserField::Role,
        });
        Ok(Some(updated))
    }

    pub fn set_user_status(
        &mut self,
        id: UserId,
        status: UserStatus,
    ) -> Result<Option<User>> {
        let Some(user) = self.users.iter_mut().find(|user| user.id == id)
        else {
            return self.missing(EntityKind::User, id.get());
        };
        user.status = status;
        let updated = user.clone();

        info!(user_id = %id, %status, "User status updated");
        self.committed(Notification::UserUpdated {
            user_id: id,
            field: UserField::Status,
        });
        Ok(Some(updated))
    }

    fn committed(&mut self, notification: Notification) {
        self.revision += 1;
        self.notifications.push(notification);
    }

    fn missing<T>(&self, entity: EntityKind, id: u64) -> Result<Option<T>> {
        if self.policy.reports_missing_ids() {
            warn!(%entity, id, "Operation targeted a missing id");
            Err(CoreError::NotFound { entity, id })
        } else {
            debug!(%entity, id, "Ignoring operation on missing id");
            Ok(None)
        }
    }

    fn check_universe(&self, permissions: &PermissionSet) -> Result<()> {
        match permissions.iter().find(|p| !self.universe.allows(*p)) {
            Some(permission) => {
                Err(ValidationError::PermissionOutsideUniverse(permission).into())
            }
            None => Ok(()),
        }
    }

    fn check_role_reference(&self, role: &str) -> Result<()> {
        if self.policy.enforces_role_references()
            && self.role_by_name(role).is_none()
        {
            return Err(ValidationError::UnknownRole(role.to_string()).into());
        }
        Ok(())
    }
}

fn require(entity: EntityKind, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { entity, field }.into());
    }
    Ok(())
}
