//! Presentation focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! wiring a UI on top of the store.

pub use super::error::ModelError;
pub use super::filter_types::UserFilter;
pub use super::ids::{RoleId, UserId};
pub use super::permission::{
    PermissionSet, PermissionType, PermissionUniverse,
};
pub use super::role::{NewRole, Role};
pub use super::user::{NewUser, User, UserField, UserStatus};
