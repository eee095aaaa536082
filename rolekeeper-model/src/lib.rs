//! Core data model definitions shared across Rolekeeper crates.
#![allow(missing_docs)]

pub mod error;
pub mod filter_types;
pub mod ids;
pub mod permission;
pub mod prelude;
pub mod role;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use filter_types::UserFilter;
pub use ids::{RoleId, UserId};
pub use permission::{PermissionSet, PermissionType, PermissionUniverse};
pub use role::{NewRole, Role};
pub use user::{NewUser, User, UserField, UserStatus};
