use std::fmt;

use rolekeeper_model::{ModelError, PermissionType, UserField, UserId};
use thiserror::Error;

/// Which collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Role,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => f.write_str("user"),
            EntityKind::Role => f.write_str("role"),
        }
    }
}

/// Rejected input. Only raised when the store policy asks for it, except for
/// the permission-universe check which always applies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{entity} {field} cannot be empty")]
    EmptyField {
        entity: EntityKind,
        field: &'static str,
    },

    #[error("permission {0} is not part of this store's permission universe")]
    PermissionOutsideUniverse(PermissionType),

    #[error("role {0:?} does not exist")]
    UnknownRole(String),

    #[error("a role named {0:?} already exists")]
    DuplicateRoleName(String),

    #[error("duplicate {entity} id {id}")]
    DuplicateId { entity: EntityKind, id: u64 },
}

/// Misuse of the inline edit session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no field is being edited")]
    NotEditing,

    #[error(
        "editing {active_field} of user {active_user}, not {requested_field} of user {requested_user}"
    )]
    SessionMismatch {
        active_user: UserId,
        active_field: UserField,
        requested_user: UserId,
        requested_field: UserField,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: u64 },

    #[error("edit session error: {0}")]
    Edit(#[from] EditError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl CoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
