use std::fmt;

use crate::error::ModelError;
use crate::ids::UserId;

/// Whether a user account is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn all() -> &'static [UserStatus] {
        &[UserStatus::Active, UserStatus::Inactive]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, UserStatus::Active)
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Status values are compared exactly, so parsing is case-sensitive too.
impl std::str::FromStr for UserStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(ModelError::InvalidStatus(s.to_string())),
        }
    }
}

/// A user record as held by the entity store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    /// Store-assigned identifier, stable for the record's lifetime
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Name of the role this user holds. Matched against `Role::name` by value.
    pub role: String,
    pub status: UserStatus,
}

impl User {
    pub(crate) fn from_candidate(id: UserId, candidate: NewUser) -> Self {
        let NewUser {
            name,
            email,
            role,
            status,
        } = candidate;
        Self {
            id,
            name,
            email,
            role,
            status,
        }
    }
}

/// Candidate for a user that does not have an id yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        status: UserStatus,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
            status,
        }
    }

    /// Attach an id, producing the stored record.
    pub fn into_user(self, id: UserId) -> User {
        User::from_candidate(id, self)
    }
}

/// User fields that can be edited inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UserField {
    Role,
    Status,
}

impl UserField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserField::Role => "role",
            UserField::Status => "status",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "role" => Ok(UserField::Role),
            "status" => Ok(UserField::Status),
            _ => Err(ModelError::InvalidField(s.to_string())),
        }
    }
}
