use std::fmt;

/// Strongly typed identifier for users.
///
/// Assigned by the entity store from a monotonic sequence; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserId(pub u64);

impl UserId {
    pub const fn new(raw: u64) -> Self {
        UserId(raw)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(raw: u64) -> Self {
        UserId(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed identifier for roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoleId(pub u64);

impl RoleId {
    pub const fn new(raw: u64) -> Self {
        RoleId(raw)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RoleId {
    fn from(raw: u64) -> Self {
        RoleId(raw)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
