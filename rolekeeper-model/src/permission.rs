//! Permission types and the sets built from them.
//!
//! The permission vocabulary is closed: every role's permission set is a
//! subset of [`PermissionType::all`], further narrowed by the
//! [`PermissionUniverse`] a store is initialized with.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::ModelError;

/// A single CRUD capability that can belong to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PermissionType {
    Create,
    Read,
    Update,
    Delete,
}

impl PermissionType {
    /// Every permission, in display order.
    pub fn all() -> &'static [PermissionType] {
        use PermissionType::*;
        &[Create, Read, Update, Delete]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionType::Create => "create",
            PermissionType::Read => "read",
            PermissionType::Update => "update",
            PermissionType::Delete => "delete",
        }
    }
}

impl fmt::Display for PermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PermissionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(PermissionType::Create),
            "read" => Ok(PermissionType::Read),
            "update" => Ok(PermissionType::Update),
            "delete" => Ok(PermissionType::Delete),
            _ => Err(ModelError::InvalidPermission(s.to_string())),
        }
    }
}

/// Duplicate-free set of permissions held by a role.
///
/// Membership is all that matters; iteration follows [`PermissionType`]'s
/// declaration order regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PermissionSet(BTreeSet<PermissionType>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set containing every permission type.
    pub fn full() -> Self {
        PermissionType::all().iter().copied().collect()
    }

    pub fn contains(&self, permission: PermissionType) -> bool {
        self.0.contains(&permission)
    }

    /// Returns `true` if the permission was not already present.
    pub fn insert(&mut self, permission: PermissionType) -> bool {
        self.0.insert(permission)
    }

    /// Returns `true` if the permission was present.
    pub fn remove(&mut self, permission: PermissionType) -> bool {
        self.0.remove(&permission)
    }

    /// Copy of this set with `permission`'s membership flipped.
    pub fn toggled(&self, permission: PermissionType) -> Self {
        let mut next = self.clone();
        if !next.remove(permission) {
            next.insert(permission);
        }
        next
    }

    pub fn is_subset_of(&self, universe: &PermissionUniverse) -> bool {
        self.0.iter().all(|p| universe.allows(*p))
    }

    pub fn iter(&self) -> impl Iterator<Item = PermissionType> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PermissionType> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = PermissionType>>(iter: I) -> Self {
        PermissionSet(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[PermissionType; N]> for PermissionSet {
    fn from(permissions: [PermissionType; N]) -> Self {
        permissions.into_iter().collect()
    }
}

impl From<Vec<PermissionType>> for PermissionSet {
    fn from(permissions: Vec<PermissionType>) -> Self {
        permissions.into_iter().collect()
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|p| p.as_str()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// The fixed set of permissions a store accepts.
///
/// Supplied once when a store is built and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PermissionUniverse(PermissionSet);

impl Default for PermissionUniverse {
    fn default() -> Self {
        PermissionUniverse(PermissionSet::full())
    }
}

impl PermissionUniverse {
    pub fn new(permissions: impl Into<PermissionSet>) -> Self {
        PermissionUniverse(permissions.into())
    }

    pub fn allows(&self, permission: PermissionType) -> bool {
        self.0.contains(permission)
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = PermissionType> + '_ {
        self.0.iter()
    }
}
