//! Stable filtering of the user collection.
//!
//! A user is kept when every active criterion of the [`UserFilter`] holds:
//!
//! - `search`: case-insensitive substring of `name` or `email`
//! - `role`: exact, case-sensitive match on `User::role`
//! - `status`: exact match on `User::status`
//!
//! Source order is preserved and nothing is mutated.

use rolekeeper_model::{User, UserFilter, UserId};

/// Filter criteria with the search needle lowered once per query.
#[derive(Debug, Clone)]
struct Matcher<'f> {
    needle: Option<String>,
    filter: &'f UserFilter,
}

impl<'f> Matcher<'f> {
    fn new(filter: &'f UserFilter) -> Self {
        let needle = (!filter.search.is_empty())
            .then(|| filter.search.to_lowercase());
        Self { needle, filter }
    }

    fn matches(&self, user: &User) -> bool {
        if let Some(needle) = &self.needle
            && !user.name.to_lowercase().contains(needle.as_str())
            && !user.email.to_lowercase().contains(needle.as_str())
        {
            return false;
        }

        if let Some(role) = self.filter.role()
            && user.role != role
        {
            return false;
        }

        match self.filter.status {
            Some(status) => user.status == status,
            None => true,
        }
    }
}

/// Whether a single user satisfies `filter`.
pub fn matches(user: &User, filter: &UserFilter) -> bool {
    Matcher::new(filter).matches(user)
}

/// Positions in `users` that satisfy `filter`, ascending.
pub fn matching_indices(users: &[User], filter: &UserFilter) -> Vec<usize> {
    let matcher = Matcher::new(filter);
    users
        .iter()
        .enumerate()
        .filter(|(_, user)| matcher.matches(user))
        .map(|(index, _)| index)
        .collect()
}

/// Filter `users` into a borrowed view.
pub fn filter_users<'a>(users: &'a [User], filter: &UserFilter) -> UserView<'a> {
    let matcher = Matcher::new(filter);
    UserView {
        users: users.iter().filter(|user| matcher.matches(user)).collect(),
        filtered: filter.is_active(),
    }
}

/// Users selected for display.
///
/// Distinguishes "no criteria" from "criteria matched nothing" so the caller
/// can render an explicit empty state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView<'a> {
    pub(crate) users: Vec<&'a User>,
    pub(crate) filtered: bool,
}

impl<'a> UserView<'a> {
    pub fn users(&self) -> &[&'a User] {
        &self.users
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a User> + '_ {
        self.users.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Whether any criterion was applied.
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Criteria were applied and nothing matched.
    pub fn is_empty_match(&self) -> bool {
        self.filtered && self.users.is_empty()
    }

    pub fn ids(&self) -> Vec<UserId> {
        self.users.iter().map(|user| user.id).collect()
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.users.iter().map(|user| user.name.as_str()).collect()
    }

    pub fn to_owned_users(&self) -> Vec<User> {
        self.users.iter().map(|user| (*user).clone()).collect()
    }
}
