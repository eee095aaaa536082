//! Read-only queries over the user collection.

pub mod filtering;
mod memo;

pub use filtering::{UserView, filter_users, matches, matching_indices};
pub use memo::UserQuery;
