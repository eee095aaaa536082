use rolekeeper_model::UserFilter;
use tracing::trace;

use super::filtering::{UserView, matching_indices};
use crate::store::EntityStore;

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryKey {
    store: u64,
    revision: u64,
    filter: UserFilter,
}

/// Memoized user query.
///
/// Caches the matching positions for one `(store, revision, filter)` triple
/// and recomputes whenever any of them changes. Any store mutation bumps the
/// revision and every store instance, clones included, carries its own token,
/// so cached positions are never read against a different collection.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    key: Option<QueryKey>,
    indices: Vec<usize>,
    recomputations: u64,
}

impl UserQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate<'s>(
        &mut self,
        store: &'s EntityStore,
        filter: &UserFilter,
    ) -> UserView<'s> {
        let fresh = self.key.as_ref().is_some_and(|key| {
            key.store == store.token()
                && key.revision == store.revision()
                && &key.filter == filter
        });

        if !fresh {
            self.indices = matching_indices(store.users(), filter);
            self.key = Some(QueryKey {
                store: store.token(),
                revision: store.revision(),
                filter: filter.clone(),
            });
            self.recomputations += 1;
            trace!(
                revision = store.revision(),
                matched = self.indices.len(),
                "User query recomputed"
            );
        }

        let users = store.users();
        UserView {
            users: self
                .indices
                .iter()
                .filter_map(|&index| users.get(index))
                .collect(),
            filtered: filter.is_active(),
        }
    }

    /// Drop the cached result.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.indices.clear();
    }

    /// How many times the filter actually ran.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
