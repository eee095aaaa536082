use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id generator.
///
/// Hands out `max seen + 1`, so ids freed by a delete are never reissued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    /// Sequence whose first id is `last + 1`.
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    /// Raise the floor so future ids stay above `id`.
    pub fn observe(&mut self, id: u64) {
        self.last = self.last.max(id);
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    pub fn last(&self) -> u64 {
        self.last
    }
}

static NEXT_STORE_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Process-wide identity of one store instance.
///
/// Every store, and every clone of one, gets a distinct token, so cached
/// query results can tell two stores at the same revision apart.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct StoreToken(u64);

impl StoreToken {
    pub(crate) fn get(&self) -> u64 {
        self.0
    }
}

impl Default for StoreToken {
    fn default() -> Self {
        StoreToken(NEXT_STORE_TOKEN.fetch_add(1, Ordering::Relaxed))
    }
}

impl Clone for StoreToken {
    fn clone(&self) -> Self {
        Self::default()
    }
}
