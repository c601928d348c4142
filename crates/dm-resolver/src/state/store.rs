// # Endpoint Store
//
// Mutex-guarded holder of the current endpoint set.
//
// ## Accept Policy
//
// `try_accept` is the only path by which a polled result reaches consumers:
// 1. An empty candidate is rejected. The stored set is never cleared by a
//    refresh, so a lookup hiccup cannot drop every known endpoint.
// 2. A candidate with the same members as the stored set is rejected.
// 3. Anything else replaces the stored set.
//
// The lock is a `std::sync::Mutex` and is never held across an `.await`;
// lookups happen before the lock is taken.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::endpoint::EndpointSet;

/// Result of offering a candidate set to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// The candidate replaced the stored set
    Accepted(EndpointSet),

    /// The candidate was empty; the stored set is unchanged
    RejectedEmpty,

    /// The candidate had the same members as the stored set
    RejectedUnchanged,
}

impl AcceptOutcome {
    /// Whether the stored set was replaced
    pub fn is_accepted(&self) -> bool {
        matches!(self, AcceptOutcome::Accepted(_))
    }
}

#[derive(Debug, Default)]
struct Inner {
    endpoints: EndpointSet,
    last_changed: Option<DateTime<Utc>>,
}

/// Single source of truth for the current endpoint set
#[derive(Debug, Default)]
pub struct EndpointStore {
    inner: Mutex<Inner>,
}

impl EndpointStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current endpoint set
    pub fn current_set(&self) -> EndpointSet {
        self.lock().endpoints.clone()
    }

    /// Time of the last change, `None` before anything was stored
    pub fn last_changed(&self) -> Option<DateTime<Utc>> {
        self.lock().last_changed
    }

    /// Whether the set has gone unchanged for longer than `max_age`
    ///
    /// A store that was never written is stale.
    pub fn is_stale(&self, max_age: chrono::Duration) -> bool {
        match self.last_changed() {
            Some(at) => Utc::now().signed_duration_since(at) > max_age,
            None => true,
        }
    }

    /// Replace the stored set without applying the accept policy
    ///
    /// Used for the first observation, when there is nothing to diff against.
    pub fn replace(&self, endpoints: EndpointSet) {
        let mut guard = self.lock();
        guard.endpoints = endpoints;
        guard.last_changed = Some(Utc::now());
    }

    /// Offer a freshly resolved set
    pub fn try_accept(&self, candidate: EndpointSet) -> AcceptOutcome {
        if candidate.is_empty() {
            return AcceptOutcome::RejectedEmpty;
        }

        let mut guard = self.lock();
        if guard.endpoints == candidate {
            return AcceptOutcome::RejectedUnchanged;
        }

        guard.endpoints = candidate.clone();
        guard.last_changed = Some(Utc::now());
        AcceptOutcome::Accepted(candidate)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave the set half-written
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(endpoints: &[&str]) -> EndpointSet {
        endpoints.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn new_store_is_empty_and_stale() {
        let store = EndpointStore::new();
        assert!(store.current_set().is_empty());
        assert_eq!(store.last_changed(), None);
        assert!(store.is_stale(chrono::Duration::days(365)));
    }

    #[test]
    fn replace_bypasses_policy() {
        let store = EndpointStore::new();
        store.replace(EndpointSet::new());
        assert!(store.current_set().is_empty());
        assert!(store.last_changed().is_some());
    }

    #[test]
    fn first_non_empty_candidate_is_accepted() {
        let store = EndpointStore::new();
        let outcome = store.try_accept(set(&["2.2.2.2:443", "1.1.1.1:443"]));

        assert_eq!(
            outcome,
            AcceptOutcome::Accepted(set(&["1.1.1.1:443", "2.2.2.2:443"]))
        );
        assert_eq!(store.current_set(), ["1.1.1.1:443", "2.2.2.2:443"]);
    }

    #[test]
    fn empty_candidate_never_clears_the_set() {
        let store = EndpointStore::new();
        store.replace(set(&["1.1.1.1:443"]));
        let changed_at = store.last_changed();

        assert_eq!(store.try_accept(EndpointSet::new()), AcceptOutcome::RejectedEmpty);
        assert_eq!(store.current_set(), ["1.1.1.1:443"]);
        assert_eq!(store.last_changed(), changed_at);
    }

    #[test]
    fn same_members_in_other_order_is_unchanged() {
        let store = EndpointStore::new();
        store.replace(set(&["1.1.1.1:443", "2.2.2.2:443"]));

        let outcome = store.try_accept(set(&["2.2.2.2:443", "1.1.1.1:443"]));
        assert_eq!(outcome, AcceptOutcome::RejectedUnchanged);
        assert!(!outcome.is_accepted());
    }

    #[test]
    fn changed_members_replace_the_set() {
        let store = EndpointStore::new();
        store.replace(set(&["1.1.1.1:443", "2.2.2.2:443"]));

        let outcome = store.try_accept(set(&["3.3.3.3:443", "2.2.2.2:443"]));
        assert!(outcome.is_accepted());
        assert_eq!(store.current_set(), ["2.2.2.2:443", "3.3.3.3:443"]);
        assert!(!store.is_stale(chrono::Duration::minutes(1)));
    }

    #[test]
    fn subset_is_a_change() {
        let store = EndpointStore::new();
        store.replace(set(&["1.1.1.1:443", "2.2.2.2:443"]));

        assert!(store.try_accept(set(&["1.1.1.1:443"])).is_accepted());
        assert_eq!(store.current_set(), ["1.1.1.1:443"]);
    }
}
