use crate::domain::preferences::PreferenceCategory;
use crate::error::AppResult;
use async_trait::async_trait;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Storage for per-user preference sets, one row per (user, category).
///
/// Implementations are responsible for:
/// - Returning the empty set for users who never saved anything
/// - Replacing the stored set atomically on save
/// - Serializing read-modify-write for `toggle` per (user, category) key,
///   so that two near-simultaneous toggles cannot lose an update
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Read the stored set. A missing row is the empty set, not an error.
    async fn get(&self, user_id: Uuid, category: PreferenceCategory)
        -> AppResult<BTreeSet<i64>>;

    /// Replace the stored set wholesale. Partial updates are not
    /// supported; callers wanting merge semantics must read first.
    async fn replace(
        &self,
        user_id: Uuid,
        category: PreferenceCategory,
        values: &BTreeSet<i64>,
    ) -> AppResult<()>;

    /// Flip membership of `item_id` in the stored set and return the new
    /// membership state together with the post-toggle cardinality.
    async fn toggle(
        &self,
        user_id: Uuid,
        category: PreferenceCategory,
        item_id: i64,
    ) -> AppResult<(bool, u64)>;
}

/// Pure membership flip shared by every backend.
///
/// Self-inverse: applying it twice with the same item restores the set.
pub fn apply_toggle(set: &mut BTreeSet<i64>, item_id: i64) -> bool {
    if set.remove(&item_id) {
        false
    } else {
        set.insert(item_id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_when_absent() {
        let mut set = BTreeSet::from([3]);
        assert!(apply_toggle(&mut set, 7));
        assert_eq!(set, BTreeSet::from([3, 7]));
    }

    #[test]
    fn test_toggle_removes_when_present() {
        let mut set = BTreeSet::from([3, 7]);
        assert!(!apply_toggle(&mut set, 7));
        assert_eq!(set, BTreeSet::from([3]));
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let original = BTreeSet::from([1, 5, 9]);
        let mut set = original.clone();

        let first = apply_toggle(&mut set, 5);
        let second = apply_toggle(&mut set, 5);

        assert_ne!(first, second);
        assert_eq!(set, original);
    }
}
