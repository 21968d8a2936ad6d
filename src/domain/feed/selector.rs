use super::model::{CatalogItem, FallbackPolicy, SelectionResult};
use std::collections::BTreeSet;

/// Decide which catalog items a user gets to see.
///
/// With a non-empty preference set the result is the catalog filtered to
/// matching items, in catalog order. With an empty set the fallback
/// policy applies: `all` keeps the whole catalog, `none` returns nothing,
/// `latest` takes the newest `limit` items by publication date.
///
/// An item matches when its own ID is in the set or any of its taxonomy
/// terms is; preference IDs that no longer exist in the catalog are
/// silently dropped. Pure and deterministic.
pub fn select(
    preferences: &BTreeSet<i64>,
    catalog: &[CatalogItem],
    policy: FallbackPolicy,
    limit: Option<usize>,
) -> SelectionResult {
    if !preferences.is_empty() {
        let mut items: Vec<CatalogItem> = catalog
            .iter()
            .filter(|item| matches(item, preferences))
            .cloned()
            .collect();
        truncate(&mut items, limit);

        return SelectionResult {
            items,
            is_personalized: true,
            policy,
        };
    }

    let mut items = match policy {
        FallbackPolicy::All => catalog.to_vec(),
        FallbackPolicy::None => Vec::new(),
        FallbackPolicy::Latest => {
            let mut by_date = catalog.to_vec();
            // Newest first; undated items sink to the end
            by_date.sort_by(|a, b| b.published_at.cmp(&a.published_at));
            by_date
        }
    };
    truncate(&mut items, limit);

    SelectionResult {
        items,
        is_personalized: false,
        policy,
    }
}

fn matches(item: &CatalogItem, preferences: &BTreeSet<i64>) -> bool {
    preferences.contains(&item.id) || item.term_ids.iter().any(|term| preferences.contains(term))
}

fn truncate(items: &mut Vec<CatalogItem>, limit: Option<usize>) {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn catalog(ids: &[i64]) -> Vec<CatalogItem> {
        ids.iter()
            .map(|id| CatalogItem::new(*id, format!("Item {}", id)))
            .collect()
    }

    fn ids(result: &SelectionResult) -> Vec<i64> {
        result.items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn test_personalized_selection_preserves_catalog_order() {
        let preferences = BTreeSet::from([3, 7]);
        let catalog = catalog(&[1, 3, 5, 7, 9]);

        let result = select(&preferences, &catalog, FallbackPolicy::All, None);

        assert_eq!(ids(&result), vec![3, 7]);
        assert!(result.is_personalized);
    }

    #[test]
    fn test_stale_preference_ids_are_dropped() {
        let preferences = BTreeSet::from([5, 9]);
        let catalog = catalog(&[5]);

        let result = select(&preferences, &catalog, FallbackPolicy::All, None);

        assert_eq!(ids(&result), vec![5]);
        assert!(result.is_personalized);
    }

    #[test]
    fn test_personalized_result_never_leaves_the_catalog() {
        let preferences = BTreeSet::from([2, 4, 6, 8]);
        let catalog = catalog(&[1, 2, 3, 4]);

        let result = select(&preferences, &catalog, FallbackPolicy::None, None);

        for item in &result.items {
            assert!(catalog.iter().any(|c| c.id == item.id));
        }
        assert_eq!(ids(&result), vec![2, 4]);
    }

    #[test]
    fn test_empty_preferences_with_policy_all_returns_full_catalog() {
        let preferences = BTreeSet::new();
        let catalog = catalog(&[4, 2, 8]);

        let result = select(&preferences, &catalog, FallbackPolicy::All, None);

        assert_eq!(ids(&result), vec![4, 2, 8]);
        assert!(!result.is_personalized);
        assert_eq!(result.policy, FallbackPolicy::All);
    }

    #[test]
    fn test_empty_preferences_with_policy_none_returns_nothing() {
        let preferences = BTreeSet::new();
        let catalog = catalog(&[1, 2, 3]);

        let result = select(&preferences, &catalog, FallbackPolicy::None, None);

        assert!(result.items.is_empty());
        assert!(!result.is_personalized);
    }

    #[test]
    fn test_latest_policy_orders_by_publication_date() {
        let preferences = BTreeSet::new();
        let mut catalog = catalog(&[1, 2, 3, 4]);
        catalog[0].published_at = Some(Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap());
        catalog[1].published_at = Some(Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap());
        catalog[2].published_at = Some(Utc.with_ymd_and_hms(2026, 2, 14, 8, 0, 0).unwrap());
        // item 4 has no date and must sort last

        let result = select(&preferences, &catalog, FallbackPolicy::Latest, Some(3));

        assert_eq!(ids(&result), vec![2, 3, 1]);
        assert!(!result.is_personalized);
    }

    #[test]
    fn test_limit_truncates_every_branch() {
        let preferences = BTreeSet::from([1, 2, 3]);
        let catalog = catalog(&[1, 2, 3]);

        let personalized = select(&preferences, &catalog, FallbackPolicy::All, Some(2));
        assert_eq!(ids(&personalized), vec![1, 2]);

        let fallback = select(&BTreeSet::new(), &catalog, FallbackPolicy::All, Some(1));
        assert_eq!(ids(&fallback), vec![1]);
    }

    #[test]
    fn test_post_matches_by_taxonomy_term() {
        let preferences = BTreeSet::from([30]);
        let mut catalog = catalog(&[100, 101, 102]);
        catalog[0].term_ids = vec![10, 30];
        catalog[1].term_ids = vec![20];
        catalog[2].term_ids = vec![30];

        let result = select(&preferences, &catalog, FallbackPolicy::All, None);

        assert_eq!(ids(&result), vec![100, 102]);
        assert!(result.is_personalized);
    }

    #[test]
    fn test_empty_catalog_is_not_an_error() {
        let preferences = BTreeSet::from([1]);
        let result = select(&preferences, &[], FallbackPolicy::All, None);
        assert!(result.items.is_empty());
        assert!(result.is_personalized);
    }

    #[test]
    fn test_select_is_deterministic() {
        let preferences = BTreeSet::from([2, 9]);
        let catalog = catalog(&[9, 5, 2, 7]);

        let first = select(&preferences, &catalog, FallbackPolicy::Latest, Some(5));
        let second = select(&preferences, &catalog, FallbackPolicy::Latest, Some(5));

        assert_eq!(first, second);
    }
}
