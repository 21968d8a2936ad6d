use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// A named bucket of user-selected item IDs.
///
/// Each category is stored as its own row per user; an absent row reads
/// back as the empty set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceCategory {
    /// Taxonomy terms the user wants in their news feed
    NewsCategories,
    /// External system links the user pinned to their start page
    SelectedSystems,
    /// Posts and pages the user marked as favorites
    FavoritePosts,
}

impl PreferenceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewsCategories => "news_categories",
            Self::SelectedSystems => "selected_systems",
            Self::FavoritePosts => "favorite_posts",
        }
    }
}

impl std::fmt::Display for PreferenceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PreferenceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news_categories" => Ok(Self::NewsCategories),
            "selected_systems" => Ok(Self::SelectedSystems),
            "favorite_posts" => Ok(Self::FavoritePosts),
            other => Err(format!("Unknown preference category: {}", other)),
        }
    }
}

/// Clean a raw JSON array into a set of positive item IDs.
///
/// Numbers and numeric strings are coerced; everything else is dropped,
/// as are zero and negative values. Duplicates collapse via the set.
/// Malformed entries never produce an error - the permissive behavior is
/// intentional and load-bearing for old clients.
pub fn sanitize_ids(raw: &[serde_json::Value]) -> BTreeSet<i64> {
    raw.iter()
        .filter_map(|value| match value {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
        .filter(|id| *id > 0)
        .collect()
}
