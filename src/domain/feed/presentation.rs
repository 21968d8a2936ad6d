use super::model::SelectionResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Layout hint carried through to the client untouched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    List,
    Grid,
    Compact,
}

/// Caller-supplied shaping options for a selection.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub limit: Option<usize>,
    pub show_thumbnail: bool,
    pub show_excerpt: bool,
    pub show_date: bool,
    pub layout: Layout,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            limit: None,
            show_thumbnail: true,
            show_excerpt: true,
            show_date: true,
            layout: Layout::List,
        }
    }
}

/// Display-ready projection of one catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayItem {
    pub id: i64,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub layout: Layout,
}

/// Shape a selection for display: truncate to the requested limit and
/// blank out the fields the caller does not want rendered. Which items
/// appear was already decided by the selector; nothing is chosen here.
pub fn adapt(selection: &SelectionResult, options: &DisplayOptions) -> Vec<DisplayItem> {
    let take = options.limit.unwrap_or(selection.items.len());

    selection
        .items
        .iter()
        .take(take)
        .map(|item| DisplayItem {
            id: item.id,
            label: item.label.clone(),
            url: item.url.clone(),
            thumbnail_url: if options.show_thumbnail {
                item.thumbnail_url.clone()
            } else {
                None
            },
            excerpt: if options.show_excerpt {
                item.excerpt.clone()
            } else {
                None
            },
            published_at: if options.show_date {
                item.published_at
            } else {
                None
            },
            layout: options.layout,
        })
        .collect()
}
