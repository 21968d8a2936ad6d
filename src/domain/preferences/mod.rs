pub mod error;
pub mod model;
pub mod service;

pub use error::PreferenceServiceError;
pub use model::{sanitize_ids, PreferenceCategory};
pub use service::{PreferenceService, PreferenceServiceApi};

use serde::{Deserialize, Serialize};

/// Response for preference endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub category: PreferenceCategory,
    pub values: Vec<i64>,
}

/// Request to replace a user's stored selection for one category.
///
/// `values` is raw JSON on purpose: clients historically sent mixed
/// arrays (numbers, numeric strings, junk) and the server cleans them
/// up instead of rejecting the request.
#[derive(Debug, Serialize, Deserialize)]
pub struct SavePreferencesRequest {
    pub values: Vec<serde_json::Value>,
}
