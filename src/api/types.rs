//! Request and response bodies of the JSON API
//!
//! Field names follow the wire format the browser UI already speaks
//! (`searchURL`, `columnIndex`, `setIndex`). Indices are signed on the wire;
//! negative values are rejected as out of range, not as malformed JSON.

use crate::store::Slot;
use serde::{Deserialize, Serialize};

/// `POST /api/`: run a query and save it into a column
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(rename = "searchURL", alias = "searchUrl")]
    pub search_url: String,

    #[serde(default)]
    pub column_index: i64,

    #[serde(default)]
    pub set_index: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Extracted (or degraded) result fragment
    pub response: String,

    pub urls: Vec<Slot>,
}

/// `DELETE /api/`: remove one column from a set
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUrlRequest {
    #[serde(default)]
    pub set_index: i64,

    #[serde(default)]
    pub column_index: i64,
}

/// `PUT /api/`: append an unset column to a set
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUrlRequest {
    #[serde(default)]
    pub set_index: i64,
}

/// `POST /api/{setIndex}`: rename a set (the path carries the index)
#[derive(Debug, Clone, Deserialize)]
pub struct RenameUrlSetRequest {
    pub name: String,
}

/// Slots of one set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlSetResponse {
    pub urls: Vec<Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
