use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last known state of an article, joined with its description
/// (`GET /inventory`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InventoryItem {
    pub uuid: String,
    pub status: String,
    #[serde(deserialize_with = "crate::utils::time::deserialize_datetime")]
    pub last_seen: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub article_type: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

/// Flat inventory row (`GET /inventory/list`, optionally filtered by step).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InventoryEntry {
    pub reference: String,
    pub uuid: String,
    pub step_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InventoryListResponse {
    pub inventory: Vec<InventoryEntry>,
}
