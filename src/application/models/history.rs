use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the full scan log, newest first.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoricEntry {
    pub uuid: String,
    pub step: String,
    #[serde(deserialize_with = "crate::utils::time::deserialize_datetime")]
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoricResponse {
    pub historic: Vec<HistoricEntry>,
}

/// Latest known position of an article, as aggregated for the dashboard.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardArticle {
    pub uuid: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub latest_step_id: Option<i64>,
    #[serde(default)]
    pub latest_step_name: Option<String>,
    #[serde(deserialize_with = "crate::utils::time::deserialize_datetime")]
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardResponse {
    pub total: u64,
    pub articles: Vec<DashboardArticle>,
}
