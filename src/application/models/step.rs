use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A process step of the textile line (washing, drying, ironing, ...).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Step {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub step_id: i64,
    pub step_name: String,
    pub reader_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StepsResponse {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepCreate {
    pub step_id: i64,
    pub step_name: String,
    pub reader_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StepUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reader_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepDeleteResponse {
    pub deleted_count: u64,
}
