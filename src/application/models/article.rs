use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A textile article as stored by the backend. The tracking fields at the
/// bottom reflect the last RFID scan merged into the document, when any.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Article {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub article_type: String,
    pub color: String,
    pub size: String,
    pub material: String,
    pub washing_time_min: u32,
    pub drying_time_min: u32,
    pub pre_treatment: String,
    pub care_label: String,
    pub dispatch_zone: String,
    pub quality_requirements: String,
    pub notes: String,
    #[serde(default)]
    pub sales_price_ron: Option<f64>,
    #[serde(default)]
    pub length_cm: Option<f64>,
    // Wire name kept as the backend spells it.
    #[serde(rename = "hight_cm", default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub step_id: Option<i64>,
    #[serde(default)]
    pub step_name: Option<String>,
    #[serde(default)]
    pub reader_type: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_datetime")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// One RFID scan of an article at a process step.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RfidEvent {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub step_id: Option<i64>,
    #[serde(default)]
    pub step_name: Option<String>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_datetime")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reader_type: Option<String>,
    #[serde(default = "default_operator")]
    pub operator: String,
}

fn default_operator() -> String {
    "Unknown".to_string()
}
