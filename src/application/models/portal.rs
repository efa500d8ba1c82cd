use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalStatus {
    Active,
    Inactive,
    Maintenance,
}

/// A fixed RFID reader gate on the production line.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Portal {
    pub portal_id: String,
    pub name: String,
    pub location: String,
    pub step_id: i64,
    pub ip_address: String,
    pub port: u16,
    pub status: PortalStatus,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_datetime")]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortalCreate {
    pub portal_id: String,
    pub name: String,
    pub location: String,
    pub step_id: i64,
    pub ip_address: String,
    pub port: u16,
    pub status: PortalStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PortalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PortalStatus>,
}
