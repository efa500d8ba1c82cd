use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dashboard user as returned by the auth service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub uuid: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Body for registration and user updates. The backend hashes
/// `password_hash` again server-side, so callers pass the raw secret here.
#[derive(Debug, Clone, Serialize)]
pub struct UserPayload {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password_hash: String,
}

/// `POST /auth/login` reply. On bad credentials the backend still answers
/// 200 with only `message` set, so everything but the message is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// A role with its permission grants.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Role {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "crate::utils::time::deserialize_opt_datetime")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleCreate {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// One entry of the fixed permission catalog (`GET /permissions`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Permission {
    pub name: String,
    pub description: String,
    pub category: String,
}
