//! Session establishment.
//!
//! The backend manages sessions through HttpOnly cookies set on login and
//! renewed by the refresh endpoint. This module only issues the calls; the
//! credentials themselves never pass through application code. Renewal on a
//! 401 is handled inside the client, see
//! [`crate::transport::http_client::ApiClient`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use crate::{
    application::models::user::{LoginRequest, LoginResponse, RegisterResponse, User, UserPayload},
    error::ApiError,
    transport::http_client::HttpClient,
};

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges credentials for a session. On success the backend sets the
    /// session cookies on the response; the body only carries a message and
    /// the user profile.
    async fn login(&self, email: &str, password_hash: &str) -> Result<LoginResponse, ApiError>;

    async fn register(&self, user: &UserPayload) -> Result<RegisterResponse, ApiError>;

    /// Profile of the session's user. A 401 here, after the client's single
    /// renewal attempt, means the caller should show the login page.
    async fn current_user(&self) -> Result<User, ApiError>;
}

pub struct AuthServiceImpl<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> AuthServiceImpl<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> AuthService for AuthServiceImpl<C> {
    async fn login(&self, email: &str, password_hash: &str) -> Result<LoginResponse, ApiError> {
        info!("Logging in: {}", email);

        let request = LoginRequest {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };

        self.client
            .request::<LoginRequest, LoginResponse>(Method::POST, "/auth/login", Some(&request))
            .await
    }

    async fn register(&self, user: &UserPayload) -> Result<RegisterResponse, ApiError> {
        info!("Registering user: {}", user.email);

        self.client
            .request::<UserPayload, RegisterResponse>(Method::POST, "/auth/register", Some(user))
            .await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.client
            .request::<(), User>(Method::GET, "/auth/users/me", None)
            .await
    }
}
