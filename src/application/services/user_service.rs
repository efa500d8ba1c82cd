use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    application::models::user::{Permission, Role, RoleCreate, RoleUpdate, User, UserPayload},
    error::ApiError,
    transport::http_client::HttpClient,
};

/// User and role administration for the settings page.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    async fn list_roles(&self) -> Result<Vec<Role>, ApiError>;

    async fn get_role(&self, role_id: &str) -> Result<Role, ApiError>;

    async fn create_role(&self, role: &RoleCreate) -> Result<Role, ApiError>;

    async fn update_role(&self, role_id: &str, update: &RoleUpdate) -> Result<Role, ApiError>;

    /// Rejected with a 400 by the backend while the role is still assigned
    /// to a user.
    async fn delete_role(&self, role_id: &str) -> Result<Value, ApiError>;

    /// The fixed catalog of grantable permissions.
    async fn list_permissions(&self) -> Result<Vec<Permission>, ApiError>;

    async fn get_user_info(&self, uuid: &str) -> Result<User, ApiError>;

    /// Full-document update; the backend replaces every field it is given.
    async fn update_user(&self, uuid: &str, user: &UserPayload) -> Result<Value, ApiError>;

    async fn delete_user(&self, uuid: &str) -> Result<Value, ApiError>;
}

pub struct UserServiceImpl<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> UserServiceImpl<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> UserService for UserServiceImpl<C> {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        info!("Fetching users");

        let users = self
            .client
            .request::<(), Vec<User>>(Method::GET, "/users", None)
            .await?;

        debug!("Fetched {} users", users.len());
        Ok(users)
    }

    async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        info!("Fetching roles");

        self.client
            .request::<(), Vec<Role>>(Method::GET, "/roles", None)
            .await
    }

    async fn get_role(&self, role_id: &str) -> Result<Role, ApiError> {
        let path = format!("/roles/{}", role_id);
        info!("Fetching role: {}", role_id);

        self.client.request::<(), Role>(Method::GET, &path, None).await
    }

    async fn create_role(&self, role: &RoleCreate) -> Result<Role, ApiError> {
        info!("Creating role: {}", role.name);

        self.client
            .request::<RoleCreate, Role>(Method::POST, "/roles", Some(role))
            .await
    }

    async fn update_role(&self, role_id: &str, update: &RoleUpdate) -> Result<Role, ApiError> {
        let path = format!("/roles/{}", role_id);
        info!("Updating role: {}", role_id);

        self.client
            .request::<RoleUpdate, Role>(Method::PUT, &path, Some(update))
            .await
    }

    async fn delete_role(&self, role_id: &str) -> Result<Value, ApiError> {
        let path = format!("/roles/{}", role_id);
        info!("Deleting role: {}", role_id);

        self.client.request::<(), Value>(Method::DELETE, &path, None).await
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>, ApiError> {
        info!("Fetching permission catalog");

        self.client
            .request::<(), Vec<Permission>>(Method::GET, "/permissions", None)
            .await
    }

    async fn get_user_info(&self, uuid: &str) -> Result<User, ApiError> {
        let path = format!("/auth/users/info/{}", uuid);
        info!("Fetching user info: {}", uuid);

        self.client.request::<(), User>(Method::GET, &path, None).await
    }

    async fn update_user(&self, uuid: &str, user: &UserPayload) -> Result<Value, ApiError> {
        let path = format!("/auth/users/{}", uuid);
        info!("Updating user: {}", uuid);

        self.client
            .request::<UserPayload, Value>(Method::PUT, &path, Some(user))
            .await
    }

    async fn delete_user(&self, uuid: &str) -> Result<Value, ApiError> {
        let path = format!("/auth/users/{}", uuid);
        info!("Deleting user: {}", uuid);

        self.client.request::<(), Value>(Method::DELETE, &path, None).await
    }
}
