use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    application::models::portal::{Portal, PortalCreate, PortalUpdate},
    error::ApiError,
    transport::http_client::HttpClient,
};

/// CRUD over the RFID portal devices.
#[async_trait]
pub trait PortalService: Send + Sync {
    async fn list_portals(&self) -> Result<Vec<Portal>, ApiError>;

    async fn get_portal(&self, portal_id: &str) -> Result<Portal, ApiError>;

    async fn create_portal(&self, portal: &PortalCreate) -> Result<Portal, ApiError>;

    async fn update_portal(
        &self,
        portal_id: &str,
        update: &PortalUpdate,
    ) -> Result<Portal, ApiError>;

    async fn delete_portal(&self, portal_id: &str) -> Result<Value, ApiError>;
}

pub struct PortalServiceImpl<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> PortalServiceImpl<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> PortalService for PortalServiceImpl<C> {
    async fn list_portals(&self) -> Result<Vec<Portal>, ApiError> {
        info!("Fetching portals");

        let portals = self
            .client
            .request::<(), Vec<Portal>>(Method::GET, "/portals", None)
            .await?;

        debug!("Fetched {} portals", portals.len());
        Ok(portals)
    }

    async fn get_portal(&self, portal_id: &str) -> Result<Portal, ApiError> {
        let path = format!("/portals/{}", portal_id);
        info!("Fetching portal: {}", portal_id);

        self.client.request::<(), Portal>(Method::GET, &path, None).await
    }

    async fn create_portal(&self, portal: &PortalCreate) -> Result<Portal, ApiError> {
        info!("Creating portal: {}", portal.portal_id);

        self.client
            .request::<PortalCreate, Portal>(Method::POST, "/portals", Some(portal))
            .await
    }

    async fn update_portal(
        &self,
        portal_id: &str,
        update: &PortalUpdate,
    ) -> Result<Portal, ApiError> {
        let path = format!("/portals/{}", portal_id);
        info!("Updating portal: {}", portal_id);

        self.client
            .request::<PortalUpdate, Portal>(Method::PUT, &path, Some(update))
            .await
    }

    async fn delete_portal(&self, portal_id: &str) -> Result<Value, ApiError> {
        let path = format!("/portals/{}", portal_id);
        info!("Deleting portal: {}", portal_id);

        self.client.request::<(), Value>(Method::DELETE, &path, None).await
    }
}
