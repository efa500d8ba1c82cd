use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info};

use crate::{
    application::models::inventory::{InventoryItem, InventoryListResponse},
    error::ApiError,
    transport::http_client::HttpClient,
};

/// Current stock views derived from the latest scan of each article.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Last known state of every article, joined with its description.
    async fn get_inventory(&self) -> Result<Vec<InventoryItem>, ApiError>;

    /// Flat inventory rows for the table view.
    async fn list_inventory(&self) -> Result<InventoryListResponse, ApiError>;

    /// Inventory rows restricted to one process step.
    async fn list_inventory_by_step(
        &self,
        step_name: &str,
    ) -> Result<InventoryListResponse, ApiError>;
}

pub struct InventoryServiceImpl<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> InventoryServiceImpl<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> InventoryService for InventoryServiceImpl<C> {
    async fn get_inventory(&self) -> Result<Vec<InventoryItem>, ApiError> {
        info!("Fetching inventory state");

        let items = self
            .client
            .request::<(), Vec<InventoryItem>>(Method::GET, "/inventory", None)
            .await?;

        debug!("Fetched {} inventory items", items.len());
        Ok(items)
    }

    async fn list_inventory(&self) -> Result<InventoryListResponse, ApiError> {
        info!("Fetching inventory list");

        self.client
            .request::<(), InventoryListResponse>(Method::GET, "/inventory/list", None)
            .await
    }

    async fn list_inventory_by_step(
        &self,
        step_name: &str,
    ) -> Result<InventoryListResponse, ApiError> {
        let path = format!("/inventory/list/{}", step_name);
        info!("Fetching inventory for step: {}", step_name);

        self.client
            .request::<(), InventoryListResponse>(Method::GET, &path, None)
            .await
    }
}
