use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use crate::{
    application::models::stats::StatsResponse, error::ApiError,
    transport::http_client::HttpClient,
};

/// Aggregate scan statistics for the stats page.
#[async_trait]
pub trait StatsService: Send + Sync {
    async fn get_stats(&self) -> Result<StatsResponse, ApiError>;
}

pub struct StatsServiceImpl<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> StatsServiceImpl<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> StatsService for StatsServiceImpl<C> {
    async fn get_stats(&self) -> Result<StatsResponse, ApiError> {
        info!("Fetching aggregate statistics");

        self.client
            .request::<(), StatsResponse>(Method::GET, "/stats", None)
            .await
    }
}
