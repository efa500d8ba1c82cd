use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info};

use crate::{
    application::models::{
        article::{Article, RfidEvent},
        history::{DashboardResponse, HistoricResponse},
    },
    error::ApiError,
    transport::http_client::HttpClient,
};

/// Read access to articles and their scan history.
#[async_trait]
pub trait ArticleService: Send + Sync {
    /// All article descriptions.
    async fn list_articles(&self) -> Result<Vec<Article>, ApiError>;

    /// One article by its reference name.
    async fn get_article(&self, name: &str) -> Result<Article, ApiError>;

    /// All scans recorded for one article reference, oldest first.
    async fn get_rfid_events(&self, reference: &str) -> Result<Vec<RfidEvent>, ApiError>;

    /// Full scan log, newest first.
    async fn get_historic(&self) -> Result<HistoricResponse, ApiError>;

    /// Latest known position of every article.
    async fn get_dashboard(&self) -> Result<DashboardResponse, ApiError>;
}

pub struct ArticleServiceImpl<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ArticleServiceImpl<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> ArticleService for ArticleServiceImpl<C> {
    async fn list_articles(&self) -> Result<Vec<Article>, ApiError> {
        info!("Fetching all articles");

        let articles = self
            .client
            .request::<(), Vec<Article>>(Method::GET, "/articles", None)
            .await?;

        debug!("Fetched {} articles", articles.len());
        Ok(articles)
    }

    async fn get_article(&self, name: &str) -> Result<Article, ApiError> {
        let path = format!("/articles/{}", name);
        info!("Fetching article: {}", name);

        self.client.request::<(), Article>(Method::GET, &path, None).await
    }

    async fn get_rfid_events(&self, reference: &str) -> Result<Vec<RfidEvent>, ApiError> {
        let path = format!("/rfid_events/{}", reference);
        info!("Fetching RFID events for: {}", reference);

        let events = self
            .client
            .request::<(), Vec<RfidEvent>>(Method::GET, &path, None)
            .await?;

        debug!("Fetched {} events for {}", events.len(), reference);
        Ok(events)
    }

    async fn get_historic(&self) -> Result<HistoricResponse, ApiError> {
        info!("Fetching scan history");

        self.client
            .request::<(), HistoricResponse>(Method::GET, "/historic", None)
            .await
    }

    async fn get_dashboard(&self) -> Result<DashboardResponse, ApiError> {
        info!("Fetching dashboard aggregate");

        self.client
            .request::<(), DashboardResponse>(Method::GET, "/dashboard", None)
            .await
    }
}
