use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info};

use crate::{
    application::models::step::{Step, StepCreate, StepDeleteResponse, StepUpdate, StepsResponse},
    error::ApiError,
    transport::http_client::HttpClient,
};

/// CRUD over the configured process steps.
#[async_trait]
pub trait StepService: Send + Sync {
    /// All steps ordered by `step_id`.
    async fn list_steps(&self) -> Result<StepsResponse, ApiError>;

    async fn get_step(&self, step_id: i64) -> Result<Step, ApiError>;

    async fn create_step(&self, step: &StepCreate) -> Result<Step, ApiError>;

    async fn update_step(&self, step_id: i64, update: &StepUpdate) -> Result<Step, ApiError>;

    async fn delete_step(&self, step_id: i64) -> Result<StepDeleteResponse, ApiError>;
}

pub struct StepServiceImpl<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> StepServiceImpl<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> StepService for StepServiceImpl<C> {
    async fn list_steps(&self) -> Result<StepsResponse, ApiError> {
        info!("Fetching process steps");

        let response = self
            .client
            .request::<(), StepsResponse>(Method::GET, "/steps", None)
            .await?;

        debug!("Fetched {} steps", response.steps.len());
        Ok(response)
    }

    async fn get_step(&self, step_id: i64) -> Result<Step, ApiError> {
        let path = format!("/steps/{}", step_id);
        info!("Fetching step: {}", step_id);

        self.client.request::<(), Step>(Method::GET, &path, None).await
    }

    async fn create_step(&self, step: &StepCreate) -> Result<Step, ApiError> {
        info!("Creating step: {}", step.step_name);

        self.client
            .request::<StepCreate, Step>(Method::POST, "/steps", Some(step))
            .await
    }

    async fn update_step(&self, step_id: i64, update: &StepUpdate) -> Result<Step, ApiError> {
        let path = format!("/steps/{}", step_id);
        info!("Updating step: {}", step_id);

        self.client
            .request::<StepUpdate, Step>(Method::PUT, &path, Some(update))
            .await
    }

    async fn delete_step(&self, step_id: i64) -> Result<StepDeleteResponse, ApiError> {
        let path = format!("/steps/{}", step_id);
        info!("Deleting step: {}", step_id);

        self.client
            .request::<(), StepDeleteResponse>(Method::DELETE, &path, None)
            .await
    }
}
