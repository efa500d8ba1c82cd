use serde::{Deserialize, Serialize};

/// Event count for one process step.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StepCount {
    #[serde(rename = "_id")]
    pub step_name: String,
    pub count: u64,
}

/// Aggregate scan statistics (`GET /stats`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsResponse {
    pub total: u64,
    pub in_progress: u64,
    pub finished: u64,
    pub by_step: Vec<StepCount>,
}
