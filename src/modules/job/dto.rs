use serde::Deserialize;

use super::model::{JobId, JobStatus};

#[derive(Debug, Deserialize)]
pub struct ConvertResponse {
    pub job_id: JobId,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn job_status(&self) -> JobStatus {
        JobStatus::from(self.status.clone())
    }

    /// The service sends `"error": ""` when there is nothing to report.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
