use tracing::{debug, info};

use super::dto::{ConvertResponse, HealthResponse, StatusResponse};
use super::model::JobId;
use crate::common::error::{ClientError, ClientResult};
use crate::common::response::read_json;
use crate::common::upload::build_form;
use crate::modules::selection::Selection;
use crate::state::AppState;

pub struct JobService;

impl JobService {
    /// Uploads the selection and returns the id of the job the service
    /// created for it. Refuses an empty selection before touching the
    /// network.
    pub async fn submit(state: &AppState, selection: &Selection) -> ClientResult<JobId> {
        if selection.is_empty() {
            return Err(ClientError::EmptySelection);
        }

        let url = state.routes.convert()?;
        let form = build_form(selection).await?;

        info!(
            images = selection.len(),
            audio = selection.audio().is_some(),
            "⬆️ Uploading selection to {}",
            url
        );

        let response = state.http.post(url).multipart(form).send().await?;
        let body: ConvertResponse = read_json(response).await?;

        info!(job_id = %body.job_id, "Job accepted");
        Ok(body.job_id)
    }

    pub async fn status(state: &AppState, id: &JobId) -> ClientResult<StatusResponse> {
        let url = state.routes.status(id)?;
        let response = state
            .http
            .get(url)
            .timeout(state.config.http_timeout)
            .send()
            .await?;
        let body: StatusResponse = read_json(response).await?;

        debug!(job_id = %id, status = %body.status, "Status received");
        Ok(body)
    }

    pub async fn health(state: &AppState) -> ClientResult<HealthResponse> {
        let url = state.routes.health()?;
        let response = state
            .http
            .get(url)
            .timeout(state.config.http_timeout)
            .send()
            .await?;
        read_json(response).await
    }
}
