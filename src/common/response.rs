use reqwest::Response;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::common::error::{ClientError, ClientResult};

/// Error envelope the conversion service uses on failures. Depending on the
/// endpoint the message lives in `error` or only `status` is set
/// (`{"status": "not_found"}`).
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ErrorBody {
    fn message(self) -> Option<String> {
        self.error
            .filter(|e| !e.is_empty())
            .or(self.status.filter(|s| !s.is_empty()))
    }
}

/// Turns a non-2xx response into [`ClientError::Server`], keeping whatever
/// message the service put in the body.
pub async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Could not read error body ({}): {}", status, e);
            String::new()
        }
    };
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    Err(ClientError::Server { status, message })
}

/// Checks the status then decodes the JSON body.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}
