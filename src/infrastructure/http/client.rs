use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::config::settings::AppConfig;

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("slideshow-client/", env!("CARGO_PKG_VERSION"));

/// Only the connect phase is bounded here. Uploads and downloads can be
/// large, so short requests (status, health) set their own timeout.
pub fn build_client(config: &AppConfig) -> Result<Client, reqwest::Error> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(config.http_timeout.min(MAX_CONNECT_TIMEOUT))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?;

    info!("✅ HTTP client ready for {}", config.api_url);
    Ok(client)
}
