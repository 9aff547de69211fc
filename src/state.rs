use reqwest::Client;

use crate::config::settings::AppConfig;
use crate::infrastructure::http::client::build_client;
use crate::routes::Routes;

/// Shared, cheaply cloneable handles. Poll tasks get their own clone.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub http: Client,
    pub routes: Routes,
}

impl AppState {
    pub fn new(config: AppConfig, http: Client) -> Self {
        let routes = Routes::new(config.api_url.clone());
        Self {
            config,
            http,
            routes,
        }
    }

    pub fn from_config(config: AppConfig) -> Result<Self, reqwest::Error> {
        let http = build_client(&config)?;
        Ok(Self::new(config, http))
    }
}
