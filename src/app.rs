use crate::config::settings::AppConfig;
use crate::session::Session;
use crate::state::AppState;

pub fn create_session(config: AppConfig) -> Result<Session, reqwest::Error> {
    let state = AppState::from_config(config)?;
    Ok(Session::new(state))
}
