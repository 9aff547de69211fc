//! Client for a remote image-to-video conversion service: pick images and
//! an optional audio track, submit them, poll the job and fetch the video.

pub mod app;
pub mod common;
pub mod config;
pub mod infrastructure;
pub mod modules;
pub mod routes;
pub mod session;
pub mod state;
pub mod workers;

pub use common::error::{ClientError, ClientResult};
pub use config::settings::AppConfig;
pub use session::Session;
