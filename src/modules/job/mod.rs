pub mod dto;
pub mod events;
pub mod model;
pub mod service;

pub use events::{PollEvent, PollEventKind};
pub use model::{JobId, JobStatus};
pub use service::JobService;
