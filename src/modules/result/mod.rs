pub mod model;
pub mod service;

pub use model::ResultReference;
pub use service::ResultService;
