pub mod model;
pub mod service;

pub use model::{MediaFile, MediaKind, MediaSource};
pub use service::Selection;
