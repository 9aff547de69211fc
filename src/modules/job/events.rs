use super::model::JobId;
use crate::modules::result::ResultReference;

/// Message from a poll task to the session that owns it.
#[derive(Debug, Clone)]
pub struct PollEvent {
    pub job_id: JobId,
    pub kind: PollEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollEventKind {
    /// Non-terminal status, shown as-is.
    Status(String),
    Done(ResultReference),
    /// The service marked the job as failed.
    JobFailed { message: Option<String> },
    /// The status query itself failed, or the poll ceiling was hit.
    PollFailed { reason: String },
}

impl PollEventKind {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollEventKind::Status(_))
    }
}
