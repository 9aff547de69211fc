use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque job identifier issued by the conversion service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Job state as reported by the service. Only `done` and `error` mean
/// anything to the client; everything else is shown verbatim and polled on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Processing,
    Done,
    Error,
    Other(String),
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
            JobStatus::Other(s) => s,
        }
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "queued" => JobStatus::Queued,
            "processing" => JobStatus::Processing,
            "done" => JobStatus::Done,
            "error" => JobStatus::Error,
            _ => JobStatus::Other(s),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(JobStatus::from("done".to_string()), JobStatus::Done);
        assert_eq!(JobStatus::from("error".to_string()), JobStatus::Error);
        assert_eq!(JobStatus::from("queued".to_string()), JobStatus::Queued);
        assert_eq!(
            JobStatus::from("submitted".to_string()),
            JobStatus::Other("submitted".to_string())
        );
        // Matching is exact, as the service reports lowercase values.
        assert!(!JobStatus::from("DONE".to_string()).is_terminal());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Error.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(!JobStatus::Other("not_found".to_string()).is_terminal());
    }

    #[test]
    fn test_display_round_trips_unknown_values() {
        assert_eq!(JobStatus::Other("rendering".to_string()).to_string(), "rendering");
        assert_eq!(JobId::from("J1").to_string(), "J1");
    }
}
