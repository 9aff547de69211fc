//! The single owner of user-facing state: selection, status line, result
//! and the watch over the job in flight.

use tracing::{error, info, warn};

use crate::common::error::{ClientError, ClientResult};
use crate::modules::job::{JobId, JobService, PollEventKind};
use crate::modules::result::ResultReference;
use crate::modules::selection::Selection;
use crate::state::AppState;
use crate::workers::poller::{JobWatch, start_poller};

pub const STATUS_UPLOADING: &str = "Uploading...";
pub const STATUS_PROCESSING: &str = "Processing...";
pub const STATUS_UPLOAD_FAILED: &str = "Upload failed";
pub const STATUS_POLL_FAILED: &str = "Error polling status";
pub const STATUS_DONE: &str = "done";
pub const STATUS_JOB_ERROR: &str = "error";

pub struct Session {
    state: AppState,
    selection: Selection,
    status_text: String,
    result: Option<ResultReference>,
    watch: Option<JobWatch>,
}

impl Session {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            selection: Selection::new(),
            status_text: String::new(),
            result: None,
            watch: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Set only while the latest observed job status is `done`.
    pub fn result(&self) -> Option<&ResultReference> {
        self.result.as_ref()
    }

    pub fn current_job(&self) -> Option<&JobId> {
        self.watch.as_ref().map(JobWatch::job_id)
    }

    pub fn is_polling(&self) -> bool {
        self.watch.is_some()
    }

    /// Uploads the current selection and starts polling the new job. Any
    /// job still being polled is abandoned first.
    ///
    /// An empty selection fails with [`ClientError::EmptySelection`] without
    /// any request being made; the status line is left alone.
    pub async fn convert(&mut self) -> ClientResult<JobId> {
        if self.selection.is_empty() {
            warn!("Convert requested with no images selected");
            return Err(ClientError::EmptySelection);
        }

        self.stop_polling();
        self.result = None;
        self.status_text = STATUS_UPLOADING.to_string();

        match JobService::submit(&self.state, &self.selection).await {
            Ok(job_id) => {
                self.status_text = STATUS_PROCESSING.to_string();
                self.watch = Some(start_poller(self.state.clone(), job_id.clone()));
                Ok(job_id)
            }
            Err(e) => {
                error!("Upload failed: {}", e);
                self.status_text = STATUS_UPLOAD_FAILED.to_string();
                Err(e)
            }
        }
    }

    /// Drops the current job watch, cancelling its poller.
    pub fn stop_polling(&mut self) {
        if let Some(watch) = self.watch.take() {
            info!(job_id = %watch.job_id(), "Abandoning job");
            watch.cancel();
        }
    }

    /// Waits for the next poll event of the current job and applies it.
    /// Returns `None` when there is no job being polled.
    pub async fn next_event(&mut self) -> Option<PollEventKind> {
        let received = match self.watch.as_mut() {
            Some(watch) => watch.recv().await,
            None => return None,
        };

        // Each watch has its own channel, so whatever arrives belongs to
        // the current job.
        let Some(event) = received else {
            self.watch = None;
            return None;
        };

        self.apply(&event.kind);
        if event.kind.is_terminal() {
            self.watch = None;
        }
        Some(event.kind)
    }

    /// Drives the current job until it settles and returns the terminal
    /// event, or `None` if nothing was being polled.
    pub async fn wait_for_completion(&mut self) -> Option<PollEventKind> {
        while let Some(kind) = self.next_event().await {
            if kind.is_terminal() {
                return Some(kind);
            }
        }
        None
    }

    fn apply(&mut self, kind: &PollEventKind) {
        match kind {
            PollEventKind::Status(status) => {
                self.status_text = status.clone();
                self.result = None;
            }
            PollEventKind::Done(result) => {
                self.status_text = STATUS_DONE.to_string();
                self.result = Some(result.clone());
            }
            PollEventKind::JobFailed { .. } => {
                self.status_text = STATUS_JOB_ERROR.to_string();
                self.result = None;
            }
            PollEventKind::PollFailed { .. } => {
                self.status_text = STATUS_POLL_FAILED.to_string();
                self.result = None;
            }
        }
    }
}
