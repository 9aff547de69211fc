use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::modules::job::{JobId, JobService, JobStatus, PollEvent, PollEventKind};
use crate::modules::result::ResultReference;
use crate::state::AppState;

/// Handle to the status poller of one job. Dropping it cancels the poller,
/// so a session holding at most one watch polls at most one job.
pub struct JobWatch {
    job_id: JobId,
    cancel: CancellationToken,
    events: mpsc::UnboundedReceiver<PollEvent>,
}

impl JobWatch {
    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Next event from the poller; `None` once it has stopped and every
    /// event has been taken.
    pub async fn recv(&mut self) -> Option<PollEvent> {
        self.events.recv().await
    }
}

impl Drop for JobWatch {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawns the poller for `job_id` on the current runtime.
pub fn start_poller(state: AppState, job_id: JobId) -> JobWatch {
    let cancel = CancellationToken::new();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(poll_job(state, job_id.clone(), cancel.clone(), tx));
    info!(job_id = %job_id, "🔄 Polling started");

    JobWatch {
        job_id,
        cancel,
        events: rx,
    }
}

async fn poll_job(
    state: AppState,
    job_id: JobId,
    cancel: CancellationToken,
    events: mpsc::UnboundedSender<PollEvent>,
) {
    let period = state.config.poll_interval;
    // First check one period after submission, then every period.
    let mut ticker = interval_at(Instant::now() + period, period);
    // A slow response pushes the next tick back instead of bursting.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut attempts: u32 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!(job_id = %job_id, "Polling cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }

        attempts += 1;
        let response = tokio::select! {
            _ = cancel.cancelled() => {
                debug!(job_id = %job_id, "Polling cancelled mid-request");
                return;
            }
            response = JobService::status(&state, &job_id) => response,
        };

        let kind = match response {
            Ok(body) => match body.job_status() {
                JobStatus::Done => match state.routes.download(&job_id) {
                    Ok(url) => {
                        info!(job_id = %job_id, attempts, "✅ Job done");
                        PollEventKind::Done(ResultReference::new(url))
                    }
                    Err(e) => PollEventKind::PollFailed {
                        reason: e.to_string(),
                    },
                },
                JobStatus::Error => {
                    let message = body.error_message().map(str::to_string);
                    warn!(job_id = %job_id, error = ?message, "❌ Job failed on the service");
                    PollEventKind::JobFailed { message }
                }
                _ => PollEventKind::Status(body.status),
            },
            Err(e) => {
                error!(job_id = %job_id, "Error polling status: {}", e);
                PollEventKind::PollFailed {
                    reason: e.to_string(),
                }
            }
        };

        let terminal = kind.is_terminal();
        if !emit(&events, &job_id, kind) || terminal {
            return;
        }

        if let Some(max) = state.config.max_polls {
            if attempts >= max {
                warn!(job_id = %job_id, attempts, "Giving up on unfinished job");
                let reason = format!("gave up after {attempts} status checks");
                emit(&events, &job_id, PollEventKind::PollFailed { reason });
                return;
            }
        }
    }
}

/// False when nobody is listening any more.
fn emit(events: &mpsc::UnboundedSender<PollEvent>, job_id: &JobId, kind: PollEventKind) -> bool {
    events
        .send(PollEvent {
            job_id: job_id.clone(),
            kind,
        })
        .is_ok()
}
