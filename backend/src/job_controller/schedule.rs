//! Runs slow capability calls in the background.
//!
//! 1. The job is registered as `Pending` and its id returned to the caller
//!    right away.
//! 2. The work closure runs on the blocking pool (`spawn_blocking`) and may
//!    report progress through a [`ProgressReporter`].
//! 3. On success the `apply` future commits the result (session, draft...)
//!    under its own write lock; on failure nothing is applied.
//! 4. The final `Completed`/`Failed` status goes through the same channel as
//!    the progress updates, so pollers never see progress after completion.

use super::state::{JobUpdate, JobsState};
use common::jobs::JobStatus;
use log::{info, warn};
use std::future::Future;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Handed to blocking work so it can publish `InProgress` percentages.
#[derive(Clone)]
pub struct ProgressReporter {
    job_id: String,
    tx: mpsc::Sender<JobUpdate>,
}

impl ProgressReporter {
    /// Must be called from a blocking thread, never from async code.
    pub fn report(&self, percent: u32) {
        let _ = self.tx.blocking_send(JobUpdate {
            job_id: self.job_id.clone(),
            status: JobStatus::InProgress(percent.min(100)),
        });
    }
}

pub async fn schedule_job<T, W, A, Fut>(
    state: &JobsState,
    kind: &'static str,
    work: W,
    apply: A,
) -> String
where
    T: Send + 'static,
    W: FnOnce(ProgressReporter) -> Result<T, String> + Send + 'static,
    A: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = Result<String, String>> + Send + 'static,
{
    let job_id = Uuid::new_v4().to_string();
    state
        .jobs
        .write()
        .await
        .insert(job_id.clone(), JobStatus::Pending);

    let tx = state.tx.clone();
    let reporter = ProgressReporter {
        job_id: job_id.clone(),
        tx: tx.clone(),
    };
    let job_id_clone = job_id.clone();

    tokio::spawn(async move {
        let outcome = match tokio::task::spawn_blocking(move || work(reporter)).await {
            Ok(Ok(value)) => apply(value).await,
            Ok(Err(e)) => Err(e),
            Err(join_err) => Err(format!("{} worker stopped unexpectedly: {}", kind, join_err)),
        };

        let status = match outcome {
            Ok(message) => {
                info!("{} job {} completed", kind, job_id_clone);
                JobStatus::Completed(message)
            }
            Err(e) => {
                warn!("{} job {} failed: {}", kind, job_id_clone, e);
                JobStatus::Failed(e)
            }
        };
        let _ = tx
            .send(JobUpdate {
                job_id: job_id_clone,
                status,
            })
            .await;
    });

    job_id
}
