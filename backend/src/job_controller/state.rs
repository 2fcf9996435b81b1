//! Shared status table of background jobs.
//!
//! - `JobsState`: clonable handle to every job's status plus the sender used
//!   to update it. Injected into Actix as `web::Data<JobsState>`.
//! - `JobUpdate`: one status change, sent by a worker.
//! - `start_job_updater`: long-running task that applies updates in arrival
//!   order. Spawned once in `main.rs`.

use common::jobs::JobStatus;
use log::debug;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};

#[derive(Clone)]
pub struct JobsState {
    /// Job id to its latest status. Read by `GET /api/jobs/{job_id}`, written
    /// only by `start_job_updater` and by the scheduler when a job is created.
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,

    /// Workers push their progress here instead of locking `jobs` themselves.
    pub tx: mpsc::Sender<JobUpdate>,
}

impl JobsState {
    /// Creates the state and the receiving end `start_job_updater` drains.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<JobUpdate>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                jobs: Arc::new(RwLock::new(HashMap::new())),
                tx,
            },
            rx,
        )
    }

    pub async fn status(&self, job_id: &str) -> Option<JobStatus> {
        self.jobs.read().await.get(job_id).cloned()
    }
}

#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        debug!("Job {} -> {:?}", update.job_id, update.status);
        let mut jobs = state.jobs.write().await;
        jobs.insert(update.job_id, update.status);
    }
}
