use crate::capabilities::Capabilities;
use crate::config::AppConfig;
use crate::job_controller::state::{start_job_updater, JobsState};
use crate::registry::{builtin, TemplateRegistry};
use crate::store::{self, DraftStore, SessionStore};
use actix_web::web;
use common::jobs::JobStatus;
use std::time::Duration;

/// Polls until the job is `Completed` or `Failed`.
pub async fn wait_for_job(state: &JobsState, job_id: &str) -> JobStatus {
    for _ in 0..500 {
        if let Some(status) = state.status(job_id).await {
            if status.is_finished() {
                return status;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {} did not finish in time", job_id);
}

/// Everything `main` injects, wired with zero mock delays.
pub struct TestContext {
    pub config: AppConfig,
    pub jobs: JobsState,
    pub registry: TemplateRegistry,
    pub sessions: SessionStore,
    pub drafts: DraftStore,
    pub capabilities: Capabilities,
}

impl TestContext {
    /// Must run inside a runtime; the job updater is spawned here.
    pub fn new() -> Self {
        let config = AppConfig::for_tests();
        let (jobs, rx) = JobsState::new(64);
        tokio::spawn(start_job_updater(jobs.clone(), rx));
        Self {
            registry: TemplateRegistry::with_templates(builtin::builtin_templates(
                &config.company_name,
            )),
            sessions: store::session_store(),
            drafts: store::draft_store(),
            capabilities: Capabilities::mocks(&config),
            jobs,
            config,
        }
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::JsonConfig::default().limit(self.config.json_limit))
            .app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(self.jobs.clone()))
            .app_data(web::Data::new(self.registry.clone()))
            .app_data(web::Data::new(self.sessions.clone()))
            .app_data(web::Data::new(self.drafts.clone()))
            .app_data(web::Data::new(self.capabilities.clone()));
        crate::services::configure(cfg);
    }
}

/// Hand-built `multipart/form-data` body. Returns the content type header
/// value and the body.
pub fn multipart_body(parts: &[(&str, Option<&str>, &str, &[u8])]) -> (String, Vec<u8>) {
    let boundary = "certify-test-boundary";
    let mut body = Vec::new();
    for (name, filename, content_type, bytes) in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    (format!("multipart/form-data; boundary={}", boundary), body)
}
