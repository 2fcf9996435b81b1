use crate::capabilities::Capabilities;
use crate::error::ServiceError;
use crate::job_controller::schedule::schedule_job;
use crate::job_controller::state::JobsState;
use crate::store::SessionStore;
use actix_web::{web, HttpResponse, Responder};
use common::requests::JobAccepted;

/// Actix web handler for `POST /api/sessions/{session_id}/extract`.
///
/// # Returns
/// - `200 OK` with a `JobAccepted` id; poll `/api/jobs/{job_id}`.
/// - `400 Bad Request` with no documents held or outside upload and review.
pub async fn process(
    jobs: web::Data<JobsState>,
    sessions: web::Data<SessionStore>,
    capabilities: web::Data<Capabilities>,
    session_id: web::Path<String>,
) -> impl Responder {
    match start_extraction(&jobs, &sessions, &capabilities, session_id.into_inner()).await {
        Ok(job_id) => HttpResponse::Ok().json(JobAccepted { job_id }),
        Err(e) => e.to_response(),
    }
}

/// Extracts over every document held when the job starts. The result only
/// lands in the session if exactly those documents are still held when it
/// finishes; otherwise the job fails and the session is left alone.
async fn start_extraction(
    jobs: &JobsState,
    sessions: &SessionStore,
    capabilities: &Capabilities,
    session_id: String,
) -> Result<String, ServiceError> {
    let session = sessions.snapshot(&session_id).await?;
    session.ensure_can_extract()?;
    let read = session.document_fingerprints();
    let documents = session.documents;

    let extractor = capabilities.extractor.clone();
    let sessions = sessions.clone();
    let job_id = schedule_job(
        jobs,
        "Extraction",
        move |_| extractor.extract(&documents).map_err(|e| e.to_string()),
        move |data| async move {
            let count = data.len();
            sessions
                .update(&session_id, |s| s.apply_extraction(data, &read))
                .await
                .map_err(|e| e.to_string())?;
            Ok(format!("Extracted {} values", count))
        },
    )
    .await;
    Ok(job_id)
}
