use crate::capabilities::Capabilities;
use crate::error::ServiceError;
use crate::job_controller::schedule::schedule_job;
use crate::job_controller::state::JobsState;
use crate::store::DraftStore;
use actix_web::{web, HttpResponse, Responder};
use common::error::ValidationError;
use common::requests::JobAccepted;

pub async fn process(
    jobs: web::Data<JobsState>,
    drafts: web::Data<DraftStore>,
    capabilities: web::Data<Capabilities>,
    draft_id: web::Path<String>,
) -> impl Responder {
    match start_detection(&jobs, &drafts, &capabilities, draft_id.into_inner()).await {
        Ok(job_id) => HttpResponse::Ok().json(JobAccepted { job_id }),
        Err(e) => e.to_response(),
    }
}

/// Schedules field detection on the draft's reference. The detected fields
/// replace the draft's field list once the job completes.
async fn start_detection(
    jobs: &JobsState,
    drafts: &DraftStore,
    capabilities: &Capabilities,
    draft_id: String,
) -> Result<String, ServiceError> {
    let reference = drafts
        .snapshot(&draft_id)
        .await?
        .reference()
        .cloned()
        .ok_or_else(|| {
            ValidationError::IncompleteTemplate("a reference document is required".to_string())
        })?;

    let detector = capabilities.detector.clone();
    let drafts = drafts.clone();
    let job_id = schedule_job(
        jobs,
        "Field detection",
        move |_| detector.detect(&reference).map_err(|e| e.to_string()),
        move |fields| async move {
            let count = fields.len();
            drafts
                .update(&draft_id, |draft| {
                    draft.apply_detection(fields);
                    Ok::<_, ServiceError>(())
                })
                .await
                .map_err(|e| e.to_string())?;
            Ok(format!("Detected {} fields", count))
        },
    )
    .await;
    Ok(job_id)
}
