use crate::capabilities::Capabilities;
use crate::error::ServiceError;
use crate::job_controller::schedule::schedule_job;
use crate::job_controller::state::JobsState;
use crate::store::SessionStore;
use actix_web::{web, HttpResponse, Responder};
use common::error::ValidationError;
use common::model::assets::AssetCategory;
use common::model::wizard::WizardStep;
use common::requests::{JobAccepted, RemoveBackgroundRequest};

pub async fn process(
    jobs: web::Data<JobsState>,
    sessions: web::Data<SessionStore>,
    capabilities: web::Data<Capabilities>,
    path: web::Path<(String, AssetCategory)>,
    payload: web::Json<RemoveBackgroundRequest>,
) -> impl Responder {
    let (session_id, category) = path.into_inner();
    let image = payload.into_inner().image;
    match start_removal(&jobs, &sessions, &capabilities, session_id, category, image).await {
        Ok(job_id) => HttpResponse::Ok().json(JobAccepted { job_id }),
        Err(e) => e.to_response(),
    }
}

/// Schedules background removal for one asset. On success the processed
/// image takes the original's place; if the original was removed meanwhile
/// the collection is left as it is.
async fn start_removal(
    jobs: &JobsState,
    sessions: &SessionStore,
    capabilities: &Capabilities,
    session_id: String,
    category: AssetCategory,
    image: String,
) -> Result<String, ServiceError> {
    let session = sessions.snapshot(&session_id).await?;
    if !matches!(session.step, WizardStep::Preview | WizardStep::Export) {
        return Err(ValidationError::InvalidStep {
            step: session.step,
            action: "remove asset backgrounds",
        }
        .into());
    }
    if !session.assets.get(category).contains(&image) {
        return Err(ServiceError::NotFound(format!("{} asset", category)));
    }

    let remover = capabilities.background.clone();
    let sessions = sessions.clone();
    let original = image.clone();
    let job_id = schedule_job(
        jobs,
        "Background removal",
        move |progress| {
            remover
                .remove_background(&image, &|pct: u32| progress.report(pct))
                .map_err(|e| e.to_string())
        },
        move |processed| async move {
            sessions
                .update(&session_id, |s| {
                    s.replace_asset(category, &original, processed).map(|_| ())
                })
                .await
                .map_err(|e| e.to_string())?;
            Ok("Background removed".to_string())
        },
    )
    .await;
    Ok(job_id)
}
