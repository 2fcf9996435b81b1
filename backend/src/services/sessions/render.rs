use crate::error::ServiceError;
use crate::store::SessionStore;
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use common::model::render::RenderModel;

/// Everything the host needs to draw the certificate. A new certificate id
/// is issued on every call.
pub async fn process(
    sessions: web::Data<SessionStore>,
    session_id: web::Path<String>,
) -> impl Responder {
    match render(&sessions, &session_id).await {
        Ok(model) => HttpResponse::Ok().json(model),
        Err(e) => e.to_response(),
    }
}

async fn render(sessions: &SessionStore, session_id: &str) -> Result<RenderModel, ServiceError> {
    Ok(sessions.snapshot(session_id).await?.compose(Utc::now())?)
}
