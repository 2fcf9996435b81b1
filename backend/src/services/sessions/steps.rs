//! Forward moves that need nothing but the session itself.

use crate::store::SessionStore;
use actix_web::{web, HttpResponse, Responder};
use common::error::ValidationError;
use common::session::Session;

/// Review -> SelectTemplate. Returns the updated session.
pub async fn confirm_review(
    sessions: web::Data<SessionStore>,
    session_id: web::Path<String>,
) -> impl Responder {
    let result = sessions
        .update(&session_id, |s| -> Result<Session, ValidationError> {
            s.confirm_review()?;
            Ok(s.clone())
        })
        .await;
    match result {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => e.to_response(),
    }
}

/// Fill -> Preview, refused while any required field is empty.
pub async fn preview(
    sessions: web::Data<SessionStore>,
    session_id: web::Path<String>,
) -> impl Responder {
    let result = sessions
        .update(&session_id, |s| -> Result<Session, ValidationError> {
            s.proceed_to_preview()?;
            Ok(s.clone())
        })
        .await;
    match result {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => e.to_response(),
    }
}
