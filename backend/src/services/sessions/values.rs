use crate::store::SessionStore;
use actix_web::{web, HttpResponse, Responder};
use common::error::ValidationError;
use common::model::form::FormValues;
use common::requests::{SetValueRequest, ValidationResponse};

/// Actix web handler for `PUT /api/sessions/{session_id}/values`.
///
/// # Arguments
/// * `session_id` - The wizard session, from the URL path.
/// * `payload` - The field name and its new value.
///
/// # Returns
/// - `200 OK` with every form value after the change.
/// - `400 Bad Request` for a name the selected template does not have, or
///   outside the fill and preview steps.
pub async fn set_value(
    sessions: web::Data<SessionStore>,
    session_id: web::Path<String>,
    payload: web::Json<SetValueRequest>,
) -> impl Responder {
    let SetValueRequest { name, value } = payload.into_inner();
    let result = sessions
        .update(&session_id, |s| -> Result<FormValues, ValidationError> {
            s.set_value(&name, value)?;
            Ok(s.values.clone())
        })
        .await;
    match result {
        Ok(values) => HttpResponse::Ok().json(values),
        Err(e) => e.to_response(),
    }
}

/// Reports which required fields are still empty. Never changes the session.
pub async fn validation(
    sessions: web::Data<SessionStore>,
    session_id: web::Path<String>,
) -> impl Responder {
    match sessions.snapshot(&session_id).await {
        Ok(session) => {
            let missing = session.missing_required();
            HttpResponse::Ok().json(ValidationResponse {
                valid: missing.is_empty(),
                missing,
            })
        }
        Err(e) => e.to_response(),
    }
}
