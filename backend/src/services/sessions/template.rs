use crate::error::ServiceError;
use crate::registry::TemplateRegistry;
use crate::store::SessionStore;
use actix_web::{web, HttpResponse, Responder};
use common::error::ValidationError;
use common::requests::{SelectTemplateRequest, SelectTemplateResponse};
use log::{debug, info};

/// Actix web handler for `POST /api/sessions/{session_id}/template`.
///
/// # Arguments
/// * `session_id` - The wizard session, from the URL path.
/// * `payload` - The id of a listed template.
///
/// # Returns
/// - `200 OK` with the pre-filled values and the mapped fields left empty.
/// - `404 Not Found` for an unknown template or session.
/// - `400 Bad Request` when the template has no fields or the session is not
///   choosing a template.
pub async fn process(
    sessions: web::Data<SessionStore>,
    registry: web::Data<TemplateRegistry>,
    session_id: web::Path<String>,
    payload: web::Json<SelectTemplateRequest>,
) -> impl Responder {
    match select_template(&sessions, &registry, &session_id, &payload.template_id).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => e.to_response(),
    }
}

/// Copies the template out of the registry and pre-fills the form from the
/// session's extracted data.
async fn select_template(
    sessions: &SessionStore,
    registry: &TemplateRegistry,
    session_id: &str,
    template_id: &str,
) -> Result<SelectTemplateResponse, ServiceError> {
    let template = registry
        .snapshot(template_id)
        .await
        .ok_or_else(|| ValidationError::UnknownTemplate(template_id.to_string()))?;

    let resp = sessions
        .update(session_id, |s| -> Result<SelectTemplateResponse, ValidationError> {
            let mapping_gaps = s.select_template(template)?.to_vec();
            Ok(SelectTemplateResponse {
                values: s.values.clone(),
                mapping_gaps,
            })
        })
        .await?;

    for gap in &resp.mapping_gaps {
        debug!(
            "Session {}: no extracted value for {} (mapped to {})",
            session_id, gap.field_name, gap.mapped_to
        );
    }
    info!(
        "Session {} selected template {} ({} values pre-filled)",
        session_id,
        template_id,
        resp.values.len()
    );
    Ok(resp)
}
