//! Field edits on a draft that has not been published yet.

use crate::error::ServiceError;
use crate::store::DraftStore;
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use common::model::field::{DocumentField, FieldPatch};

/// `POST /api/admin/drafts/{draft_id}/fields`: appends a blank text field.
pub async fn add(drafts: web::Data<DraftStore>, draft_id: web::Path<String>) -> impl Responder {
    let now = Utc::now().timestamp_millis();
    let result = drafts
        .update(&draft_id, |draft| {
            Ok::<_, ServiceError>(draft.template.add_field(now).clone())
        })
        .await;
    respond(result)
}

/// `PATCH /api/admin/drafts/{draft_id}/fields/{field_id}`.
///
/// # Arguments
/// * `path` - The draft id and field id.
/// * `patch` - Label, type and mapping changes; an empty `mappedTo` clears
///   the mapping.
///
/// # Returns
/// - `200 OK` with the updated field.
/// - `400 Bad Request` for an unknown field, `404 Not Found` for an unknown
///   draft.
pub async fn update(
    drafts: web::Data<DraftStore>,
    path: web::Path<(String, String)>,
    patch: web::Json<FieldPatch>,
) -> impl Responder {
    let (draft_id, field_id) = path.into_inner();
    let result = drafts
        .update(&draft_id, |draft| {
            draft.template.update_field(&field_id, &patch).cloned()
        })
        .await;
    respond(result)
}

/// `DELETE /api/admin/drafts/{draft_id}/fields/{field_id}`. A draft may end
/// up with no fields; finalizing it is refused until one is added.
pub async fn remove(
    drafts: web::Data<DraftStore>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (draft_id, field_id) = path.into_inner();
    let result = drafts
        .update(&draft_id, |draft| draft.template.remove_field(&field_id))
        .await;
    respond(result)
}

fn respond(result: Result<DocumentField, ServiceError>) -> HttpResponse {
    match result {
        Ok(field) => HttpResponse::Ok().json(field),
        Err(e) => e.to_response(),
    }
}
