//! # Draft Creation Service
//!
//! Starts authoring a template from an uploaded reference document.
//!
//! ## Workflow
//!
//! 1.  The `json` part names the template and optionally its type; a blank
//!     type becomes `certificate`.
//! 2.  The `file` part becomes the draft background: images are kept as data
//!     URLs, a PDF is only remembered as uploaded.
//! 3.  The draft is stored under a fresh UUID with no fields. Run detection
//!     or add fields by hand before finalizing.

use crate::config::AppConfig;
use crate::data_url;
use crate::error::ServiceError;
use crate::services::upload::{read_parts, UploadedPart};
use crate::store::DraftStore;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::model::document::DocumentKind;
use common::model::draft::TemplateDraft;
use common::model::template::TemplateBackground;
use common::requests::NewDraftRequest;
use log::info;
use serde_json::from_slice;
use uuid::Uuid;

/// Actix web handler for `POST /api/admin/drafts`.
///
/// # Arguments
/// * `payload` - `multipart/form-data` with a `json` part (`NewDraftRequest`)
///   and a `file` part holding the reference document.
///
/// # Returns
/// - `200 OK` with the new `TemplateDraft`.
/// - `400 Bad Request` if a part is missing, the JSON is malformed or the
///   reference is not a JPEG, PNG or PDF.
pub async fn process(
    drafts: web::Data<DraftStore>,
    config: web::Data<AppConfig>,
    payload: Multipart,
) -> impl Responder {
    match create_draft(&drafts, &config, payload).await {
        Ok(draft) => HttpResponse::Ok().json(draft),
        Err(e) => e.to_response(),
    }
}

/// Image references are kept inline as data URLs so they can be drawn on
/// later. A PDF reference is only remembered as "a PDF was uploaded".
fn reference_of(part: &UploadedPart) -> Result<TemplateBackground, ServiceError> {
    match DocumentKind::classify(&part.mime, &part.filename)? {
        DocumentKind::Image => Ok(TemplateBackground::Image(data_url::encode(
            &part.mime,
            &part.bytes,
        ))),
        DocumentKind::Pdf => Ok(TemplateBackground::Pdf),
    }
}

async fn create_draft(
    drafts: &DraftStore,
    config: &AppConfig,
    payload: Multipart,
) -> Result<TemplateDraft, ServiceError> {
    let mut request: Option<NewDraftRequest> = None;
    let mut reference: Option<TemplateBackground> = None;

    for part in read_parts(payload).await? {
        match part.name.as_str() {
            "json" => request = Some(from_slice(&part.bytes)?),
            "file" => reference = Some(reference_of(&part)?),
            _ => {}
        }
    }

    let request = request.ok_or_else(|| ServiceError::Upload("missing 'json' part".to_string()))?;
    let reference =
        reference.ok_or_else(|| ServiceError::Upload("missing 'file' part".to_string()))?;

    let draft = TemplateDraft::new(
        Uuid::new_v4().to_string(),
        &request.name,
        request.kind.as_deref(),
        reference,
        &config.company_name,
    );
    drafts
        .insert(draft.template.id.clone(), draft.clone())
        .await;
    info!("Created template draft {} ({})", draft.template.id, draft.template.name);
    Ok(draft)
}
