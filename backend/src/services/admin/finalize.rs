use crate::error::ServiceError;
use crate::registry::TemplateRegistry;
use crate::store::DraftStore;
use actix_web::{web, HttpResponse, Responder};
use common::model::template::DocumentTemplate;
use log::info;

/// `POST /api/admin/drafts/{draft_id}/finalize`: returns the listed template.
pub async fn process(
    drafts: web::Data<DraftStore>,
    registry: web::Data<TemplateRegistry>,
    draft_id: web::Path<String>,
) -> impl Responder {
    match finalize(&drafts, &registry, &draft_id).await {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => e.to_response(),
    }
}

/// Publishes the draft. A draft that fails the checks stays editable.
async fn finalize(
    drafts: &DraftStore,
    registry: &TemplateRegistry,
    draft_id: &str,
) -> Result<DocumentTemplate, ServiceError> {
    let template = drafts.snapshot(draft_id).await?.finalize()?;
    drafts.remove(draft_id).await?;
    registry.add(template.clone()).await;
    info!(
        "Template {} ({}) published with {} fields",
        template.id,
        template.name,
        template.fields.len()
    );
    Ok(template)
}
