//! Field mutators on a listed template.
//!
//! Each handler takes the template's write lock for the whole edit, so
//! concurrent readers see the template either before or after it.

use crate::error::ServiceError;
use crate::registry::{SharedTemplate, TemplateRegistry};
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use common::error::ValidationError;
use common::model::field::{DocumentField, FieldPatch};
use log::info;

async fn find(registry: &TemplateRegistry, template_id: &str) -> Result<SharedTemplate, ServiceError> {
    registry
        .get(template_id)
        .await
        .ok_or_else(|| ValidationError::UnknownTemplate(template_id.to_string()).into())
}

pub async fn add(
    registry: web::Data<TemplateRegistry>,
    template_id: web::Path<String>,
) -> impl Responder {
    match add_field(&registry, &template_id).await {
        Ok(field) => HttpResponse::Ok().json(field),
        Err(e) => e.to_response(),
    }
}

async fn add_field(registry: &TemplateRegistry, template_id: &str) -> Result<DocumentField, ServiceError> {
    let handle = find(registry, template_id).await?;
    let mut template = handle.write().await;
    let field = template.add_field(Utc::now().timestamp_millis()).clone();
    info!("Added field {} to template {}", field.id, template_id);
    Ok(field)
}

pub async fn update(
    registry: web::Data<TemplateRegistry>,
    path: web::Path<(String, String)>,
    patch: web::Json<FieldPatch>,
) -> impl Responder {
    let (template_id, field_id) = path.into_inner();
    match update_field(&registry, &template_id, &field_id, &patch).await {
        Ok(field) => HttpResponse::Ok().json(field),
        Err(e) => e.to_response(),
    }
}

async fn update_field(
    registry: &TemplateRegistry,
    template_id: &str,
    field_id: &str,
    patch: &FieldPatch,
) -> Result<DocumentField, ServiceError> {
    let handle = find(registry, template_id).await?;
    let mut template = handle.write().await;
    Ok(template.update_field(field_id, patch)?.clone())
}

pub async fn remove(
    registry: web::Data<TemplateRegistry>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (template_id, field_id) = path.into_inner();
    match remove_field(&registry, &template_id, &field_id).await {
        Ok(field) => HttpResponse::Ok().json(field),
        Err(e) => e.to_response(),
    }
}

async fn remove_field(
    registry: &TemplateRegistry,
    template_id: &str,
    field_id: &str,
) -> Result<DocumentField, ServiceError> {
    let handle = find(registry, template_id).await?;
    let mut template = handle.write().await;
    let removed = template.remove_listed_field(field_id)?;
    info!("Removed field {} from template {}", field_id, template_id);
    Ok(removed)
}
