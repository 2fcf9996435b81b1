use crate::error::ServiceError;
use crate::registry::TemplateRegistry;
use actix_web::{web, HttpResponse, Responder};
use common::error::ValidationError;
use common::model::template::DocumentTemplate;

pub async fn process(
    registry: web::Data<TemplateRegistry>,
    template_id: web::Path<String>,
) -> impl Responder {
    match get_template(&registry, &template_id).await {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => e.to_response(),
    }
}

async fn get_template(
    registry: &TemplateRegistry,
    template_id: &str,
) -> Result<DocumentTemplate, ServiceError> {
    registry
        .snapshot(template_id)
        .await
        .ok_or_else(|| ValidationError::UnknownTemplate(template_id.to_string()).into())
}
