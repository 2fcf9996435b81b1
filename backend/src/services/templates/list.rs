use crate::registry::TemplateRegistry;
use actix_web::{web, HttpResponse, Responder};

/// `GET /api/templates`: every listed template, in insertion order.
pub async fn process(registry: web::Data<TemplateRegistry>) -> impl Responder {
    HttpResponse::Ok().json(registry.list().await)
}
