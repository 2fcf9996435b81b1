use crate::store::DraftStore;
use actix_web::{web, HttpResponse, Responder};

pub async fn process(drafts: web::Data<DraftStore>, draft_id: web::Path<String>) -> impl Responder {
    match drafts.snapshot(&draft_id).await {
        Ok(draft) => HttpResponse::Ok().json(draft),
        Err(e) => e.to_response(),
    }
}
