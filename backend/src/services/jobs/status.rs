use crate::error::ServiceError;
use crate::job_controller::state::JobsState;
use actix_web::{web, HttpResponse, Responder};

pub async fn process(jobs: web::Data<JobsState>, job_id: web::Path<String>) -> impl Responder {
    match jobs.status(&job_id).await {
        Some(status) => HttpResponse::Ok().json(status),
        None => ServiceError::NotFound(format!("Job '{}'", job_id)).to_response(),
    }
}
