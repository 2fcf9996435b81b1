mod status;

use actix_web::web;

const API_PATH: &str = "/api/jobs";

pub fn configure_routes() -> actix_web::Scope {
    web::scope(API_PATH).route("/{job_id}", web::get().to(status::process))
}
