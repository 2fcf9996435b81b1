pub mod admin;
pub mod auth;
pub mod jobs;
pub mod sessions;
pub mod templates;
mod upload;

use actix_web::web;

/// Mounts every API scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(templates::configure_routes())
        .service(auth::configure_routes())
        .service(admin::configure_routes())
        .service(sessions::configure_routes())
        .service(jobs::configure_routes());
}
