//! # Auth Service Module
//!
//! Login and password change for the two configured accounts. Roles are
//! reported to the host but not enforced on other routes.

mod login;
mod password;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/auth";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/login", post().to(login::process))
        .route("/password", post().to(password::process))
}
