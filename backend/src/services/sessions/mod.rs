//! # Wizard Session Service Module
//!
//! One wizard run per session, kept in the [`SessionStore`](crate::store::SessionStore):
//! upload, review, select template, fill, preview, export. Each handler
//! delegates the step check to `common::session::Session`, so an out-of-order
//! request is answered with 400 and leaves the session untouched.
//!
//! Slow steps (`extract`, asset `background` removal) answer with a job id
//! right away; poll `/api/jobs/{job_id}` for the outcome.

mod assets;
mod background;
mod documents;
mod export;
mod extract;
mod lifecycle;
mod render;
mod steps;
mod template;
mod values;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/sessions";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(lifecycle::create))
        .route("/{session_id}", get().to(lifecycle::get))
        .route("/{session_id}/documents", post().to(documents::process))
        .route("/{session_id}/extract", post().to(extract::process))
        .route("/{session_id}/review/confirm", post().to(steps::confirm_review))
        .route("/{session_id}/template", post().to(template::process))
        .route("/{session_id}/values", put().to(values::set_value))
        .route("/{session_id}/validation", get().to(values::validation))
        .route("/{session_id}/preview", post().to(steps::preview))
        .route("/{session_id}/render", get().to(render::process))
        .route("/{session_id}/assets/{category}", post().to(assets::upload))
        .route(
            "/{session_id}/assets/{category}/background",
            post().to(background::process),
        )
        .route("/{session_id}/assets/{category}/{index}", delete().to(assets::remove))
        .route("/{session_id}/export/pdf", post().to(export::pdf))
        .route("/{session_id}/export/json", get().to(export::json))
        .route("/{session_id}/export/document", get().to(export::document))
        .route("/{session_id}/back", post().to(lifecycle::back))
        .route("/{session_id}/restart", post().to(lifecycle::restart))
}
