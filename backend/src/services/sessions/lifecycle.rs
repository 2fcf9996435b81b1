//! Session creation, snapshots and the two navigation moves that are not
//! tied to a particular step.

use crate::error::ServiceError;
use crate::store::SessionStore;
use actix_web::{web, HttpResponse, Responder};
use common::error::ValidationError;
use common::session::Session;
use log::info;
use uuid::Uuid;

pub async fn create(sessions: web::Data<SessionStore>) -> impl Responder {
    let session = Session::new(Uuid::new_v4().to_string());
    sessions.insert(session.id.clone(), session.clone()).await;
    info!("Started wizard session {}", session.id);
    HttpResponse::Ok().json(session)
}

pub async fn get(sessions: web::Data<SessionStore>, session_id: web::Path<String>) -> impl Responder {
    match sessions.snapshot(&session_id).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => e.to_response(),
    }
}

pub async fn back(sessions: web::Data<SessionStore>, session_id: web::Path<String>) -> impl Responder {
    match step_back(&sessions, &session_id).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => e.to_response(),
    }
}

async fn step_back(sessions: &SessionStore, session_id: &str) -> Result<Session, ServiceError> {
    sessions
        .update(session_id, |s| -> Result<Session, ValidationError> {
            s.back()?;
            Ok(s.clone())
        })
        .await
}

pub async fn restart(
    sessions: web::Data<SessionStore>,
    session_id: web::Path<String>,
) -> impl Responder {
    let result = sessions
        .update(&session_id, |s| {
            s.restart();
            Ok::<_, ValidationError>(s.clone())
        })
        .await;
    match result {
        Ok(session) => {
            info!("Restarted wizard session {}", session.id);
            HttpResponse::Ok().json(session)
        }
        Err(e) => e.to_response(),
    }
}
