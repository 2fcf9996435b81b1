//! # Document Upload Service
//!
//! Identity and certificate scans that later feed extraction.
//!
//! ## Workflow
//!
//! 1.  Every multipart file part is buffered and hashed by `read_parts`.
//! 2.  Each part is classified as image or PDF. One unsupported file rejects
//!     the request before the session is touched.
//! 3.  The documents are added in a single session update; a file whose MD5
//!     is already held counts as a duplicate and is skipped.

use crate::error::ServiceError;
use crate::services::upload::read_parts;
use crate::store::SessionStore;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::error::ValidationError;
use common::model::document::{DocumentKind, UploadedDocument};
use common::requests::UploadSummary;
use log::info;
use uuid::Uuid;

/// Actix web handler for `POST /api/sessions/{session_id}/documents`.
///
/// # Arguments
/// * `session_id` - The wizard session, from the URL path.
/// * `payload` - `multipart/form-data` with one or more file parts.
///
/// # Returns
/// - `200 OK` with an `UploadSummary` of accepted and duplicate files.
/// - `400 Bad Request` when any file is not a JPEG, PNG or PDF, or the step
///   does not accept uploads.
/// - `404 Not Found` for an unknown session.
pub async fn process(
    sessions: web::Data<SessionStore>,
    session_id: web::Path<String>,
    payload: Multipart,
) -> impl Responder {
    match upload_documents(&sessions, &session_id, payload).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}

/// Every file part is classified before the session is touched: one
/// unsupported file rejects the whole request.
async fn upload_documents(
    sessions: &SessionStore,
    session_id: &str,
    payload: Multipart,
) -> Result<UploadSummary, ServiceError> {
    let mut documents = Vec::new();
    for part in read_parts(payload).await? {
        if !part.is_file() {
            continue;
        }
        let kind = DocumentKind::classify(&part.mime, &part.filename)?;
        documents.push(UploadedDocument {
            id: Uuid::new_v4().to_string(),
            filename: part.filename,
            mime: part.mime,
            kind,
            md5: part.md5,
            size: part.bytes.len(),
            content: part.bytes,
        });
    }
    if documents.is_empty() {
        return Err(ServiceError::Upload("no files in request".to_string()));
    }

    let summary = sessions
        .update(session_id, |s| -> Result<UploadSummary, ValidationError> {
            let mut summary = UploadSummary {
                accepted: 0,
                duplicates: 0,
            };
            for document in documents {
                if s.add_document(document)? {
                    summary.accepted += 1;
                } else {
                    summary.duplicates += 1;
                }
            }
            Ok(summary)
        })
        .await?;
    info!(
        "Session {}: {} document(s) accepted, {} duplicate(s) ignored",
        session_id, summary.accepted, summary.duplicates
    );
    Ok(summary)
}
