//! Certificate downloads.
//!
//! Every artifact is built from a snapshot of the session; the session only
//! moves to `Export` once the artifact exists. A failed export leaves it
//! where it was. The JSON export is also offered while filling, and then
//! leaves the session on `Fill`.

use crate::capabilities::Capabilities;
use crate::config::AppConfig;
use crate::error::{ExportError, ServiceError};
use crate::export::filename::export_filename;
use crate::export::json::export_json;
use crate::export::layout::render_certificate;
use crate::export::{export_pdf, PdfMetadata, SurfaceHandle};
use crate::store::SessionStore;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use common::compose::subject_name;
use common::model::wizard::WizardStep;
use common::requests::ExportPdfRequest;
use log::info;

struct Artifact {
    filename: String,
    content_type: &'static str,
    bytes: Vec<u8>,
}

impl Artifact {
    fn into_response(self) -> HttpResponse {
        HttpResponse::Ok()
            .content_type(self.content_type)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(self.filename)],
            })
            .body(self.bytes)
    }
}

fn respond(result: Result<Artifact, ServiceError>) -> HttpResponse {
    match result {
        Ok(artifact) => artifact.into_response(),
        Err(e) => e.to_response(),
    }
}

async fn mark_exported(
    sessions: &SessionStore,
    session_id: &str,
    artifact: Artifact,
) -> Result<Artifact, ServiceError> {
    sessions
        .update(session_id, |s| s.mark_exported())
        .await?;
    info!("Session {} exported {}", session_id, artifact.filename);
    Ok(artifact)
}

pub async fn pdf(
    sessions: web::Data<SessionStore>,
    capabilities: web::Data<Capabilities>,
    config: web::Data<AppConfig>,
    session_id: web::Path<String>,
    payload: web::Json<ExportPdfRequest>,
) -> impl Responder {
    let surface = SurfaceHandle(payload.into_inner().surface);
    respond(raster_pdf(&sessions, &capabilities, &config, &session_id, surface).await)
}

/// Embeds the host's snapshot of the rendered certificate in a one-page PDF.
async fn raster_pdf(
    sessions: &SessionStore,
    capabilities: &Capabilities,
    config: &AppConfig,
    session_id: &str,
    surface: SurfaceHandle,
) -> Result<Artifact, ServiceError> {
    let now = Utc::now();
    let model = sessions.snapshot(session_id).await?.compose(now)?;
    let meta = PdfMetadata::for_certificate(&model, &config.pdf_creator);

    let rasterizer = capabilities.rasterizer.clone();
    let engine = capabilities.pdf_engine.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        export_pdf(rasterizer.as_ref(), engine.as_ref(), &surface, &meta)
    })
    .await
    .map_err(|e| ExportError::Pdf(e.to_string()))??;

    let artifact = Artifact {
        filename: export_filename(&model.subject, &model.template_name, now, "pdf"),
        content_type: "application/pdf",
        bytes,
    };
    mark_exported(sessions, session_id, artifact).await
}

pub async fn json(
    sessions: web::Data<SessionStore>,
    session_id: web::Path<String>,
) -> impl Responder {
    respond(json_artifact(&sessions, &session_id).await)
}

async fn json_artifact(sessions: &SessionStore, session_id: &str) -> Result<Artifact, ServiceError> {
    let now = Utc::now();
    let session = sessions.snapshot(session_id).await?;
    let export = session.json_export(now)?;
    let subject = subject_name(&session.values, &session.extracted);

    let artifact = Artifact {
        filename: export_filename(&subject, &export.template_info.name, now, "json"),
        content_type: "application/json",
        bytes: export_json(&export)?.into_bytes(),
    };
    if session.step == WizardStep::Fill {
        info!("Session {} exported {} while filling", session_id, artifact.filename);
        return Ok(artifact);
    }
    mark_exported(sessions, session_id, artifact).await
}

pub async fn document(
    sessions: web::Data<SessionStore>,
    config: web::Data<AppConfig>,
    session_id: web::Path<String>,
) -> impl Responder {
    respond(layout_pdf(&sessions, &config, &session_id).await)
}

/// Draws the certificate server-side, for hosts that cannot send a snapshot.
async fn layout_pdf(
    sessions: &SessionStore,
    config: &AppConfig,
    session_id: &str,
) -> Result<Artifact, ServiceError> {
    let now = Utc::now();
    let model = sessions.snapshot(session_id).await?.compose(now)?;
    let meta = PdfMetadata::for_certificate(&model, &config.pdf_creator);
    let filename = export_filename(&model.subject, &model.template_name, now, "pdf");

    let fonts_dir = config.fonts_dir.clone();
    let bytes = tokio::task::spawn_blocking(move || render_certificate(&model, &meta, &fonts_dir))
        .await
        .map_err(|e| ExportError::Pdf(e.to_string()))??;

    let artifact = Artifact {
        filename,
        content_type: "application/pdf",
        bytes,
    };
    mark_exported(sessions, session_id, artifact).await
}
