//! Error types of the backend and their HTTP mapping.
//!
//! Handlers keep the `process` wrapper shape: run the operation, answer with
//! its value on `Ok`, or with [`ServiceError::to_response`] on `Err`.

use crate::capabilities::CapabilityError;
use actix_multipart::MultipartError;
use actix_web::HttpResponse;
use common::error::ValidationError;
use log::{error, warn};
use thiserror::Error;

/// Failures while producing an export artifact. Session state is never
/// touched when one of these is returned.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("The certificate surface has no pixels to export")]
    EmptySurface,

    #[error("Could not rasterize the certificate: {0}")]
    Rasterization(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Could not serialize the export: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No usable font family in {0}")]
    Font(String),

    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for ExportError {
    fn from(e: lopdf::Error) -> Self {
        ExportError::Pdf(e.to_string())
    }
}

impl From<genpdf::error::Error> for ExportError {
    fn from(e: genpdf::error::Error) -> Self {
        ExportError::Pdf(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid upload: {0}")]
    Upload(String),

    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl From<MultipartError> for ServiceError {
    fn from(e: MultipartError) -> Self {
        ServiceError::Upload(e.to_string())
    }
}

impl ServiceError {
    pub fn to_response(&self) -> HttpResponse {
        match self {
            ServiceError::Validation(ValidationError::UnknownTemplate(_)) | ServiceError::NotFound(_) => {
                HttpResponse::NotFound().body(self.to_string())
            }
            ServiceError::Validation(ValidationError::InvalidCredentials) => {
                HttpResponse::Unauthorized().body(self.to_string())
            }
            ServiceError::Validation(ValidationError::UnsupportedFileType { .. }) => {
                warn!("Rejected upload: {}", self);
                HttpResponse::BadRequest().body(self.to_string())
            }
            ServiceError::Validation(_) | ServiceError::Upload(_) | ServiceError::Payload(_) => {
                HttpResponse::BadRequest().body(self.to_string())
            }
            ServiceError::Export(ExportError::EmptySurface)
            | ServiceError::Export(ExportError::Rasterization(_)) => {
                warn!("Export rejected: {}", self);
                HttpResponse::UnprocessableEntity().body(self.to_string())
            }
            ServiceError::Export(_) | ServiceError::Capability(_) => {
                error!("{}", self);
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}
