//! Pluggable services behind the slow wizard steps.
//!
//! Every trait here is synchronous. Callers run them inside
//! `tokio::task::spawn_blocking` through the job controller, so an
//! implementation is free to block (the mocks sleep, a real OCR client would
//! wait on the network).
//!
//! The mocks are deterministic: same input, same output. A real backend only
//! needs to implement the trait and be handed to [`Capabilities`] in `main.rs`.

pub mod background;
pub mod credentials;
pub mod detector;
pub mod extractor;

use crate::config::AppConfig;
use crate::export::pdf::LopdfEngine;
use crate::export::raster::DataUrlRasterizer;
use crate::export::{PdfEngine, Rasterizer};
use common::error::ValidationError;
use common::model::document::UploadedDocument;
use common::model::field::DocumentField;
use common::model::source_data::SourceDataBag;
use common::model::template::TemplateBackground;
use common::requests::Role;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("Data extraction failed: {0}")]
    Extraction(String),

    #[error("Field detection failed: {0}")]
    Detection(String),

    #[error("Background removal failed: {0}")]
    BackgroundRemoval(String),
}

/// Reads identity and certificate data out of uploaded documents.
pub trait Extractor: Send + Sync {
    fn extract(&self, documents: &[UploadedDocument]) -> Result<SourceDataBag, CapabilityError>;
}

/// Finds fillable fields on a template reference.
pub trait FieldDetector: Send + Sync {
    fn detect(&self, reference: &TemplateBackground) -> Result<Vec<DocumentField>, CapabilityError>;
}

/// Turns an image reference into one with a transparent background.
/// `progress` receives percentages in increasing order.
pub trait BackgroundRemover: Send + Sync {
    fn remove_background(
        &self,
        image: &str,
        progress: &dyn Fn(u32),
    ) -> Result<String, CapabilityError>;
}

pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Option<Role>;

    fn change_password(
        &mut self,
        username: &str,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), ValidationError>;
}

/// Every injectable collaborator, shared as `web::Data<Capabilities>`.
#[derive(Clone)]
pub struct Capabilities {
    pub extractor: Arc<dyn Extractor>,
    pub detector: Arc<dyn FieldDetector>,
    pub background: Arc<dyn BackgroundRemover>,
    pub rasterizer: Arc<dyn Rasterizer>,
    pub pdf_engine: Arc<dyn PdfEngine>,
    pub credentials: Arc<RwLock<dyn CredentialVerifier>>,
}

impl Capabilities {
    /// Mock collaborators wired with the delays and accounts from `config`.
    pub fn mocks(config: &AppConfig) -> Self {
        let credentials: Arc<RwLock<dyn CredentialVerifier>> = Arc::new(RwLock::new(
            credentials::ConfiguredCredentials::from_config(config),
        ));
        Self {
            extractor: Arc::new(extractor::MockExtractor::new(config.extraction_delay)),
            detector: Arc::new(detector::MockFieldDetector::new(config.detection_delay)),
            background: Arc::new(background::StagedBackgroundRemover::new(
                background::LumaKeyRemover::default(),
                config.background_step_delay,
            )),
            rasterizer: Arc::new(DataUrlRasterizer::default()),
            pdf_engine: Arc::new(LopdfEngine),
            credentials,
        }
    }
}
