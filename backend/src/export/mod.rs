//! Certificate artifacts.
//!
//! - `raster`: turns the host's snapshot of the rendered certificate into a
//!   pixel buffer.
//! - `pdf`: wraps that buffer into a one-page landscape PDF with document
//!   metadata.
//! - `layout`: draws a `RenderModel` directly into a PDF for hosts that cannot
//!   produce a snapshot.
//! - `json`: the structured export.
//! - `filename`: attachment names shared by every format.

pub mod filename;
pub mod json;
pub mod layout;
pub mod pdf;
pub mod raster;

use crate::error::ExportError;
use chrono::{DateTime, Utc};
use common::model::render::RenderModel;
use image::RgbImage;

/// Opaque reference to a rendered certificate as the host produced it. In
/// practice a `data:image/png;base64,...` URL.
#[derive(Debug, Clone)]
pub struct SurfaceHandle(pub String);

/// Opaque white-backed pixels ready to be embedded.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    pub pixels: RgbImage,
}

impl RenderSurface {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfMetadata {
    pub title: String,
    pub subject: String,
    pub author: String,
    pub creator: String,
    pub keywords: String,
    pub created: DateTime<Utc>,
}

impl PdfMetadata {
    pub fn for_certificate(model: &RenderModel, creator: &str) -> Self {
        Self {
            title: format!("{} - {}", model.template_name, model.subject),
            subject: model.template_name.clone(),
            author: model.company_name.clone(),
            creator: creator.to_string(),
            keywords: format!("certificate, {}, {}", model.template_name, model.certificate_id),
            created: model.issued_at,
        }
    }
}

pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, surface: &SurfaceHandle) -> Result<RenderSurface, ExportError>;
}

pub trait PdfEngine: Send + Sync {
    fn render(&self, surface: &RenderSurface, meta: &PdfMetadata) -> Result<Vec<u8>, ExportError>;
}

/// Rasterizes `surface` and embeds it in a single-page PDF.
pub fn export_pdf(
    rasterizer: &dyn Rasterizer,
    engine: &dyn PdfEngine,
    surface: &SurfaceHandle,
    meta: &PdfMetadata,
) -> Result<Vec<u8>, ExportError> {
    let raster = rasterizer.rasterize(surface)?;
    if raster.is_empty() {
        return Err(ExportError::EmptySurface);
    }
    engine.render(&raster, meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Fixed(u32, u32);

    impl Rasterizer for Fixed {
        fn rasterize(&self, _: &SurfaceHandle) -> Result<RenderSurface, ExportError> {
            Ok(RenderSurface {
                pixels: RgbImage::new(self.0, self.1),
            })
        }
    }

    struct Failing;

    impl Rasterizer for Failing {
        fn rasterize(&self, _: &SurfaceHandle) -> Result<RenderSurface, ExportError> {
            Err(ExportError::Rasterization("canvas tainted".to_string()))
        }
    }

    fn meta() -> PdfMetadata {
        PdfMetadata {
            title: "T - S".to_string(),
            subject: "T".to_string(),
            author: "A".to_string(),
            creator: "C".to_string(),
            keywords: "k".to_string(),
            created: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        let handle = SurfaceHandle(String::new());
        let err = export_pdf(&Fixed(0, 10), &pdf::LopdfEngine, &handle, &meta()).unwrap_err();
        assert!(matches!(err, ExportError::EmptySurface));
    }

    #[test]
    fn rasterizer_failure_propagates() {
        let handle = SurfaceHandle(String::new());
        let err = export_pdf(&Failing, &pdf::LopdfEngine, &handle, &meta()).unwrap_err();
        assert!(matches!(err, ExportError::Rasterization(_)));
    }

    #[test]
    fn produces_pdf_bytes() {
        let handle = SurfaceHandle(String::new());
        let bytes = export_pdf(&Fixed(40, 20), &pdf::LopdfEngine, &handle, &meta()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
