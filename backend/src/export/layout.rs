//! Server-side certificate layout with `genpdf`.
//!
//! Used when the host cannot send a raster snapshot. The page follows the
//! same reading order as the on-screen preview: branding, title, holder,
//! detail rows, signatures and stamps, then the certificate id footer.
//!
//! The template background is not drawn: genpdf lays elements out in a flow
//! and has no page underlay.

use super::{pdf::apply_metadata, PdfMetadata};
use crate::data_url;
use crate::error::ExportError;
use common::model::render::RenderModel;
use genpdf::elements::{Break, Image as PdfImage, Paragraph};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, Size};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use log::{debug, warn};
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use std::path::Path;
use tempfile::NamedTempFile;

const IMAGE_DPI: f64 = 150.0;
/// Largest side of an embedded asset, in CSS pixels as shown in the preview.
const ASSET_MAX_CSS_PX: f64 = 120.0;

fn load_font(
    fonts_dir: &Path,
) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, ExportError> {
    // Prefer Arial when present, else LiberationSans from the same directory.
    if let Ok(family) = genpdf::fonts::from_files(fonts_dir, "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files(fonts_dir, "LiberationSans", None)
        .map_err(|e| ExportError::Font(format!("{}: {}", fonts_dir.display(), e)))
}

fn configure_document(fonts_dir: &Path, title: &str) -> Result<Document, ExportError> {
    let font_family = load_font(fonts_dir)?;
    let mut doc = Document::new(font_family);
    doc.set_title(title);
    doc.set_paper_size(Size::new(297, 210));
    doc.set_font_size(11);
    doc.set_line_spacing(1.25);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

/// Decodes an image reference, shrinks it to the preview size, flattens it
/// over white and writes a temporary PNG genpdf can embed.
fn asset_image(reference: &str, temp_files: &mut Vec<NamedTempFile>) -> Result<PdfImage, ExportError> {
    let (_, bytes) = data_url::decode(reference).map_err(ExportError::Rasterization)?;
    let img = image::load_from_memory(&bytes)?;
    let (orig_w, orig_h) = img.dimensions();

    let max_px = ASSET_MAX_CSS_PX * IMAGE_DPI / 96.0;
    let scale = (max_px / orig_w as f64).min(max_px / orig_h as f64).min(1.0);
    let resized: DynamicImage = if scale >= 1.0 {
        img
    } else {
        let new_w = (orig_w as f64 * scale).max(1.0).round() as u32;
        let new_h = (orig_h as f64 * scale).max(1.0).round() as u32;
        img.resize(new_w, new_h, FilterType::Lanczos3)
    };

    let rgba = resized.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut background = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut background, &rgba, 0, 0);
    let raw = DynamicImage::ImageRgba8(background).to_rgb8().into_raw();

    let mut tmp = NamedTempFile::new()?;
    {
        let file = tmp.as_file_mut();
        let mut encoder = PngEncoder::new(file, w, h);
        encoder.set_color(PngColorType::Rgb);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ExportError::Rasterization(e.to_string()))?;
        writer
            .write_image_data(&raw)
            .map_err(|e| ExportError::Rasterization(e.to_string()))?;
    }

    let mut element = PdfImage::from_path(tmp.path())?;
    element.set_dpi(IMAGE_DPI);
    element.set_alignment(Alignment::Center);
    temp_files.push(tmp);
    Ok(element)
}

/// Pushes every image in `references`; unreadable ones are skipped with a
/// warning so one bad asset does not sink the document.
fn push_assets(
    doc: &mut Document,
    references: &[String],
    temp_files: &mut Vec<NamedTempFile>,
) {
    for reference in references {
        match asset_image(reference, temp_files) {
            Ok(element) => doc.push(element),
            Err(e) => warn!("Skipping asset in layout PDF: {}", e),
        }
    }
}

fn completion_line(model: &RenderModel) -> String {
    format!(
        "has successfully completed the requirements for {}",
        model.template_name
    )
}

/// Renders `model` to PDF bytes and stamps `meta` into the Info dictionary.
pub fn render_certificate(
    model: &RenderModel,
    meta: &PdfMetadata,
    fonts_dir: &Path,
) -> Result<Vec<u8>, ExportError> {
    let mut doc = configure_document(fonts_dir, &meta.title)?;
    if model.background_url.is_some() {
        debug!("Layout PDF for {} drawn without its background", model.template_id);
    }

    // Keep temporary files alive until rendering finishes
    let mut temp_files: Vec<NamedTempFile> = Vec::new();

    if let Some(logo) = &model.assets.company_logo {
        push_assets(&mut doc, std::slice::from_ref(logo), &mut temp_files);
    }
    doc.push(
        Paragraph::new(model.company_name.clone())
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(14)),
    );
    doc.push(Break::new(1));
    doc.push(
        Paragraph::new(model.title.clone())
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(22)),
    );
    doc.push(Break::new(1));
    doc.push(Paragraph::new("This is to certify that").aligned(Alignment::Center));
    doc.push(
        Paragraph::new(model.subject.clone())
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(18)),
    );
    doc.push(Paragraph::new(completion_line(model)).aligned(Alignment::Center));
    doc.push(Break::new(1));

    for line in &model.details {
        let mut p = Paragraph::new("");
        p.push_styled(format!("{}: ", line.label), Style::new().bold());
        p.push(line.value.clone());
        doc.push(p.aligned(Alignment::Center));
    }
    doc.push(Break::new(1));

    push_assets(&mut doc, &model.assets.signatures, &mut temp_files);
    push_assets(&mut doc, &model.assets.stamps, &mut temp_files);
    push_assets(&mut doc, &model.assets.logos, &mut temp_files);

    doc.push(Break::new(1));
    doc.push(
        Paragraph::new(format!(
            "Certificate No: {}    Issued: {}",
            model.certificate_id, model.issued_on
        ))
        .aligned(Alignment::Center)
        .styled(Style::new().with_font_size(9)),
    );

    let mut rendered = Vec::new();
    doc.render(&mut rendered)?;

    drop(temp_files);

    let mut pdf = lopdf::Document::load_mem(&rendered)?;
    apply_metadata(&mut pdf, meta)?;
    let mut out = Vec::new();
    pdf.save_to(&mut out)?;
    Ok(out)
}
