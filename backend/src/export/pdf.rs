use super::{PdfEngine, PdfMetadata, RenderSurface};
use crate::error::ExportError;
use image::codecs::jpeg::JpegEncoder;
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

/// A4 landscape, in points.
pub const PAGE_WIDTH: i64 = 842;
pub const PAGE_HEIGHT: i64 = 595;
const JPEG_QUALITY: u8 = 92;

/// Where the raster lands on the page, in points from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Largest box with the image's aspect ratio that fits the page, centered.
pub fn letterbox(img_w: u32, img_h: u32, page_w: f64, page_h: f64) -> Placement {
    let scale = (page_w / img_w as f64).min(page_h / img_h as f64);
    let width = img_w as f64 * scale;
    let height = img_h as f64 * scale;
    Placement {
        x: (page_w - width) / 2.0,
        y: (page_h - height) / 2.0,
        width,
        height,
    }
}

/// PDF text string: literal for ASCII, UTF-16BE with BOM otherwise.
fn pdf_text(text: &str) -> Object {
    if text.is_ascii() {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

fn info_entries(meta: &PdfMetadata) -> [(&'static str, Object); 7] {
    let created = meta.created.format("D:%Y%m%d%H%M%SZ").to_string();
    [
        ("Title", pdf_text(&meta.title)),
        ("Subject", pdf_text(&meta.subject)),
        ("Author", pdf_text(&meta.author)),
        ("Creator", pdf_text(&meta.creator)),
        ("Producer", pdf_text(&meta.creator)),
        ("Keywords", pdf_text(&meta.keywords)),
        (
            "CreationDate",
            Object::String(created.into_bytes(), StringFormat::Literal),
        ),
    ]
}

/// Sets the Info dictionary of an existing document, creating it if needed.
pub fn apply_metadata(doc: &mut Document, meta: &PdfMetadata) -> Result<(), ExportError> {
    let info_id = match doc.trailer.get(b"Info").and_then(|o| o.as_reference()) {
        Ok(id) => id,
        Err(_) => {
            let new_info = doc.add_object(Object::Dictionary(dictionary! {}));
            doc.trailer.set("Info", new_info);
            new_info
        }
    };
    let info = doc.get_object_mut(info_id).and_then(|o| o.as_dict_mut())?;
    for (key, value) in info_entries(meta) {
        info.set(key, value);
    }
    Ok(())
}

/// Embeds the raster as a JPEG image XObject on one A4 landscape page.
pub struct LopdfEngine;

impl PdfEngine for LopdfEngine {
    fn render(&self, surface: &RenderSurface, meta: &PdfMetadata) -> Result<Vec<u8>, ExportError> {
        if surface.is_empty() {
            return Err(ExportError::EmptySurface);
        }
        let (img_w, img_h) = (surface.width(), surface.height());

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY).encode_image(&surface.pixels)?;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => img_w as i64,
                "Height" => img_h as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        let place = letterbox(img_w, img_h, PAGE_WIDTH as f64, PAGE_HEIGHT as f64);
        let content = format!(
            "q {:.3} 0 0 {:.3} {:.3} {:.3} cm /Im0 Do Q",
            place.width, place.height, place.x, place.y
        );
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        apply_metadata(&mut doc, meta)?;

        let mut out = Vec::new();
        doc.save_to(&mut out)?;
        Ok(out)
    }
}
