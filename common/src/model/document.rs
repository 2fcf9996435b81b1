use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

pub const ACCEPTED_DOCUMENT_MIMES: [&str; 4] =
    ["image/jpeg", "image/png", "image/jpg", "application/pdf"];
pub const ACCEPTED_ASSET_MIMES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

/// What an uploaded file is, as far as extraction cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Passport or ID photo.
    Image,
    /// Certificate scan.
    Pdf,
}

impl DocumentKind {
    /// Classifies an upload by MIME type, rejecting anything extraction cannot
    /// handle.
    pub fn classify(mime: &str, filename: &str) -> Result<DocumentKind, ValidationError> {
        let normalized = mime.trim().to_ascii_lowercase();
        if !ACCEPTED_DOCUMENT_MIMES.contains(&normalized.as_str()) {
            return Err(ValidationError::UnsupportedFileType {
                mime: mime.to_string(),
                filename: filename.to_string(),
            });
        }
        if normalized == "application/pdf" {
            Ok(DocumentKind::Pdf)
        } else {
            Ok(DocumentKind::Image)
        }
    }
}

/// Signatures, stamps and logos must be images.
pub fn ensure_asset_mime(mime: &str, filename: &str) -> Result<(), ValidationError> {
    let normalized = mime.trim().to_ascii_lowercase();
    if ACCEPTED_ASSET_MIMES.contains(&normalized.as_str()) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedFileType {
            mime: mime.to_string(),
            filename: filename.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub id: String,
    pub filename: String,
    pub mime: String,
    pub kind: DocumentKind,
    /// Hex MD5 of `content`, used to ignore repeated uploads.
    pub md5: String,
    pub size: usize,
    #[serde(skip)]
    pub content: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_images_and_pdfs() {
        assert_eq!(
            DocumentKind::classify("image/jpg", "p.jpg"),
            Ok(DocumentKind::Image)
        );
        assert_eq!(
            DocumentKind::classify("application/pdf", "c.pdf"),
            Ok(DocumentKind::Pdf)
        );
    }

    #[test]
    fn rejects_other_types() {
        let err = DocumentKind::classify("image/gif", "x.gif").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedFileType {
                mime: "image/gif".to_string(),
                filename: "x.gif".to_string()
            }
        );
        assert!(ensure_asset_mime("application/pdf", "s.pdf").is_err());
        assert!(ensure_asset_mime("image/png", "s.png").is_ok());
    }
}
