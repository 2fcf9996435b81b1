//! Multipart reading shared by every upload endpoint.

use crate::error::ServiceError;
use actix_multipart::Multipart;
use futures_util::StreamExt;
use md5::Context;

/// One part of a `multipart/form-data` body, fully buffered.
pub struct UploadedPart {
    pub name: String,
    pub filename: String,
    /// Declared content type, or a guess from the file extension.
    pub mime: String,
    pub md5: String,
    pub bytes: Vec<u8>,
}

impl UploadedPart {
    pub fn is_file(&self) -> bool {
        !self.filename.is_empty()
    }
}

pub async fn read_parts(mut payload: Multipart) -> Result<Vec<UploadedPart>, ServiceError> {
    let mut parts = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()))
            .unwrap_or_default();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        let mime = match field.content_type() {
            Some(m) if m.essence_str() != "application/octet-stream" => m.essence_str().to_string(),
            _ => mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };

        let mut hasher = Context::new();
        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            hasher.consume(&chunk);
            bytes.extend_from_slice(&chunk);
        }

        parts.push(UploadedPart {
            name,
            filename,
            mime,
            md5: format!("{:x}", hasher.finalize()),
            bytes,
        });
    }

    Ok(parts)
}
