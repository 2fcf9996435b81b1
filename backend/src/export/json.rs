use crate::error::ExportError;
use common::model::export::JsonExport;

/// Pretty-printed structured export. Needs no rasterizer or font.
pub fn export_json(artifact: &JsonExport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(artifact)?)
}
