//! Request and response payloads of the HTTP API.

use crate::mapping::MappingGap;
use crate::model::form::FormValues;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// `json` part of the admin draft upload.
#[derive(Debug, Deserialize, Serialize)]
pub struct NewDraftRequest {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTemplateRequest {
    pub template_id: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTemplateResponse {
    pub values: FormValues,
    pub mapping_gaps: Vec<MappingGap>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SetValueRequest {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ValidationResponse {
    pub valid: bool,
    pub missing: Vec<String>,
}

/// Raster snapshot of the rendered certificate, as a `data:` URL.
#[derive(Debug, Deserialize, Serialize)]
pub struct ExportPdfRequest {
    pub surface: String,
}

/// Asset whose background should be removed.
#[derive(Debug, Deserialize, Serialize)]
pub struct RemoveBackgroundRequest {
    pub image: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct JobAccepted {
    pub job_id: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct MappingOption {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UploadSummary {
    pub accepted: usize,
    pub duplicates: usize,
}
