use crate::model::field::Position;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One `label: value` row of the certificate body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailLine {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Images drawn on the certificate, grouped as they are laid out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderAssets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    pub signatures: Vec<String>,
    pub stamps: Vec<String>,
    pub logos: Vec<String>,
}

/// Everything a host needs to draw one certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub template_id: String,
    pub template_name: String,
    pub company_name: String,
    pub title: String,
    pub subject: String,
    pub details: Vec<DetailLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_url: Option<String>,
    pub assets: RenderAssets,
    pub certificate_id: String,
    pub issued_at: DateTime<Utc>,
    /// `issued_at` as printed on the certificate.
    pub issued_on: String,
}
