use crate::model::form::FormValues;
use crate::model::source_data::SourceDataBag;
use crate::model::template::DocumentTemplate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bumped whenever the layout of [`JsonExport`] changes. `sourceData` is a
/// [`SourceDataBag`], so its key set version is part of this one.
pub const JSON_EXPORT_SCHEMA_VERSION: u32 = SourceDataBag::VERSION;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Structured certificate artifact: template identity, filled values and the
/// raw extracted data they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport {
    pub schema_version: u32,
    pub template_info: TemplateInfo,
    pub filled_data: FormValues,
    pub source_data: SourceDataBag,
    pub timestamp: DateTime<Utc>,
}

impl JsonExport {
    pub fn new(
        template: &DocumentTemplate,
        values: &FormValues,
        data: &SourceDataBag,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            schema_version: JSON_EXPORT_SCHEMA_VERSION,
            template_info: TemplateInfo {
                id: template.id.clone(),
                name: template.name.clone(),
                kind: template.kind.clone(),
            },
            filled_data: values.clone(),
            source_data: data.clone(),
            timestamp: now,
        }
    }
}
