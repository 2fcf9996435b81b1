//! Certificate templates: an ordered field list plus branding.
//!
//! The same `DocumentTemplate` value drives the fill form (field order is
//! display order), the certificate composer and the admin template builder.
//! Field mutators live here so the admin draft flow and the registry share one
//! implementation.

use crate::error::ValidationError;
use crate::model::field::{DocumentField, FieldPatch, FieldType, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Serialized form of [`TemplateBackground::Pdf`].
pub const PDF_BACKGROUND_SENTINEL: &str = "pdf-uploaded";

/// Category used when the admin leaves the template type blank.
pub const DEFAULT_TEMPLATE_TYPE: &str = "certificate";

/// Reference material a template was authored from.
///
/// A PDF reference cannot be drawn as a background, so it is kept as a
/// marker rather than a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateBackground {
    Image(String),
    Pdf,
}

impl TemplateBackground {
    /// The URL to draw behind the certificate, if any.
    pub fn renderable_url(&self) -> Option<&str> {
        match self {
            TemplateBackground::Image(url) => Some(url.as_str()),
            TemplateBackground::Pdf => None,
        }
    }
}

impl From<String> for TemplateBackground {
    fn from(value: String) -> Self {
        if value == PDF_BACKGROUND_SENTINEL {
            TemplateBackground::Pdf
        } else {
            TemplateBackground::Image(value)
        }
    }
}

impl From<TemplateBackground> for String {
    fn from(value: TemplateBackground) -> Self {
        match value {
            TemplateBackground::Image(url) => url,
            TemplateBackground::Pdf => PDF_BACKGROUND_SENTINEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    pub id: String,
    pub name: String,
    /// Free-form category tag, e.g. `certificate`, `training`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub fields: Vec<DocumentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<TemplateBackground>,
    #[serde(default)]
    pub company_info: CompanyInfo,
}

impl DocumentTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            fields: Vec::new(),
            image_url: None,
            company_info: CompanyInfo::default(),
        }
    }

    pub fn field(&self, field_id: &str) -> Option<&DocumentField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Appends a blank text field whose id and name collide with nothing
    /// already in the template.
    ///
    /// `now_millis` seeds the id (`custom-<millis>`); a numeric suffix is
    /// added when two fields are created within the same millisecond.
    pub fn add_field(&mut self, now_millis: i64) -> &DocumentField {
        let ids: HashSet<&str> = self.fields.iter().map(|f| f.id.as_str()).collect();
        let names: HashSet<&str> = self.fields.iter().map(|f| f.name.as_str()).collect();

        let base_id = format!("custom-{}", now_millis);
        let mut id = base_id.clone();
        let mut suffix = 1;
        while ids.contains(id.as_str()) {
            id = format!("{}-{}", base_id, suffix);
            suffix += 1;
        }

        let mut n = self.fields.len() + 1;
        let mut name = format!("customField{}", n);
        while names.contains(name.as_str()) {
            n += 1;
            name = format!("customField{}", n);
        }

        let field = DocumentField::new(id, name, "Custom Field")
            .with_type(FieldType::Text)
            .at(Position::at(100.0, 100.0));
        self.fields.push(field);
        &self.fields[self.fields.len() - 1]
    }

    /// Deletes the field with `field_id`, keeping the order of the rest.
    pub fn remove_field(&mut self, field_id: &str) -> Result<DocumentField, ValidationError> {
        let index = self
            .fields
            .iter()
            .position(|f| f.id == field_id)
            .ok_or_else(|| ValidationError::UnknownField(field_id.to_string()))?;
        Ok(self.fields.remove(index))
    }

    /// Like [`remove_field`](Self::remove_field), but a listed template keeps
    /// at least one field.
    pub fn remove_listed_field(&mut self, field_id: &str) -> Result<DocumentField, ValidationError> {
        if self.field(field_id).is_some() && self.fields.len() == 1 {
            return Err(ValidationError::IncompleteTemplate(format!(
                "'{}' is the last field of template '{}'",
                field_id, self.id
            )));
        }
        self.remove_field(field_id)
    }

    /// Merges `patch` into the field with `field_id`. Every other field is left
    /// untouched.
    pub fn update_field(
        &mut self,
        field_id: &str,
        patch: &FieldPatch,
    ) -> Result<&DocumentField, ValidationError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id == field_id)
            .ok_or_else(|| ValidationError::UnknownField(field_id.to_string()))?;
        patch.apply(field);
        Ok(field)
    }

    /// A template can only be filled once it has at least one field.
    pub fn ensure_fillable(&self) -> Result<(), ValidationError> {
        if self.fields.is_empty() {
            return Err(ValidationError::TemplateHasNoFields(self.id.clone()));
        }
        Ok(())
    }

    /// Checks applied when an admin draft is turned into a listed template.
    pub fn validate_for_publish(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::IncompleteTemplate(
                "template name is required".to_string(),
            ));
        }
        if self.fields.is_empty() {
            return Err(ValidationError::IncompleteTemplate(
                "at least one field must be detected or added".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ValidationError::DuplicateFieldName(field.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DocumentTemplate {
        let mut template = DocumentTemplate::new("t-1", "Basic Safety", "certificate");
        template.fields = vec![
            DocumentField::new("a", "candidateName", "Candidate Name")
                .required()
                .mapped_to("firstName")
                .at(Position::at(600.0, 375.0)),
            DocumentField::new("b", "dateOfBirth", "Date of Birth")
                .with_type(FieldType::Date)
                .mapped_to("dob"),
            DocumentField::new("c", "certificateNumber", "Certificate Number"),
        ];
        template
    }

    #[test]
    fn listed_template_keeps_its_last_field() {
        let mut template = sample();
        template.remove_listed_field("a").unwrap();
        template.remove_listed_field("b").unwrap();
        assert!(matches!(
            template.remove_listed_field("c"),
            Err(ValidationError::IncompleteTemplate(_))
        ));
        assert_eq!(template.fields.len(), 1);
        assert_eq!(
            template.remove_listed_field("zzz"),
            Err(ValidationError::UnknownField("zzz".to_string()))
        );

        template.remove_field("c").unwrap();
        assert!(template.fields.is_empty());
    }

    #[test]
    fn update_field_only_touches_matching_id() {
        let mut template = sample();
        let before = template.fields.clone();

        let patch = FieldPatch {
            label: Some("New".to_string()),
            ..FieldPatch::default()
        };
        template.update_field("b", &patch).unwrap();

        assert_eq!(template.fields[1].label, "New");
        assert_eq!(template.fields[1].name, before[1].name);
        assert_eq!(template.fields[1].field_type, before[1].field_type);
        assert_eq!(template.fields[1].mapped_to, before[1].mapped_to);
        assert_eq!(template.fields[1].position, before[1].position);
        assert_eq!(template.fields[0], before[0]);
        assert_eq!(template.fields[2], before[2]);
    }

    #[test]
    fn empty_mapping_in_patch_clears_mapping() {
        let mut template = sample();
        let patch = FieldPatch {
            mapped_to: Some(String::new()),
            ..FieldPatch::default()
        };
        let field = template.update_field("a", &patch).unwrap();
        assert_eq!(field.mapped_to, None);
    }

    #[test]
    fn update_unknown_field_leaves_template_unchanged() {
        let mut template = sample();
        let before = template.clone();
        let err = template
            .update_field("missing", &FieldPatch::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownField("missing".to_string()));
        assert_eq!(template, before);
    }

    #[test]
    fn add_field_never_collides() {
        let mut template = sample();
        template
            .fields
            .push(DocumentField::new("custom-42", "customField4", "Taken"));

        let first = template.add_field(42).clone();
        let second = template.add_field(42).clone();

        assert_eq!(first.id, "custom-42-1");
        assert_eq!(second.id, "custom-42-2");
        assert_eq!(first.name, "customField5");
        assert_eq!(second.name, "customField6");
        assert_eq!(first.label, "Custom Field");
        assert!(!first.required);
        assert!(template.validate_for_publish().is_ok());
    }

    #[test]
    fn remove_field_preserves_order() {
        let mut template = sample();
        let removed = template.remove_field("b").unwrap();
        assert_eq!(removed.name, "dateOfBirth");
        let ids: Vec<_> = template.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert!(template.remove_field("b").is_err());
    }

    #[test]
    fn publish_rejects_duplicate_names_and_empty_templates() {
        let mut template = sample();
        template.fields[2].name = "candidateName".to_string();
        assert_eq!(
            template.validate_for_publish(),
            Err(ValidationError::DuplicateFieldName(
                "candidateName".to_string()
            ))
        );

        let empty = DocumentTemplate::new("t-2", "Empty", DEFAULT_TEMPLATE_TYPE);
        assert!(matches!(
            empty.validate_for_publish(),
            Err(ValidationError::IncompleteTemplate(_))
        ));
        assert_eq!(
            empty.ensure_fillable(),
            Err(ValidationError::TemplateHasNoFields("t-2".to_string()))
        );
    }

    #[test]
    fn pdf_background_is_not_renderable() {
        let json = r#"{"id":"t","name":"T","type":"certificate","imageUrl":"pdf-uploaded","companyInfo":{"name":"Acme"}}"#;
        let template: DocumentTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.image_url, Some(TemplateBackground::Pdf));
        assert_eq!(template.image_url.unwrap().renderable_url(), None);

        let image = TemplateBackground::from("data:image/png;base64,AAAA".to_string());
        assert_eq!(image.renderable_url(), Some("data:image/png;base64,AAAA"));
    }
}
