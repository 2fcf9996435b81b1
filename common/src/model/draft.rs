use crate::error::ValidationError;
use crate::model::field::DocumentField;
use crate::model::template::{CompanyInfo, DocumentTemplate, TemplateBackground, DEFAULT_TEMPLATE_TYPE};
use serde::{Deserialize, Serialize};

/// A template being authored in the admin area. It only becomes visible to
/// users once [`finalize`](TemplateDraft::finalize) succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDraft {
    pub template: DocumentTemplate,
    /// Whether field detection has run at least once.
    pub detected: bool,
}

impl TemplateDraft {
    pub fn new(
        id: impl Into<String>,
        name: &str,
        kind: Option<&str>,
        reference: TemplateBackground,
        company_name: &str,
    ) -> Self {
        let kind = kind
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(DEFAULT_TEMPLATE_TYPE);
        let mut template = DocumentTemplate::new(id, name.trim(), kind);
        template.image_url = Some(reference);
        template.company_info = CompanyInfo {
            name: company_name.to_string(),
            logo: None,
            signature: None,
        };
        Self {
            template,
            detected: false,
        }
    }

    pub fn reference(&self) -> Option<&TemplateBackground> {
        self.template.image_url.as_ref()
    }

    /// Replaces the field list with a detection result.
    pub fn apply_detection(&mut self, fields: Vec<DocumentField>) {
        self.template.fields = fields;
        self.detected = true;
    }

    /// The finished template, if it passes the publish checks.
    pub fn finalize(&self) -> Result<DocumentTemplate, ValidationError> {
        self.template.validate_for_publish()?;
        Ok(self.template.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_type_falls_back_to_certificate() {
        let draft = TemplateDraft::new("d", " STCW ", Some("  "), TemplateBackground::Pdf, "Acme");
        assert_eq!(draft.template.kind, DEFAULT_TEMPLATE_TYPE);
        assert_eq!(draft.template.name, "STCW");
        assert_eq!(draft.template.company_info.name, "Acme");
        assert_eq!(draft.reference(), Some(&TemplateBackground::Pdf));
    }

    #[test]
    fn finalize_needs_fields() {
        let mut draft = TemplateDraft::new("d", "STCW", Some("training"), TemplateBackground::Pdf, "Acme");
        assert!(draft.finalize().is_err());

        draft.apply_detection(vec![DocumentField::new("1", "a", "A")]);
        let template = draft.finalize().unwrap();
        assert_eq!(template.kind, "training");
        assert_eq!(template.fields.len(), 1);
        assert!(draft.detected);
    }
}
