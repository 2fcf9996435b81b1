//! One user's walk through the certificate wizard.
//!
//! Every transition checks the current [`WizardStep`] first and returns
//! [`ValidationError`] without touching any state when the move is not
//! allowed.

use crate::compose;
use crate::error::ValidationError;
use crate::mapping::{self, MappingGap};
use crate::model::assets::{AssetCategory, AssetCollection};
use crate::model::document::UploadedDocument;
use crate::model::export::JsonExport;
use crate::model::form::{self, FormValues};
use crate::model::render::RenderModel;
use crate::model::source_data::SourceDataBag;
use crate::model::template::DocumentTemplate;
use crate::model::wizard::WizardStep;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ASSET_STEPS: [WizardStep; 2] = [WizardStep::Preview, WizardStep::Export];
const JSON_EXPORT_STEPS: [WizardStep; 3] =
    [WizardStep::Fill, WizardStep::Preview, WizardStep::Export];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub step: WizardStep,
    pub documents: Vec<UploadedDocument>,
    pub extracted: SourceDataBag,
    /// Copy of the template taken at selection time. Later edits to the
    /// registry do not leak into a session that is already filling.
    pub template: Option<DocumentTemplate>,
    pub values: FormValues,
    pub mapping_gaps: Vec<MappingGap>,
    pub assets: AssetCollection,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            step: WizardStep::Upload,
            documents: Vec::new(),
            extracted: SourceDataBag::new(),
            template: None,
            values: FormValues::new(),
            mapping_gaps: Vec::new(),
            assets: AssetCollection::default(),
        }
    }

    fn require(&self, allowed: &[WizardStep], action: &'static str) -> Result<(), ValidationError> {
        if allowed.contains(&self.step) {
            Ok(())
        } else {
            Err(ValidationError::InvalidStep {
                step: self.step,
                action,
            })
        }
    }

    fn selected_template(&self, action: &'static str) -> Result<&DocumentTemplate, ValidationError> {
        self.template.as_ref().ok_or(ValidationError::InvalidStep {
            step: self.step,
            action,
        })
    }

    /// Stores an uploaded document. Returns `false` when a document with the
    /// same content is already held.
    pub fn add_document(&mut self, document: UploadedDocument) -> Result<bool, ValidationError> {
        self.require(&[WizardStep::Upload, WizardStep::Review], "upload documents")?;
        if self.documents.iter().any(|d| d.md5 == document.md5) {
            return Ok(false);
        }
        self.documents.push(document);
        Ok(true)
    }

    /// Checked before an extraction job is scheduled.
    pub fn ensure_can_extract(&self) -> Result<(), ValidationError> {
        self.require(&[WizardStep::Upload, WizardStep::Review], "extract data")?;
        if self.documents.is_empty() {
            return Err(ValidationError::NoDocuments);
        }
        Ok(())
    }

    /// MD5 of every held document, in upload order.
    pub fn document_fingerprints(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.md5.clone()).collect()
    }

    /// Replaces the extracted data with the result of an extraction over the
    /// documents fingerprinted by `read`. Refused when the held documents are
    /// no longer exactly those.
    pub fn apply_extraction(
        &mut self,
        data: SourceDataBag,
        read: &[String],
    ) -> Result<(), ValidationError> {
        self.ensure_can_extract()?;
        if !self.documents.iter().map(|d| d.md5.as_str()).eq(read.iter().map(String::as_str)) {
            return Err(ValidationError::StaleExtraction);
        }
        self.extracted = data;
        self.step = WizardStep::Review;
        Ok(())
    }

    pub fn confirm_review(&mut self) -> Result<(), ValidationError> {
        self.require(&[WizardStep::Review], "confirm extracted data")?;
        self.step = WizardStep::SelectTemplate;
        Ok(())
    }

    /// Selects `template` and pre-fills the form from the extracted data.
    /// Mapped fields the data could not fill are returned.
    pub fn select_template(
        &mut self,
        template: DocumentTemplate,
    ) -> Result<&[MappingGap], ValidationError> {
        self.require(&[WizardStep::SelectTemplate], "select a template")?;
        template.ensure_fillable()?;

        self.values = mapping::resolve_initial_values(&template.fields, &self.extracted);
        self.mapping_gaps = mapping::find_mapping_gaps(&template.fields, &self.extracted);
        self.template = Some(template);
        self.step = WizardStep::Fill;
        Ok(&self.mapping_gaps)
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), ValidationError> {
        self.require(&[WizardStep::Fill, WizardStep::Preview], "edit field values")?;
        let template = self.selected_template("edit field values")?;
        if !template.fields.iter().any(|f| f.name == name) {
            return Err(ValidationError::UnknownField(name.to_string()));
        }
        self.values.set_value(name, value);
        Ok(())
    }

    /// Labels of required fields still empty. Empty before a template is
    /// selected.
    pub fn missing_required(&self) -> Vec<String> {
        match &self.template {
            Some(template) => form::validate_required(&template.fields, &self.values),
            None => Vec::new(),
        }
    }

    pub fn proceed_to_preview(&mut self) -> Result<(), ValidationError> {
        self.require(&[WizardStep::Fill], "open the preview")?;
        let template = self.selected_template("open the preview")?;
        form::ensure_required(&template.fields, &self.values)?;
        self.step = WizardStep::Preview;
        Ok(())
    }

    pub fn upload_assets(
        &mut self,
        category: AssetCategory,
        images: Vec<String>,
    ) -> Result<&AssetCollection, ValidationError> {
        self.require(&ASSET_STEPS, "upload assets")?;
        self.assets = self.assets.upload(category, images);
        Ok(&self.assets)
    }

    pub fn remove_asset(
        &mut self,
        category: AssetCategory,
        index: usize,
    ) -> Result<&AssetCollection, ValidationError> {
        self.require(&ASSET_STEPS, "remove assets")?;
        self.assets = self.assets.remove(category, index)?;
        Ok(&self.assets)
    }

    /// Swaps `old` for `new`. Missing `old` is not an error; the asset may have
    /// been removed while a background-removal job was running.
    pub fn replace_asset(
        &mut self,
        category: AssetCategory,
        old: &str,
        new: String,
    ) -> Result<&AssetCollection, ValidationError> {
        self.require(&ASSET_STEPS, "replace assets")?;
        self.assets = self.assets.replace(category, old, new);
        Ok(&self.assets)
    }

    pub fn compose(&self, now: DateTime<Utc>) -> Result<RenderModel, ValidationError> {
        self.require(&ASSET_STEPS, "render the certificate")?;
        let template = self.selected_template("render the certificate")?;
        Ok(compose::compose(
            template,
            &self.values,
            &self.extracted,
            &self.assets,
            now,
        ))
    }

    /// Available from `Fill` onwards; the required fields must be set.
    pub fn json_export(&self, now: DateTime<Utc>) -> Result<JsonExport, ValidationError> {
        self.require(&JSON_EXPORT_STEPS, "export")?;
        let template = self.selected_template("export")?;
        form::ensure_required(&template.fields, &self.values)?;
        Ok(JsonExport::new(template, &self.values, &self.extracted, now))
    }

    pub fn mark_exported(&mut self) -> Result<(), ValidationError> {
        self.require(&ASSET_STEPS, "export")?;
        self.step = WizardStep::Export;
        Ok(())
    }

    /// Steps back once.
    ///
    /// Leaving `Review` discards the documents and extracted data. Leaving
    /// `Fill` discards the selected template and its values. Assets survive
    /// until the session restarts.
    pub fn back(&mut self) -> Result<WizardStep, ValidationError> {
        let previous = self.step.previous().ok_or(ValidationError::InvalidStep {
            step: self.step,
            action: "go back",
        })?;
        match self.step {
            WizardStep::Review => {
                self.documents.clear();
                self.extracted = SourceDataBag::new();
            }
            WizardStep::Fill => {
                self.template = None;
                self.values = FormValues::new();
                self.mapping_gaps.clear();
            }
            _ => {}
        }
        self.step = previous;
        Ok(previous)
    }

    pub fn restart(&mut self) {
        *self = Session::new(std::mem::take(&mut self.id));
    }
}
