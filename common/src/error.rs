//! Validation failures shared by every wizard step.
//!
//! A `ValidationError` never leaves state half-updated: the operation that
//! produced it is simply not applied, and the caller reports the message to
//! the user and stays on the current step.

use crate::model::assets::AssetCategory;
use crate::model::wizard::WizardStep;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required fields are empty. Holds their labels in template order.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("Unsupported file type '{mime}' for '{filename}': upload a JPEG, PNG or PDF file")]
    UnsupportedFileType { mime: String, filename: String },

    #[error("Upload at least one document before extracting data")]
    NoDocuments,

    /// The held documents changed while an extraction was running.
    #[error("Documents changed during extraction; extract again")]
    StaleExtraction,

    #[error("Template '{0}' has no fields to fill")]
    TemplateHasNoFields(String),

    #[error("Template '{0}' not found")]
    UnknownTemplate(String),

    #[error("Field '{0}' not found in template")]
    UnknownField(String),

    #[error("Field name '{0}' is used more than once")]
    DuplicateFieldName(String),

    #[error("Template is incomplete: {0}")]
    IncompleteTemplate(String),

    #[error("Cannot {action} while on the {step} step")]
    InvalidStep {
        step: WizardStep,
        action: &'static str,
    },

    #[error("No {category} asset at index {index}")]
    AssetIndex {
        category: AssetCategory,
        index: usize,
    },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    PasswordPolicy(String),
}
