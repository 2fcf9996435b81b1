use serde::{Deserialize, Serialize};
use std::fmt;

/// Steps of the certificate wizard, in the order a user walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    #[default]
    Upload,
    Review,
    SelectTemplate,
    Fill,
    Preview,
    Export,
}

impl WizardStep {
    /// The step a "back" action returns to. `Upload` has no predecessor.
    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Upload => None,
            WizardStep::Review => Some(WizardStep::Upload),
            WizardStep::SelectTemplate => Some(WizardStep::Review),
            WizardStep::Fill => Some(WizardStep::SelectTemplate),
            WizardStep::Preview => Some(WizardStep::Fill),
            WizardStep::Export => Some(WizardStep::Preview),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::Upload => "upload",
            WizardStep::Review => "review",
            WizardStep::SelectTemplate => "template selection",
            WizardStep::Fill => "fill",
            WizardStep::Preview => "preview",
            WizardStep::Export => "export",
        };
        f.write_str(name)
    }
}
