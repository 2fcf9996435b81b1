use super::{CapabilityError, FieldDetector};
use crate::registry::builtin::standard_certificate_fields;
use common::model::field::DocumentField;
use common::model::template::TemplateBackground;
use std::thread;
use std::time::Duration;

/// Stand-in for layout analysis: every reference yields the fields of a
/// standard safety-training certificate.
pub struct MockFieldDetector {
    delay: Duration,
}

impl MockFieldDetector {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl FieldDetector for MockFieldDetector {
    fn detect(&self, _reference: &TemplateBackground) -> Result<Vec<DocumentField>, CapabilityError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(standard_certificate_fields())
    }
}
