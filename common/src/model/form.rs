use crate::error::ValidationError;
use crate::model::field::DocumentField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current value of every template field the user or the resolver has set,
/// keyed by field `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the value for `name`. Last write wins.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        FormValues(iter.into_iter().collect())
    }
}

/// Labels of required fields whose value is absent or empty, in field order.
pub fn validate_required(fields: &[DocumentField], values: &FormValues) -> Vec<String> {
    fields
        .iter()
        .filter(|f| f.required && values.non_empty(&f.name).is_none())
        .map(|f| f.label.clone())
        .collect()
}

pub fn ensure_required(fields: &[DocumentField], values: &FormValues) -> Result<(), ValidationError> {
    let missing = validate_required(fields, values);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingRequired(missing))
    }
}
