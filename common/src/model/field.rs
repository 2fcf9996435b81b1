use serde::{Deserialize, Serialize};

/// Input type of a template field. Drives the editor widget only; values are
/// always stored as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Date,
    Number,
}

/// Where a field sits on the template's reference image, in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Position {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
        }
    }
}

/// One fillable slot of a [`DocumentTemplate`](super::template::DocumentTemplate).
///
/// `name` is the form key and is unique inside its template. `id` is the
/// stable handle used by the edit/remove operations, so renaming a field never
/// changes which entry an editor is pointing at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentField {
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Key into the extracted [`SourceDataBag`](super::source_data::SourceDataBag).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl DocumentField {
    pub fn new(id: impl Into<String>, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            label: label.into(),
            field_type: FieldType::Text,
            required: false,
            mapped_to: None,
            position: None,
        }
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn mapped_to(mut self, key: impl Into<String>) -> Self {
        self.mapped_to = Some(key.into());
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Partial update applied by `DocumentTemplate::update_field`.
///
/// An empty `mapped_to` string clears the mapping ("No mapping" in the admin
/// editor); `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub mapped_to: Option<String>,
}

impl FieldPatch {
    pub(crate) fn apply(&self, field: &mut DocumentField) {
        if let Some(label) = &self.label {
            field.label = label.clone();
        }
        if let Some(field_type) = self.field_type {
            field.field_type = field_type;
        }
        if let Some(mapped_to) = &self.mapped_to {
            field.mapped_to = if mapped_to.is_empty() {
                None
            } else {
                Some(mapped_to.clone())
            };
        }
    }
}
