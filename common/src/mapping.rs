//! Pre-fills form values from extracted data.

use crate::model::field::DocumentField;
use crate::model::form::FormValues;
use crate::model::source_data::SourceDataBag;
use serde::{Deserialize, Serialize};

/// A mapped field that the extracted data could not fill. The user has to
/// type it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingGap {
    pub field_name: String,
    pub mapped_to: String,
}

/// Initial form values for `fields`.
///
/// A field gets a value only when it is mapped and the mapped key holds a
/// non-empty string. Several fields may map to the same key; each of them is
/// filled. Calling this twice with the same inputs gives equal results.
pub fn resolve_initial_values(fields: &[DocumentField], data: &SourceDataBag) -> FormValues {
    fields
        .iter()
        .filter_map(|field| {
            let key = field.mapped_to.as_deref()?;
            let value = data.non_empty(key)?;
            Some((field.name.clone(), value.to_string()))
        })
        .collect()
}

/// Mapped fields left empty by [`resolve_initial_values`], in field order.
pub fn find_mapping_gaps(fields: &[DocumentField], data: &SourceDataBag) -> Vec<MappingGap> {
    fields
        .iter()
        .filter_map(|field| {
            let key = field.mapped_to.as_deref()?;
            match data.non_empty(key) {
                Some(_) => None,
                None => Some(MappingGap {
                    field_name: field.name.clone(),
                    mapped_to: key.to_string(),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::source_data::SourceKey;

    #[test]
    fn resolution_is_pure() {
        let fields = vec![DocumentField::new("1", "a", "A").mapped_to("firstName")];
        let data = SourceDataBag::new().with(SourceKey::FirstName, "Jane");
        let before = (fields.clone(), data.clone());

        let first = resolve_initial_values(&fields, &data);
        let second = resolve_initial_values(&fields, &data);

        assert_eq!(first, second);
        assert_eq!(before, (fields, data));
    }

    #[test]
    fn only_non_empty_mapped_values_are_taken() {
        let fields = vec![
            DocumentField::new("1", "a", "A").mapped_to("firstName"),
            DocumentField::new("2", "b", "B").mapped_to("lastName"),
            DocumentField::new("3", "c", "C"),
        ];
        let data = SourceDataBag::new()
            .with(SourceKey::FirstName, "Jane")
            .with(SourceKey::LastName, "");

        let values = resolve_initial_values(&fields, &data);
        assert_eq!(values.get("a"), Some("Jane"));
        assert_eq!(values.get("b"), None);
        assert_eq!(values.get("c"), None);
        assert_eq!(values.len(), 1);

        assert_eq!(
            find_mapping_gaps(&fields, &data),
            vec![MappingGap {
                field_name: "b".to_string(),
                mapped_to: "lastName".to_string()
            }]
        );
    }

    #[test]
    fn shared_mapping_target_fills_every_field() {
        let fields = vec![
            DocumentField::new("1", "holder", "Holder").mapped_to("passport"),
            DocumentField::new("2", "reference", "Reference").mapped_to("passport"),
        ];
        let data = SourceDataBag::new().with(SourceKey::Passport, "P-9");
        let values = resolve_initial_values(&fields, &data);
        assert_eq!(values.get("holder"), Some("P-9"));
        assert_eq!(values.get("reference"), Some("P-9"));
    }

    #[test]
    fn extra_keys_can_be_mapped() {
        let fields = vec![DocumentField::new("1", "vessel", "Vessel").mapped_to("vesselName")];
        let mut data = SourceDataBag::new();
        data.insert("vesselName", "Aurora");
        assert_eq!(
            resolve_initial_values(&fields, &data).get("vessel"),
            Some("Aurora")
        );
    }
}
