//! Builds the description of a finished certificate.
//!
//! `compose` never mutates its inputs. The only thing that varies between two
//! calls with equal inputs is what depends on `now`.

use crate::model::assets::AssetCollection;
use crate::model::form::FormValues;
use crate::model::render::{DetailLine, RenderAssets, RenderModel};
use crate::model::source_data::{SourceDataBag, SourceKey};
use crate::model::template::DocumentTemplate;
use chrono::{DateTime, Utc};

/// Field names holding the certificate holder, checked in this order.
pub const SUBJECT_FIELDS: [&str; 3] = ["candidateName", "participantName", "seamanName"];

pub const SUBJECT_FALLBACK: &str = "Certificate Holder";
pub const MISSING_VALUE: &str = "Not provided";
pub const CERTIFICATE_ID_PREFIX: &str = "ASF-";

/// Signatures beyond this many are kept in the session but not drawn.
pub const MAX_SIGNATURES: usize = 2;

/// The certificate holder's name.
pub fn subject_name(values: &FormValues, extracted: &SourceDataBag) -> String {
    SUBJECT_FIELDS
        .iter()
        .find_map(|name| values.non_empty(name))
        .or_else(|| extracted.non_empty(SourceKey::FirstName.as_str()))
        .unwrap_or(SUBJECT_FALLBACK)
        .to_string()
}

/// Prefix plus the last eight digits of the millisecond timestamp. Two
/// certificates issued the same millisecond share an id.
pub fn certificate_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(8)..];
    format!("{}{}", CERTIFICATE_ID_PREFIX, tail)
}

pub fn compose(
    template: &DocumentTemplate,
    values: &FormValues,
    extracted: &SourceDataBag,
    assets: &AssetCollection,
    now: DateTime<Utc>,
) -> RenderModel {
    let details = template
        .fields
        .iter()
        .filter(|f| !SUBJECT_FIELDS.contains(&f.name.as_str()))
        .map(|f| DetailLine {
            label: f.label.clone(),
            value: values
                .non_empty(&f.name)
                .unwrap_or(MISSING_VALUE)
                .to_string(),
            position: f.position,
        })
        .collect();

    RenderModel {
        template_id: template.id.clone(),
        template_name: template.name.clone(),
        company_name: template.company_info.name.clone(),
        title: format!("CERTIFICATE OF {}", template.name.to_uppercase()),
        subject: subject_name(values, extracted),
        details,
        background_url: template
            .image_url
            .as_ref()
            .and_then(|bg| bg.renderable_url())
            .map(str::to_string),
        assets: RenderAssets {
            company_logo: template.company_info.logo.clone(),
            signatures: assets.signatures.iter().take(MAX_SIGNATURES).cloned().collect(),
            stamps: assets.stamps.clone(),
            logos: assets.logos.clone(),
        },
        certificate_id: certificate_id(now),
        issued_at: now,
        issued_on: now.format("%B %-d, %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::assets::AssetCategory;
    use crate::model::field::{DocumentField, Position};
    use crate::model::template::TemplateBackground;
    use chrono::TimeZone;

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap()
    }

    fn template() -> DocumentTemplate {
        let mut template = DocumentTemplate::new("bst", "Basic Safety Training", "certificate");
        template.company_info.name = "Atlantic Safety".to_string();
        template.fields = vec![
            DocumentField::new("1", "candidateName", "Candidate Name"),
            DocumentField::new("2", "certificateNumber", "Certificate Number")
                .at(Position::at(120.0, 335.0)),
            DocumentField::new("3", "seamanName", "Seaman Name"),
            DocumentField::new("4", "nationality", "Nationality"),
        ];
        template
    }

    #[test]
    fn subject_precedence() {
        let mut values = FormValues::new();
        let data = SourceDataBag::new().with(SourceKey::FirstName, "Raw");
        assert_eq!(subject_name(&values, &data), "Raw");

        values.set_value("seamanName", "S");
        assert_eq!(subject_name(&values, &data), "S");

        values.set_value("participantName", "P");
        values.set_value("candidateName", "");
        assert_eq!(subject_name(&values, &data), "P");

        values.set_value("candidateName", "C");
        assert_eq!(subject_name(&values, &data), "C");

        assert_eq!(
            subject_name(&FormValues::new(), &SourceDataBag::new()),
            SUBJECT_FALLBACK
        );
    }

    #[test]
    fn details_skip_name_fields_and_mark_missing() {
        let mut values = FormValues::new();
        values.set_value("candidateName", "Jane Doe");
        values.set_value("certificateNumber", "BST-1");

        let model = compose(
            &template(),
            &values,
            &SourceDataBag::new(),
            &AssetCollection::default(),
            clock(),
        );

        assert_eq!(model.title, "CERTIFICATE OF BASIC SAFETY TRAINING");
        assert_eq!(model.company_name, "Atlantic Safety");
        assert_eq!(model.subject, "Jane Doe");
        let rows: Vec<_> = model
            .details
            .iter()
            .map(|d| (d.label.as_str(), d.value.as_str()))
            .collect();
        assert_eq!(
            rows,
            [
                ("Certificate Number", "BST-1"),
                ("Nationality", MISSING_VALUE)
            ]
        );
        assert_eq!(model.details[0].position, Some(Position::at(120.0, 335.0)));
    }

    #[test]
    fn only_two_signatures_are_drawn() {
        let assets = AssetCollection::default()
            .upload(
                AssetCategory::Signatures,
                vec!["s1".to_string(), "s2".to_string(), "s3".to_string()],
            )
            .upload(AssetCategory::Stamps, vec!["st".to_string()]);
        let model = compose(
            &template(),
            &FormValues::new(),
            &SourceDataBag::new(),
            &assets,
            clock(),
        );
        assert_eq!(model.assets.signatures, vec!["s1", "s2"]);
        assert_eq!(model.assets.stamps, vec!["st"]);
        assert_eq!(assets.signatures.len(), 3);
    }

    #[test]
    fn pdf_reference_is_never_a_background() {
        let mut tpl = template();
        tpl.image_url = Some(TemplateBackground::Pdf);
        let model = compose(
            &tpl,
            &FormValues::new(),
            &SourceDataBag::new(),
            &AssetCollection::default(),
            clock(),
        );
        assert_eq!(model.background_url, None);

        tpl.image_url = Some(TemplateBackground::Image("data:image/png;base64,AA".to_string()));
        let model = compose(
            &tpl,
            &FormValues::new(),
            &SourceDataBag::new(),
            &AssetCollection::default(),
            clock(),
        );
        assert_eq!(model.background_url.as_deref(), Some("data:image/png;base64,AA"));
    }

    #[test]
    fn certificate_id_uses_clock() {
        let now = clock();
        let millis = now.timestamp_millis().to_string();
        let model = compose(
            &template(),
            &FormValues::new(),
            &SourceDataBag::new(),
            &AssetCollection::default(),
            now,
        );
        assert_eq!(model.certificate_id, format!("ASF-{}", &millis[millis.len() - 8..]));
        assert_eq!(model.issued_on, "March 5, 2024");
    }
}
