use common::model::field::{DocumentField, FieldType, Position};
use common::model::template::{CompanyInfo, DocumentTemplate};

pub const BASIC_SAFETY_ID: &str = "basic-safety-training";

/// Fields of the standard safety-training certificate layout, in reading
/// order. Positions are pixels on the reference scan.
pub fn standard_certificate_fields() -> Vec<DocumentField> {
    vec![
        DocumentField::new("cert-num", "certificateNumber", "Certificate Number")
            .required()
            .at(Position::at(120.0, 335.0)),
        DocumentField::new("candidate-name", "candidateName", "Candidate Name")
            .required()
            .mapped_to("firstName")
            .at(Position::at(600.0, 375.0)),
        DocumentField::new("date-birth", "dateOfBirth", "Date of Birth")
            .with_type(FieldType::Date)
            .required()
            .mapped_to("dob")
            .at(Position::at(220.0, 415.0)),
        DocumentField::new("passport-no", "passportNumber", "Passport Number")
            .required()
            .mapped_to("passport")
            .at(Position::at(555.0, 415.0)),
        DocumentField::new("nationality", "nationality", "Nationality")
            .required()
            .mapped_to("citizenship")
            .at(Position::at(830.0, 415.0)),
        DocumentField::new("date-issue", "dateOfIssue", "Date of Issue")
            .with_type(FieldType::Date)
            .required()
            .at(Position::at(540.0, 700.0)),
        DocumentField::new("date-expiry", "dateOfExpiry", "Date of Expiry")
            .with_type(FieldType::Date)
            .required()
            .at(Position::at(750.0, 700.0)),
    ]
}

/// Templates available before any admin has authored one.
pub fn builtin_templates(company_name: &str) -> Vec<DocumentTemplate> {
    let mut basic = DocumentTemplate::new(
        BASIC_SAFETY_ID,
        "Basic Safety Training Certificate",
        "certificate",
    );
    basic.fields = standard_certificate_fields();
    basic.company_info = CompanyInfo {
        name: company_name.to_string(),
        logo: None,
        signature: None,
    };
    vec![basic]
}
