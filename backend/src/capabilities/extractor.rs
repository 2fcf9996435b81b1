use super::{CapabilityError, Extractor};
use common::model::document::{DocumentKind, UploadedDocument};
use common::model::source_data::{SourceDataBag, SourceKey};
use rayon::prelude::*;
use std::thread;
use std::time::Duration;

/// Stand-in for OCR: identity images yield a fixed passport record, PDFs a
/// fixed set of certificate numbers.
pub struct MockExtractor {
    delay: Duration,
}

impl MockExtractor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

fn passport_record() -> SourceDataBag {
    SourceDataBag::new()
        .with(SourceKey::FirstName, "John")
        .with(SourceKey::LastName, "Smith")
        .with(SourceKey::Dob, "1985-03-15")
        .with(SourceKey::Cob, "United Kingdom")
        .with(SourceKey::Citizenship, "British")
        .with(SourceKey::Passport, "P123456789")
        .with(SourceKey::Sex, "M")
        .with(SourceKey::Capacity, "Able Seaman")
}

fn certificate_record() -> SourceDataBag {
    SourceDataBag::new()
        .with(SourceKey::CertificateNoStcw, "STCW-2024-001")
        .with(SourceKey::CertificateNoH2s, "H2S-2024-045")
        .with(SourceKey::CertificateNoBoset, "BOSET-2024-078")
        .with(SourceKey::CertificateNoPalau1, "PAL-2024-112")
}

impl Extractor for MockExtractor {
    fn extract(&self, documents: &[UploadedDocument]) -> Result<SourceDataBag, CapabilityError> {
        if documents.is_empty() {
            return Err(CapabilityError::Extraction(
                "no documents to read".to_string(),
            ));
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        // Per-document reads are independent; merging keeps upload order so a
        // later document overrides an earlier one.
        let records: Vec<SourceDataBag> = documents
            .par_iter()
            .map(|doc| match doc.kind {
                DocumentKind::Image => passport_record(),
                DocumentKind::Pdf => certificate_record(),
            })
            .collect();

        let mut merged = SourceDataBag::new();
        for record in records {
            merged.merge(record);
        }
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(kind: DocumentKind) -> UploadedDocument {
        UploadedDocument {
            id: "d".to_string(),
            filename: "f".to_string(),
            mime: match kind {
                DocumentKind::Image => "image/png".to_string(),
                DocumentKind::Pdf => "application/pdf".to_string(),
            },
            kind,
            md5: "m".to_string(),
            size: 0,
            content: Vec::new(),
        }
    }

    #[test]
    fn merges_identity_and_certificate_data() {
        let extractor = MockExtractor::new(Duration::ZERO);
        let bag = extractor
            .extract(&[doc(DocumentKind::Image), doc(DocumentKind::Pdf)])
            .unwrap();
        assert_eq!(bag.get("firstName"), Some("John"));
        assert_eq!(bag.get("certificateNoStcw"), Some("STCW-2024-001"));
        assert_eq!(bag.len(), 12);
    }

    #[test]
    fn is_deterministic() {
        let extractor = MockExtractor::new(Duration::ZERO);
        let docs = [doc(DocumentKind::Image)];
        assert_eq!(extractor.extract(&docs).unwrap(), extractor.extract(&docs).unwrap());
    }

    #[test]
    fn refuses_empty_input() {
        let extractor = MockExtractor::new(Duration::ZERO);
        assert!(extractor.extract(&[]).is_err());
    }
}
