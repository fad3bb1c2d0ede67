use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use idcheck::models::{DocumentType, FieldSource, RegistryRecord, VerificationInput};
use idcheck::processing::{InputFormat, OcrEngine};
use idcheck::utils::{ExtractionError, IdCheckError};
use idcheck::verification::{RegistryError, RegistryLookup};
use idcheck::{Comparator, DocumentVerifier, IdentityExtractor};

const AADHAAR_FRONT: &str = "भारत सरकार
Government of India
प्रिया शर्मा
Priya Sharma
जन्म तिथि / DOB: 14/02/1988
महिला / FEMALE
2345 6789 0123
मेरा आधार, मेरी पहचान";

const PAN_FRONT: &str = "INCOME TAX DEPARTMENT
GOVT. OF INDIA
Permanent Account Number Card
ABCDE1234F
Name
ROHAN KUMAR
Father's Name
SURESH KUMAR
Date of Birth
05/06/1990";

struct CannedOcr(&'static str);

impl OcrEngine for CannedOcr {
    fn extract_text(&self, _file_data: &[u8], _format: InputFormat) -> Result<String, IdCheckError> {
        Ok(self.0.to_string())
    }
}

struct CountingRegistry {
    calls: Arc<AtomicUsize>,
    result: Result<RegistryRecord, RegistryError>,
}

impl RegistryLookup for CountingRegistry {
    fn verify_identifier(&self, _identifier: &str) -> Result<RegistryRecord, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

fn registry(result: Result<RegistryRecord, RegistryError>) -> (IdentityExtractor, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let lookup = CountingRegistry {
        calls: Arc::clone(&calls),
        result,
    };
    (IdentityExtractor::with_registry(Box::new(lookup)), calls)
}

fn input(name: &str, dob: &str, gender: &str) -> VerificationInput {
    VerificationInput {
        name: name.to_string(),
        date_of_birth: dob.to_string(),
        gender: gender.to_string(),
    }
}

#[test]
fn aadhaar_card_verifies_against_matching_assertions() {
    let verifier = DocumentVerifier::new(Box::new(CannedOcr(AADHAAR_FRONT)), IdentityExtractor::new());
    let report = verifier.process_bytes(b"jpeg bytes", InputFormat::Jpeg, DocumentType::Aadhaar);

    assert!(report.record.recognized);
    assert_eq!(report.record.identifier.as_deref(), Some("234567890123"));
    assert_eq!(report.record.name.as_deref(), Some("Priya Sharma"));
    assert_eq!(report.record.date_of_birth.as_deref(), Some("14/02/1988"));
    assert_eq!(report.record.gender.as_deref(), Some("female"));

    let report = DocumentVerifier::verify(report, &input("Priya", "1988-02-14", "F"));
    let verdict = report.verdict.expect("verdict");
    assert!(verdict.matched, "{}", verdict.explanation());
    assert!(verdict.reasons.is_empty());
}

#[test]
fn mismatched_fields_are_reported_individually() {
    let record = IdentityExtractor::new().extract(DocumentType::Aadhaar, AADHAAR_FRONT);
    let verdict = Comparator::compare(&input("Priya Sharma", "15/02/1988", "male"), &record);

    assert!(verdict.name_match);
    assert!(!verdict.dob_match);
    assert!(!verdict.gender_match);
    assert!(!verdict.matched);
    assert_eq!(verdict.reasons.len(), 2);
    assert!(verdict.reasons[0].starts_with("Date of birth mismatch"));
    assert!(verdict.reasons[1].starts_with("Gender mismatch"));
}

#[test]
fn missing_fields_never_match() {
    let text = "Government of India\n2345 6789 0123";
    let record = IdentityExtractor::new().extract(DocumentType::Aadhaar, text);
    assert!(record.recognized);
    assert_eq!(record.name, None);

    let verdict = Comparator::compare(&input("Priya Sharma", "14/02/1988", "female"), &record);
    assert!(!verdict.matched);
    assert_eq!(verdict.reasons.len(), 3);
    assert!(verdict.explanation().contains("Name could not be extracted from the document"));
}

#[test]
fn aadhaar_text_is_not_a_pan_card() {
    let (extractor, calls) = registry(Err(RegistryError::Timeout));
    let record = extractor.extract(DocumentType::Pan, AADHAAR_FRONT);
    assert_eq!(record.error, Some(ExtractionError::WrongDocumentType(DocumentType::Pan)));
    assert_eq!(record.error.unwrap().to_string(), "this does not appear to be a PAN card");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn pan_fields_come_from_the_registry() {
    let confirmed = RegistryRecord {
        name: "ROHAN KUMAR".to_string(),
        date_of_birth: "1990-06-05".to_string(),
        gender: "male".to_string(),
        identifier: "ABCDE1234F".to_string(),
        linked_flag: Some(false),
    };
    let (extractor, calls) = registry(Ok(confirmed));
    let verifier = DocumentVerifier::new(Box::new(CannedOcr(PAN_FRONT)), extractor);

    let report = verifier.process_bytes(b"png bytes", InputFormat::Png, DocumentType::Pan);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.record.source, FieldSource::Registry);
    assert_eq!(report.record.date_of_birth.as_deref(), Some("05/06/1990"));
    assert_eq!(report.record.linked_flag, Some(false));

    let report = DocumentVerifier::verify(report, &input("rohan kumar", "05/06/1990", "M"));
    assert!(report.verdict.unwrap().matched);
}

#[test]
fn pan_registry_timeout_drops_ocr_fields() {
    let (extractor, calls) = registry(Err(RegistryError::Timeout));
    let record = extractor.extract(DocumentType::Pan, PAN_FRONT);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(record.recognized);
    assert_eq!(record.identifier.as_deref(), Some("ABCDE1234F"));
    assert_eq!(record.name, None);
    assert_eq!(record.date_of_birth, None);
    assert_eq!(
        record.error,
        Some(ExtractionError::RegistryLookupFailed("API request timed out".to_string()))
    );
}

#[test]
fn report_serializes_with_tagged_error() {
    let verifier = DocumentVerifier::new(Box::new(CannedOcr("")), IdentityExtractor::new());
    let report = verifier.process_text(String::new(), DocumentType::Aadhaar);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["record"]["error"]["kind"], "no_text_extracted");
    assert_eq!(json["record"]["recognized"], false);
    assert!(json["verdict"].is_null());
}
