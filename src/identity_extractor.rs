use log::{debug, info, warn};

use crate::models::{DocumentType, ExtractedRecord, FieldSource};
use crate::processing::{DocumentClassifier, FieldExtractor, IdentifierExtractor, NormalizedLines};
use crate::utils::ExtractionError;
use crate::validation::FormatValidator;
use crate::verification::RegistryLookup;

/// Runs classification, extraction and (where the card needs it) registry
/// confirmation for one OCR text. Holds no per-request state.
pub struct IdentityExtractor {
    registry: Option<Box<dyn RegistryLookup>>,
}

impl Default for IdentityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityExtractor {
    pub fn new() -> Self {
        IdentityExtractor { registry: None }
    }

    pub fn with_registry(registry: Box<dyn RegistryLookup>) -> Self {
        IdentityExtractor {
            registry: Some(registry),
        }
    }

    // Main extraction function that orchestrates the entire process
    pub fn extract(&self, document_type: DocumentType, raw_text: &str) -> ExtractedRecord {
        // Step 1: Nothing to work with
        if raw_text.trim().is_empty() {
            info!("No text found for {} extraction", document_type);
            return ExtractedRecord::failed(document_type, ExtractionError::NoTextExtracted, false);
        }

        // Step 2: Make sure the text reads like the declared card
        let lines = NormalizedLines::new(raw_text);
        if !DocumentClassifier::classify(&lines, document_type) {
            info!("Text not recognized as a {} card", document_type);
            return ExtractedRecord::failed(document_type, ExtractionError::WrongDocumentType(document_type), false);
        }

        // Step 3: Identifier and personal fields. On registry-backed cards the
        // OCR fields are only logged below; the registry supplies the record.
        let identifier = IdentifierExtractor::extract(raw_text, document_type);
        let fields = FieldExtractor::extract(&lines, document_type.rules());

        let record = ExtractedRecord {
            identifier,
            name: fields.name.map(|c| c.value),
            date_of_birth: fields.date_of_birth.map(|c| c.value),
            gender: fields.gender.map(|c| c.value),
            recognized: true,
            ..ExtractedRecord::empty(document_type)
        };

        // Step 4: Registry confirmation for cards that require it
        if document_type.requires_registry() {
            return self.confirm_with_registry(record);
        }

        info!("{} extraction finished", document_type);
        record
    }

    /// OCR values on a registry-backed card are unconfirmed; they are
    /// replaced by the registry's fields, or dropped when the lookup fails.
    fn confirm_with_registry(&self, record: ExtractedRecord) -> ExtractedRecord {
        let document_type = record.document_type;
        debug!("Unconfirmed OCR fields for {}: {:?}", document_type, record);

        let unconfirmed = |error: ExtractionError| ExtractedRecord {
            identifier: record.identifier.clone(),
            recognized: true,
            error: Some(error),
            ..ExtractedRecord::empty(document_type)
        };

        let identifier = match record.identifier.as_deref() {
            Some(identifier) => identifier,
            None => {
                info!("{} number not found in document", document_type);
                return unconfirmed(ExtractionError::IdentifierNotFound(document_type));
            }
        };

        let registry = match &self.registry {
            Some(registry) => registry,
            None => {
                warn!("Registry lookup requested but no registry is configured");
                return unconfirmed(ExtractionError::RegistryLookupFailed(
                    "registry lookup is not configured".to_string(),
                ));
            }
        };

        match registry.verify_identifier(identifier) {
            Ok(confirmed) => {
                info!("{} {} confirmed by registry", document_type, identifier);
                let non_empty = |value: String| Some(value).filter(|v| !v.is_empty());
                ExtractedRecord {
                    identifier: Some(confirmed.identifier),
                    name: non_empty(confirmed.name),
                    date_of_birth: non_empty(FormatValidator::normalize_dob(&confirmed.date_of_birth)),
                    gender: non_empty(confirmed.gender),
                    linked_flag: confirmed.linked_flag,
                    recognized: true,
                    source: FieldSource::Registry,
                    error: None,
                    document_type,
                }
            }
            Err(e) => {
                warn!("Registry lookup failed for {}: {}", identifier, e);
                unconfirmed(ExtractionError::RegistryLookupFailed(e.to_string()))
            }
        }
    }
}
