use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::identity_extractor::IdentityExtractor;
use crate::models::{DocumentType, ExtractedRecord, VerificationInput, VerificationVerdict};
use crate::processing::{InputFormat, OcrEngine, TesseractEngine};
use crate::utils::{ExtractionError, IdCheckError};
use crate::validation::Comparator;
use crate::verification::HttpRegistryClient;

#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub raw_ocr_text: String,
    pub record: ExtractedRecord,
    pub verdict: Option<VerificationVerdict>,
}

/// One uploaded card in, one report out. OCR faults and unreadable files
/// become error records; nothing here returns `Err`.
pub struct DocumentVerifier {
    ocr: Box<dyn OcrEngine>,
    extractor: IdentityExtractor,
}

impl DocumentVerifier {
    pub fn new(ocr: Box<dyn OcrEngine>, extractor: IdentityExtractor) -> Self {
        DocumentVerifier { ocr, extractor }
    }

    /// Tesseract OCR plus an HTTP registry client when a token is configured.
    pub fn from_config(config: &Config) -> Result<Self, IdCheckError> {
        let ocr = TesseractEngine::new(config.ocr_languages.clone(), config.tessdata_prefix.clone());
        let extractor = match &config.registry_token {
            Some(token) => IdentityExtractor::with_registry(Box::new(HttpRegistryClient::new(
                config.registry_url.clone(),
                token.clone(),
                config.registry_timeout,
            )?)),
            None => IdentityExtractor::new(),
        };
        Ok(Self::new(Box::new(ocr), extractor))
    }

    pub fn process_file(&self, path: &Path, document_type: DocumentType) -> VerificationReport {
        let format = match InputFormat::from_path(path) {
            Ok(format) => format,
            Err(e) => return Self::rejected(document_type, ExtractionError::UnsupportedInput(e.to_string())),
        };
        match fs::read(path) {
            Ok(data) => self.process_bytes(&data, format, document_type),
            Err(e) => Self::rejected(
                document_type,
                ExtractionError::UnsupportedInput(format!("cannot read {}: {}", path.display(), e)),
            ),
        }
    }

    pub fn process_bytes(&self, data: &[u8], format: InputFormat, document_type: DocumentType) -> VerificationReport {
        let raw_ocr_text = match self.ocr.extract_text(data, format) {
            Ok(text) => text,
            Err(e) => {
                warn!("OCR failed: {}", e);
                return Self::rejected(document_type, ExtractionError::OcrFailed(e.to_string()));
            }
        };
        self.process_text(raw_ocr_text, document_type)
    }

    /// Skip OCR for text that was recognized elsewhere.
    pub fn process_text(&self, raw_ocr_text: String, document_type: DocumentType) -> VerificationReport {
        let record = self.extractor.extract(document_type, &raw_ocr_text);
        VerificationReport {
            raw_ocr_text,
            record,
            verdict: None,
        }
    }

    pub fn verify(report: VerificationReport, input: &VerificationInput) -> VerificationReport {
        let verdict = Comparator::compare(input, &report.record);
        info!(
            "Verification {}",
            if verdict.matched { "matched" } else { "did not match" }
        );
        VerificationReport {
            verdict: Some(verdict),
            ..report
        }
    }

    pub fn verify_file(&self, path: &Path, document_type: DocumentType, input: &VerificationInput) -> VerificationReport {
        Self::verify(self.process_file(path, document_type), input)
    }

    fn rejected(document_type: DocumentType, error: ExtractionError) -> VerificationReport {
        VerificationReport {
            raw_ocr_text: String::new(),
            record: ExtractedRecord::failed(document_type, error, false),
            verdict: None,
        }
    }
}
