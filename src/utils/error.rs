use serde::Serialize;
use thiserror::Error;

use crate::models::DocumentType;

/// Failures outside the extraction engine: reading inputs, running OCR,
/// loading configuration. The engine itself reports problems through
/// `ExtractionError` on the record instead.
#[derive(Debug, Error)]
pub enum IdCheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing error: {0}")]
    ImageProcessing(String),
    #[error("OCR error: {0}")]
    Ocr(String),
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reason an extraction did not produce a usable record. Carried on
/// `ExtractedRecord::error`; never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExtractionError {
    #[error("no text found")]
    NoTextExtracted,
    #[error("this does not appear to be a {0} card")]
    WrongDocumentType(DocumentType),
    #[error("{0} number not found in document")]
    IdentifierNotFound(DocumentType),
    #[error("{0}")]
    RegistryLookupFailed(String),
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
    #[error("OCR failed: {0}")]
    OcrFailed(String),
}
