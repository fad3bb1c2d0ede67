use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::ExtractionError;

/// Supported identity cards. Each variant owns one rule-set in
/// `models::rules`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Aadhaar card issued by UIDAI
    Aadhaar,
    /// PAN card issued by the Income Tax Department
    Pan,
}

impl DocumentType {
    /// Whether the extracted identifier must be confirmed against the
    /// external registry before the record is final.
    pub fn requires_registry(&self) -> bool {
        match self {
            DocumentType::Aadhaar => false,
            DocumentType::Pan => true,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DocumentType::Aadhaar => write!(f, "Aadhaar"),
            DocumentType::Pan => write!(f, "PAN"),
        }
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aadhaar" | "aadhar" => Ok(DocumentType::Aadhaar),
            "pan" => Ok(DocumentType::Pan),
            other => Err(format!("unknown document type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    DateOfBirth,
    Gender,
}

/// Which heuristic proposed a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateRule {
    /// Line right after a "To" / "Name:" label line
    FollowsNameLabel,
    /// Text after "Name:" on the same line
    InlineNameLabel,
    /// One or two lines above a DOB label or gender token
    AboveFieldAnchor,
    /// Standalone capitalized line of letters
    NameShapedLine,
    LabeledDate,
    UnlabeledDate,
    GenderToken,
    GenderLetter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCandidate {
    pub field: FieldName,
    pub value: String,
    pub line_index: usize,
    pub rule: CandidateRule,
}

impl FieldCandidate {
    pub fn new(field: FieldName, value: impl Into<String>, line_index: usize, rule: CandidateRule) -> Self {
        FieldCandidate {
            field,
            value: value.into(),
            line_index,
            rule,
        }
    }
}

/// Winners of the field heuristics for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub name: Option<FieldCandidate>,
    pub date_of_birth: Option<FieldCandidate>,
    pub gender: Option<FieldCandidate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSource {
    Ocr,
    Registry,
}

/// Fields returned by the registry for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryRecord {
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub identifier: String,
    pub linked_flag: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedRecord {
    pub document_type: DocumentType,
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub linked_flag: Option<bool>,
    pub recognized: bool,
    pub source: FieldSource,
    pub error: Option<ExtractionError>,
}

impl ExtractedRecord {
    pub fn empty(document_type: DocumentType) -> Self {
        ExtractedRecord {
            document_type,
            identifier: None,
            name: None,
            date_of_birth: None,
            gender: None,
            linked_flag: None,
            recognized: false,
            source: FieldSource::Ocr,
            error: None,
        }
    }

    pub fn failed(document_type: DocumentType, error: ExtractionError, recognized: bool) -> Self {
        ExtractedRecord {
            recognized,
            error: Some(error),
            ..Self::empty(document_type)
        }
    }
}

/// Values asserted by the user; untrusted and free-form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationInput {
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationVerdict {
    pub name_match: bool,
    pub dob_match: bool,
    pub gender_match: bool,
    pub matched: bool,
    pub reasons: Vec<String>,
}

impl VerificationVerdict {
    pub fn explanation(&self) -> String {
        self.reasons.join("; ")
    }
}
