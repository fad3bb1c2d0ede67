use lazy_static::lazy_static;
use regex::Regex;

use crate::models::DocumentType;

/// Keyword tables and patterns driving classification and field
/// extraction for one card layout. All keyword lists are lower-case and
/// are matched against lower-cased lines.
pub struct DocumentRules {
    pub document_type: DocumentType,
    /// Weak signals; only count together with an identifier match
    pub keywords: &'static [&'static str],
    /// Terms that name the document itself; enough on their own
    pub strong_keywords: &'static [&'static str],
    /// Matched case-sensitively against the original text
    pub identifier_pattern: Regex,
    pub dob_labels: &'static [&'static str],
    pub gender_labels: &'static [&'static str],
    pub name_label_terms: &'static [&'static str],
    /// A line that introduces the name printed on the following line
    pub name_label_line: Regex,
    /// `Name: <value>` on a single line
    pub inline_name_label: Regex,
    /// Labels whose following line holds a relative's name
    pub relative_labels: &'static [&'static str],
    /// Structural lines that are never personal names
    pub name_deny_patterns: Vec<Regex>,
    /// A selected name containing any of these is the card header
    pub header_terms: &'static [&'static str],
}

lazy_static! {
    /// dd/mm/yyyy or dd-mm-yyyy; group 3 is the year
    pub static ref DATE_PATTERN: Regex =
        Regex::new(r"([0-9]{2})[/-]([0-9]{2})[/-]([0-9]{4})").unwrap();

    /// Direct gender words in English and Devanagari
    pub static ref GENDER_TOKEN_PATTERN: Regex =
        Regex::new(r"\b(female|male|पुरुष|महिला)\b").unwrap();

    pub static ref GENDER_LETTER_PATTERN: Regex = Regex::new(r"\b([mf])\b").unwrap();

    /// Lines carrying these belong to an address or a code block
    pub static ref ADDRESS_PATTERN: Regex = Regex::new(
        r"\b(road|rd|street|lane|district|dist|state|pin|pincode|code)\b"
    )
    .unwrap();

    /// Letters, spaces and periods only
    pub static ref NAME_SHAPE_PATTERN: Regex = Regex::new(r"^[A-Za-z\s\.]+$").unwrap();

    static ref AADHAAR_RULES: DocumentRules = DocumentRules {
        document_type: DocumentType::Aadhaar,
        keywords: &[
            "aadhaar", "uidai", "government of india", "enrollment", "enrolment",
            "unique identification", "dob", "gender", "male", "female",
            "पुरुष", "महिला", "जन्म", "तारीख",
        ],
        strong_keywords: &["aadhaar"],
        identifier_pattern: Regex::new(r"\b[0-9]{4}[ \t]?[0-9]{4}[ \t]?[0-9]{4}\b").unwrap(),
        dob_labels: &["dob", "d.o.b", "birth", "जन्म तारीख", "जन्म तिथि", "जन्मतिथि"],
        gender_labels: &["gender", "sex", "लिंग"],
        name_label_terms: &["name", "नाम"],
        name_label_line: Regex::new(
            r"^(?:to|name|नाम)(?:\s*/\s*(?:name|नाम))?\s*[:,\-]?$|(?:name|नाम)\s*:"
        )
        .unwrap(),
        relative_labels: &["father", "s/o", "d/o", "w/o", "c/o"],
        inline_name_label: Regex::new(r"(?i)(?:^|\s|/)(?:name|नाम)\s*:\s*([A-Za-z][A-Za-z\s\.]+)$").unwrap(),
        name_deny_patterns: vec![
            Regex::new(r"government").unwrap(),
            Regex::new(r"unique\s+identification").unwrap(),
            Regex::new(r"authority").unwrap(),
            Regex::new(r"address").unwrap(),
            Regex::new(r"\bstate\b").unwrap(),
            Regex::new(r"district").unwrap(),
            Regex::new(r"\bpin\b").unwrap(),
            Regex::new(r"mobile").unwrap(),
            Regex::new(r"\bdob\b").unwrap(),
            Regex::new(r"\b(?:fe)?male\b").unwrap(),
            Regex::new(r"your\s+aadhaar").unwrap(),
            Regex::new(r"enrol+ment").unwrap(),
        ],
        header_terms: &["government", "india", "authority"],
    };

    static ref PAN_RULES: DocumentRules = DocumentRules {
        document_type: DocumentType::Pan,
        keywords: &[
            "income tax department", "permanent account number", "govt. of india",
            "government of india", "father's name", "date of birth", "signature",
            "आयकर विभाग", "स्थायी लेखा संख्या",
        ],
        strong_keywords: &["permanent account number", "income tax department"],
        identifier_pattern: Regex::new(r"\b[A-Z]{5}[0-9]{4}[A-Z]\b").unwrap(),
        dob_labels: &["date of birth", "birth", "dob", "जन्म की तारीख", "जन्म तिथि"],
        gender_labels: &["gender", "sex"],
        name_label_terms: &["name", "नाम"],
        name_label_line: Regex::new(r"^(?:नाम\s*/\s*)?name\s*[:\-]?$|^नाम$").unwrap(),
        relative_labels: &["father", "पिता"],
        inline_name_label: Regex::new(r"(?i)^(?:नाम\s*/\s*)?name\s*:\s*([A-Za-z][A-Za-z\s\.]+)$").unwrap(),
        name_deny_patterns: vec![
            Regex::new(r"income\s+tax").unwrap(),
            Regex::new(r"department").unwrap(),
            Regex::new(r"govt").unwrap(),
            Regex::new(r"government").unwrap(),
            Regex::new(r"india").unwrap(),
            Regex::new(r"permanent\s+account").unwrap(),
            Regex::new(r"account\s+number").unwrap(),
            Regex::new(r"signature").unwrap(),
            Regex::new(r"father").unwrap(),
            Regex::new(r"birth").unwrap(),
        ],
        header_terms: &["government", "govt", "india", "income tax", "department"],
    };
}

impl DocumentType {
    pub fn rules(&self) -> &'static DocumentRules {
        match self {
            DocumentType::Aadhaar => &AADHAAR_RULES,
            DocumentType::Pan => &PAN_RULES,
        }
    }
}

impl DocumentRules {
    pub fn has_dob_label(&self, line_lower: &str) -> bool {
        self.dob_labels.iter().any(|label| line_lower.contains(label))
    }

    /// Labels that make a stray `m` / `f` believable as a gender marker.
    pub fn has_context_label(&self, line_lower: &str) -> bool {
        self.has_dob_label(line_lower)
            || self.gender_labels.iter().any(|label| line_lower.contains(label))
            || self.name_label_terms.iter().any(|label| line_lower.contains(label))
    }

    pub fn has_relative_label(&self, line_lower: &str) -> bool {
        self.relative_labels.iter().any(|label| line_lower.contains(label))
    }

    pub fn is_denied_name(&self, line_lower: &str) -> bool {
        self.name_deny_patterns.iter().any(|p| p.is_match(line_lower))
    }

    pub fn has_header_term(&self, value_lower: &str) -> bool {
        self.header_terms.iter().any(|term| value_lower.contains(term))
    }
}
