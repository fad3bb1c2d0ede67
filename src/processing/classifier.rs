use log::debug;

use crate::models::DocumentType;
use crate::processing::NormalizedLines;

pub struct DocumentClassifier;

impl DocumentClassifier {
    /// Decide whether the text reads like the given card.
    ///
    /// Positive when the identifier pattern matches together with at least
    /// one keyword, or when a strong keyword naming the card is present on
    /// its own. The second rule trades precision for recall: any text that
    /// merely mentions the card's name is accepted.
    pub fn classify(lines: &NormalizedLines, document_type: DocumentType) -> bool {
        if lines.is_empty() {
            return false;
        }

        let rules = document_type.rules();
        let text_lower = lines.text_lower();

        let keyword_found = rules.keywords.iter().any(|kw| text_lower.contains(kw));
        let identifier_found = rules.identifier_pattern.is_match(lines.text());
        let strong_found = rules.strong_keywords.iter().any(|kw| text_lower.contains(kw));

        debug!(
            "{} classifier: keyword={} identifier={} strong={}",
            document_type, keyword_found, identifier_found, strong_found
        );

        (identifier_found && keyword_found) || strong_found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(raw: &str, document_type: DocumentType) -> bool {
        DocumentClassifier::classify(&NormalizedLines::new(raw), document_type)
    }

    #[test]
    fn test_identifier_with_keyword() {
        assert!(classify("Rohan Kumar\nDOB: 05/06/1990\n1234 5678 9012", DocumentType::Aadhaar));
        // identifier alone is not enough
        assert!(!classify("Invoice 1234 5678 9012", DocumentType::Aadhaar));
        // keyword alone is not enough
        assert!(!classify("Gender: Male", DocumentType::Aadhaar));
    }

    #[test]
    fn test_strong_keyword_overrides() {
        assert!(classify("Please attach your Aadhaar copy", DocumentType::Aadhaar));
        assert!(classify("INCOME TAX DEPARTMENT", DocumentType::Pan));
    }

    #[test]
    fn test_pan_identifier_is_case_sensitive() {
        assert!(classify("ABCDE1234F\nSignature", DocumentType::Pan));
        assert!(!classify("abcde1234f\nsignature", DocumentType::Pan));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert!(!classify("", DocumentType::Aadhaar));
        assert!(!classify("", DocumentType::Pan));
    }

    #[test]
    fn test_deterministic() {
        let raw = "Government of India\nRohan Kumar\n1234 5678 9012";
        let first = classify(raw, DocumentType::Aadhaar);
        for _ in 0..5 {
            assert_eq!(classify(raw, DocumentType::Aadhaar), first);
        }
    }
}
