use log::debug;

use crate::models::{ExtractedRecord, VerificationInput, VerificationVerdict};
use crate::processing::canonical_gender;
use crate::validation::FormatValidator;

pub struct Comparator;

impl Comparator {
    /// Check user-asserted values against an extracted record. Each field is
    /// judged on its own; an absent extracted value is always a mismatch.
    pub fn compare(input: &VerificationInput, record: &ExtractedRecord) -> VerificationVerdict {
        let mut reasons = Vec::new();

        let name_match = Self::check_field(
            "Name",
            input.name.trim(),
            record.name.as_deref(),
            Self::names_match,
            &mut reasons,
        );
        let dob_match = Self::check_field(
            "Date of birth",
            input.date_of_birth.trim(),
            record.date_of_birth.as_deref(),
            Self::dobs_match,
            &mut reasons,
        );
        let gender_match = Self::check_field(
            "Gender",
            input.gender.trim(),
            record.gender.as_deref(),
            Self::genders_match,
            &mut reasons,
        );

        let matched = name_match && dob_match && gender_match;
        debug!(
            "Comparison: name={} dob={} gender={} matched={}",
            name_match, dob_match, gender_match, matched
        );

        VerificationVerdict {
            name_match,
            dob_match,
            gender_match,
            matched,
            reasons,
        }
    }

    fn check_field(
        label: &str,
        asserted: &str,
        extracted: Option<&str>,
        matches: fn(&str, &str) -> bool,
        reasons: &mut Vec<String>,
    ) -> bool {
        match extracted.map(str::trim).filter(|value| !value.is_empty()) {
            None => {
                reasons.push(format!("{} could not be extracted from the document", label));
                false
            }
            Some(extracted) if matches(asserted, extracted) => true,
            Some(extracted) => {
                reasons.push(format!(
                    "{} mismatch: provided '{}', document shows '{}'",
                    label, asserted, extracted
                ));
                false
            }
        }
    }

    /// Deliberately loose: either side contained in the other, or equal once
    /// spaces are removed. A single shared word is enough.
    pub fn names_match(asserted: &str, extracted: &str) -> bool {
        let asserted = asserted.trim().to_lowercase();
        let extracted = extracted.trim().to_lowercase();
        if asserted.is_empty() {
            return false;
        }
        let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();

        asserted.contains(&extracted) || extracted.contains(&asserted) || squash(&asserted) == squash(&extracted)
    }

    pub fn dobs_match(asserted: &str, extracted: &str) -> bool {
        let asserted = FormatValidator::normalize_dob(asserted);
        !asserted.is_empty() && asserted == FormatValidator::normalize_dob(extracted)
    }

    pub fn genders_match(asserted: &str, extracted: &str) -> bool {
        let asserted = asserted.trim().to_lowercase();
        let extracted = extracted.trim().to_lowercase();
        if asserted.is_empty() {
            return false;
        }
        let canonical = |s: &str| canonical_gender(s).map(str::to_string).unwrap_or_else(|| s.to_string());
        canonical(&asserted) == canonical(&extracted)
    }
}
