// Identifier and personal-field extraction over normalized OCR lines
use chrono::{Datelike, Local};
use log::debug;
use std::collections::HashSet;

use crate::models::rules::{
    ADDRESS_PATTERN, DATE_PATTERN, GENDER_LETTER_PATTERN, GENDER_TOKEN_PATTERN, NAME_SHAPE_PATTERN,
};
use crate::models::{CandidateRule, DocumentRules, DocumentType, ExtractedFields, FieldCandidate, FieldName};
use crate::processing::NormalizedLines;

pub struct IdentifierExtractor;

impl IdentifierExtractor {
    /// First identifier-shaped token in the raw text, whitespace removed.
    /// The match is case-sensitive.
    pub fn extract(raw: &str, document_type: DocumentType) -> Option<String> {
        let found = document_type.rules().identifier_pattern.find(raw)?;
        let identifier: String = found.as_str().chars().filter(|c| !c.is_whitespace()).collect();
        debug!("Extracted {} number: {}", document_type, identifier);
        Some(identifier)
    }
}

/// Map a gender word or letter to `male` / `female`.
pub fn canonical_gender(token: &str) -> Option<&'static str> {
    match token.trim().to_lowercase().as_str() {
        "m" | "male" | "पुरुष" => Some("male"),
        "f" | "female" | "महिला" => Some("female"),
        _ => None,
    }
}

/// Date-of-birth scan state threaded through the line fold. A labeled
/// date always outranks an unlabeled one, wherever each was found.
#[derive(Debug, Default)]
struct DobScan {
    labeled: Option<FieldCandidate>,
    fallback: Option<FieldCandidate>,
}

impl DobScan {
    fn resolve(self) -> Option<FieldCandidate> {
        self.labeled.or(self.fallback)
    }
}

pub struct FieldExtractor;

impl FieldExtractor {
    pub fn extract(lines: &NormalizedLines, rules: &DocumentRules) -> ExtractedFields {
        Self::extract_with_year(lines, rules, Local::now().year())
    }

    /// `current_year` bounds the plausibility check on unlabeled dates.
    pub fn extract_with_year(lines: &NormalizedLines, rules: &DocumentRules, current_year: i32) -> ExtractedFields {
        let fields = ExtractedFields {
            name: Self::resolve_name(lines, rules),
            date_of_birth: Self::resolve_dob(lines, rules, current_year),
            gender: Self::resolve_gender(lines, rules),
        };
        debug!("Extracted {} fields: {:?}", rules.document_type, fields);
        fields
    }

    pub fn resolve_dob(lines: &NormalizedLines, rules: &DocumentRules, current_year: i32) -> Option<FieldCandidate> {
        let scan = lines.iter().fold(DobScan::default(), |mut scan, (i, line, lower)| {
            if scan.labeled.is_some() {
                return scan;
            }
            if rules.has_dob_label(lower) {
                scan.labeled = Self::find_date(line)
                    .map(|date| (date, i))
                    .or_else(|| lines.line(i + 1).and_then(Self::find_date).map(|date| (date, i + 1)))
                    .map(|(date, index)| {
                        FieldCandidate::new(FieldName::DateOfBirth, date, index, CandidateRule::LabeledDate)
                    });
            } else if scan.fallback.is_none() {
                scan.fallback = Self::find_plausible_date(line, current_year)
                    .map(|date| FieldCandidate::new(FieldName::DateOfBirth, date, i, CandidateRule::UnlabeledDate));
            }
            scan
        });
        scan.resolve()
    }

    fn find_date(line: &str) -> Option<String> {
        DATE_PATTERN.find(line).map(|m| m.as_str().replace('-', "/"))
    }

    // Rejects PIN codes and other digit runs that happen to look like dates
    fn find_plausible_date(line: &str, current_year: i32) -> Option<String> {
        DATE_PATTERN
            .captures_iter(line)
            .find(|caps| {
                caps[3]
                    .parse::<i32>()
                    .map(|year| year > 1900 && year <= current_year)
                    .unwrap_or(false)
            })
            .map(|caps| caps[0].replace('-', "/"))
    }

    pub fn resolve_gender(lines: &NormalizedLines, rules: &DocumentRules) -> Option<FieldCandidate> {
        let direct = lines
            .iter()
            .filter(|(_, _, lower)| !ADDRESS_PATTERN.is_match(lower))
            .find_map(|(i, _, lower)| {
                let caps = GENDER_TOKEN_PATTERN.captures(lower)?;
                let gender = canonical_gender(&caps[1])?;
                Some(FieldCandidate::new(FieldName::Gender, gender, i, CandidateRule::GenderToken))
            });

        direct.or_else(|| {
            lines
                .iter()
                .filter(|(_, _, lower)| !ADDRESS_PATTERN.is_match(lower))
                .find_map(|(i, _, lower)| {
                    let caps = GENDER_LETTER_PATTERN.captures(lower)?;
                    if !Self::has_context_nearby(lines, rules, i) {
                        return None;
                    }
                    let gender = canonical_gender(&caps[1])?;
                    Some(FieldCandidate::new(FieldName::Gender, gender, i, CandidateRule::GenderLetter))
                })
        })
    }

    fn has_context_nearby(lines: &NormalizedLines, rules: &DocumentRules, index: usize) -> bool {
        (index.saturating_sub(2)..=index + 2)
            .filter_map(|j| lines.lower(j))
            .any(|lower| rules.has_context_label(lower))
    }

    /// Best-effort: pools candidates from three heuristics and ranks them by
    /// (title case, length). Short or unusual cards will sometimes rank the
    /// institutional header first; the header check below catches the
    /// common cases only.
    pub fn resolve_name(lines: &NormalizedLines, rules: &DocumentRules) -> Option<FieldCandidate> {
        let mut pool = Vec::new();
        Self::collect_label_candidates(lines, rules, &mut pool);
        Self::collect_anchor_candidates(lines, rules, &mut pool);
        Self::collect_shaped_candidates(lines, rules, &mut pool);

        // A relative's label line, inline value included, and the line under
        // it hold someone else's name
        let relative_lines: HashSet<usize> = lines
            .iter()
            .filter(|(_, _, lower)| rules.has_relative_label(lower))
            .flat_map(|(i, _, _)| [i, i + 1])
            .collect();
        pool.retain(|candidate| !relative_lines.contains(&candidate.line_index));

        Self::select_name(pool, rules)
    }

    fn collect_label_candidates(lines: &NormalizedLines, rules: &DocumentRules, pool: &mut Vec<FieldCandidate>) {
        for (i, line, lower) in lines.iter() {
            if let Some(caps) = rules.inline_name_label.captures(line) {
                let value = caps[1].trim();
                if word_count(value) >= 2 {
                    pool.push(FieldCandidate::new(FieldName::Name, value, i, CandidateRule::InlineNameLabel));
                }
            }

            let follows_label = i > 0 && lines.lower(i - 1).map_or(false, |prev| rules.name_label_line.is_match(prev));
            if follows_label
                && word_count(line) >= 2
                && !rules.has_dob_label(lower)
                && !GENDER_TOKEN_PATTERN.is_match(lower)
            {
                pool.push(FieldCandidate::new(FieldName::Name, line, i, CandidateRule::FollowsNameLabel));
            }
        }
    }

    // Names are printed directly above the DOB and gender fields
    fn collect_anchor_candidates(lines: &NormalizedLines, rules: &DocumentRules, pool: &mut Vec<FieldCandidate>) {
        for (i, _, lower) in lines.iter() {
            if !rules.has_dob_label(lower) && !GENDER_TOKEN_PATTERN.is_match(lower) {
                continue;
            }
            for offset in 1..=2 {
                if offset > i {
                    break;
                }
                if let Some(above) = lines.line(i - offset) {
                    if is_name_shaped(above) {
                        pool.push(FieldCandidate::new(FieldName::Name, above, i - offset, CandidateRule::AboveFieldAnchor));
                    }
                }
            }
        }
    }

    fn collect_shaped_candidates(lines: &NormalizedLines, rules: &DocumentRules, pool: &mut Vec<FieldCandidate>) {
        for (i, line, lower) in lines.iter() {
            if is_name_shaped(line) && (is_title_case(line) || is_upper_case(line)) && !rules.is_denied_name(lower) {
                pool.push(FieldCandidate::new(FieldName::Name, line, i, CandidateRule::NameShapedLine));
            }
        }
    }

    fn select_name(pool: Vec<FieldCandidate>, rules: &DocumentRules) -> Option<FieldCandidate> {
        let mut seen = HashSet::new();
        let mut unique: Vec<FieldCandidate> = pool
            .into_iter()
            .filter(|candidate| seen.insert(candidate.value.clone()))
            .collect();
        debug!(
            "Name candidates: {:?}",
            unique.iter().map(|c| c.value.as_str()).collect::<Vec<_>>()
        );

        // Stable sort: equal ranks keep discovery order
        unique.sort_by_key(|candidate| std::cmp::Reverse((is_title_case(&candidate.value), candidate.value.chars().count())));
        let mut winner = unique.into_iter().next()?;

        let cleaned: String = winner
            .value
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
            .collect();
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

        if cleaned.is_empty() || rules.has_header_term(&cleaned.to_lowercase()) {
            debug!("Discarding name candidate '{}': card header", winner.value);
            return None;
        }
        winner.value = cleaned;
        Some(winner)
    }
}

fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

fn is_name_shaped(line: &str) -> bool {
    NAME_SHAPE_PATTERN.is_match(line) && word_count(line) >= 2
}

/// Every cased run starts upper-case and continues lower-case.
fn is_title_case(s: &str) -> bool {
    let mut any_cased = false;
    let mut prev_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else {
            prev_cased = false;
        }
    }
    any_cased
}

fn is_upper_case(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}
