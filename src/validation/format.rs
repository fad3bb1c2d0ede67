use chrono::{Datelike, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref YEAR_FIRST: Regex = Regex::new(r"^([0-9]{4})[-/.]([0-9]{1,2})[-/.]([0-9]{1,2})$").unwrap();
    static ref DAY_FIRST: Regex = Regex::new(r"^([0-9]{1,2})[-/.]([0-9]{1,2})[-/.]([0-9]{4})$").unwrap();
}

pub struct FormatValidator;

impl FormatValidator {
    /// Bring a date of birth into the `dd/mm/yyyy` convention used on the
    /// cards. Year-first input is reordered; anything unrecognised is
    /// returned trimmed and otherwise untouched.
    pub fn normalize_dob(value: &str) -> String {
        let value = value.trim();
        if let Some(caps) = YEAR_FIRST.captures(value) {
            return format!("{:0>2}/{:0>2}/{}", &caps[3], &caps[2], &caps[1]);
        }
        if let Some(caps) = DAY_FIRST.captures(value) {
            return format!("{:0>2}/{:0>2}/{}", &caps[1], &caps[2], &caps[3]);
        }
        value.to_string()
    }

    /// A real calendar date in `dd/mm/yyyy`, after 1900 and not in the future.
    pub fn is_valid_dob(value: &str) -> bool {
        let normalized = Self::normalize_dob(value);
        match NaiveDate::parse_from_str(&normalized, "%d/%m/%Y") {
            Ok(date) => date.year() >= 1900 && date <= Local::now().date_naive(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_first_is_reordered() {
        assert_eq!(FormatValidator::normalize_dob("1990-06-05"), "05/06/1990");
        assert_eq!(FormatValidator::normalize_dob(" 1990/6/5 "), "05/06/1990");
    }

    #[test]
    fn test_day_first_gets_slashes() {
        assert_eq!(FormatValidator::normalize_dob("05-06-1990"), "05/06/1990");
        assert_eq!(FormatValidator::normalize_dob("05/06/1990"), "05/06/1990");
    }

    #[test]
    fn test_unrecognised_passes_through() {
        assert_eq!(FormatValidator::normalize_dob(" June 5 1990 "), "June 5 1990");
    }

    #[test]
    fn test_dob_validity() {
        assert!(FormatValidator::is_valid_dob("29/02/2000"));
        assert!(!FormatValidator::is_valid_dob("30/02/2000"));
        assert!(!FormatValidator::is_valid_dob("01/01/1850"));
        assert!(!FormatValidator::is_valid_dob("01/01/3000"));
        assert!(!FormatValidator::is_valid_dob("not a date"));
    }
}
