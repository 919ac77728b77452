//! Regex patterns for the rule-based parser.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Names
    // A letter run glued to a digit ("xyz123") is not a name
    pub static ref LEADING_WORD: Regex = Regex::new(
        r"^([A-Za-z]+)(?:[^A-Za-z0-9]|$)"
    ).unwrap();

    pub static ref NAME_BEFORE_VERB: Regex = Regex::new(
        r"\b([A-Z][a-z]+)\s+(?:is|are)\b"
    ).unwrap();

    pub static ref CAPITALIZED_WORD: Regex = Regex::new(
        r"\b([A-Z][a-z]+)\b"
    ).unwrap();

    // Dates, always introduced by "on", which may end a longer word ("Mon")
    // "on 6 Feb 2026"
    pub static ref DATE_DAY_MONTH_YEAR: Regex = Regex::new(
        r"(?i)on\s+([0-9]{1,2})\s+([a-z]{3,9})\s+([0-9]{4})"
    ).unwrap();

    // "on February 6, 2026" or "on Feb 6 2026"
    pub static ref DATE_MONTH_DAY_YEAR: Regex = Regex::new(
        r"(?i)on\s+([a-z]{3,9})\s+([0-9]{1,2})(?:\s*,\s*|\s+)([0-9]{4})"
    ).unwrap();

    // "on 02/06/2026" or "on 06-02-2026"
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"(?i)on\s+([0-9]{1,2})([/-])([0-9]{1,2})([/-])([0-9]{4})"
    ).unwrap();

    // "on 2026-02-06"
    pub static ref DATE_ISO: Regex = Regex::new(
        r"(?i)on\s+([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_word_requires_whole_word() {
        assert_eq!(&LEADING_WORD.captures("John is late").unwrap()[1], "John");
        assert!(LEADING_WORD.captures("xyz123").is_none());
        assert!(LEADING_WORD.captures("  John").is_none());
        assert_eq!(&LEADING_WORD.captures("John").unwrap()[1], "John");
    }

    #[test]
    fn test_leading_word_stops_at_non_ascii_and_underscore() {
        assert_eq!(&LEADING_WORD.captures("José are late").unwrap()[1], "Jos");
        assert_eq!(&LEADING_WORD.captures("John_Smith is late").unwrap()[1], "John");
        assert!(LEADING_WORD.captures("ÉLODIE").is_none());
    }

    #[test]
    fn test_on_may_end_a_word() {
        assert!(DATE_DAY_MONTH_YEAR.is_match("late on 6 Feb 2026"));
        assert!(DATE_DAY_MONTH_YEAR.is_match("absent Mon 6 Feb 2026"));
        assert!(DATE_ISO.is_match("present upon 2026-02-06"));
        assert!(!DATE_ISO.is_match("present 2026-02-06"));
    }

    #[test]
    fn test_month_day_year_separators() {
        assert!(DATE_MONTH_DAY_YEAR.is_match("on February 6, 2026"));
        assert!(DATE_MONTH_DAY_YEAR.is_match("on Feb 6 2026"));
        assert!(DATE_MONTH_DAY_YEAR.is_match("ON FEB 6 ,2026"));
        assert!(!DATE_MONTH_DAY_YEAR.is_match("on February 62026"));
    }
}
