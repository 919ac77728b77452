//! Decode completion service output into a parsed command

use crate::error::ParserError;
use chrono::{NaiveDate, NaiveDateTime};
use rollcall_domain::command::dedup_names;
use rollcall_domain::{AttendanceStatus, ParsedAttendanceCommand};
use serde_json::{Map, Value};
use tracing::debug;

/// Strict date format accepted from the model
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decode a JSON response of shape `{students, status, date}`
///
/// An unknown status becomes `Present`; a missing or unparseable date
/// becomes `now`. Structural problems (not JSON, not an object, no usable
/// names, wrong field types) are errors so the caller can fall back.
pub fn decode_response(
    response: &str,
    now: NaiveDateTime,
) -> Result<ParsedAttendanceCommand, ParserError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ParserError::InvalidFormat("Expected JSON object".to_string()))?;

    let students = decode_students(obj)?;
    let status = decode_status(obj)?;
    let date = decode_date(obj, now)?;

    Ok(ParsedAttendanceCommand::new(students, status, date))
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ParserError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ParserError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip first line (```json or ```) and last line (```)
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn decode_students(obj: &Map<String, Value>) -> Result<Vec<String>, ParserError> {
    let raw = obj
        .get("students")
        .and_then(Value::as_array)
        .ok_or_else(|| ParserError::invalid_field("students", "missing or not an array"))?;

    let mut names = Vec::with_capacity(raw.len());
    for entry in raw {
        let name = entry
            .as_str()
            .ok_or_else(|| ParserError::invalid_field("students", format!("non-string entry {}", entry)))?;
        names.push(name);
    }

    let names = dedup_names(names);
    if names.is_empty() {
        return Err(ParserError::invalid_field("students", "no names"));
    }
    Ok(names)
}

fn decode_status(obj: &Map<String, Value>) -> Result<AttendanceStatus, ParserError> {
    match obj.get("status") {
        None => Ok(AttendanceStatus::Present),
        Some(Value::String(s)) => Ok(AttendanceStatus::parse(s).unwrap_or_else(|| {
            debug!(status = %s, "Unknown status from model, using Present");
            AttendanceStatus::Present
        })),
        Some(other) => Err(ParserError::invalid_field(
            "status",
            format!("expected string, got {}", other),
        )),
    }
}

fn decode_date(obj: &Map<String, Value>, now: NaiveDateTime) -> Result<NaiveDateTime, ParserError> {
    match obj.get("date") {
        None | Some(Value::Null) => Ok(now),
        Some(Value::String(s)) if s.is_empty() => Ok(now),
        Some(Value::String(s)) => match parse_strict_date(s) {
            Some(date) => Ok(date.and_time(chrono::NaiveTime::MIN)),
            None => {
                debug!(date = %s, "Unparseable date from model, using now");
                Ok(now)
            }
        },
        Some(other) => Err(ParserError::invalid_field(
            "date",
            format!("expected string or null, got {}", other),
        )),
    }
}

/// `YYYY-MM-DD` with no surrounding whitespace
fn parse_strict_date(s: &str) -> Option<NaiveDate> {
    if s.trim() != s {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_decode_valid_response() {
        let response = r#"{"students": ["John", "Mary"], "status": "late", "date": "2026-02-06"}"#;
        let cmd = decode_response(response, now()).unwrap();
        assert_eq!(cmd.students, vec!["John", "Mary"]);
        assert_eq!(cmd.status, AttendanceStatus::Late);
        assert_eq!(cmd.date, midnight(2026, 2, 6));
    }

    #[test]
    fn test_status_is_case_insensitive() {
        let response = r#"{"students": ["John"], "status": "ABSENT", "date": null}"#;
        let cmd = decode_response(response, now()).unwrap();
        assert_eq!(cmd.status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_unknown_status_becomes_present() {
        let response = r#"{"students": ["John"], "status": "excused", "date": null}"#;
        let cmd = decode_response(response, now()).unwrap();
        assert_eq!(cmd.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_padded_status_becomes_present() {
        let response = r#"{"students": ["John"], "status": " absent "}"#;
        let cmd = decode_response(response, now()).unwrap();
        assert_eq!(cmd.status, AttendanceStatus::Present);

        let response = r#"{"students": ["John"], "status": "ABSENT"}"#;
        assert_eq!(decode_response(response, now()).unwrap().status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_missing_status_becomes_present() {
        let response = r#"{"students": ["John"]}"#;
        let cmd = decode_response(response, now()).unwrap();
        assert_eq!(cmd.status, AttendanceStatus::Present);
        assert_eq!(cmd.date, now());
    }

    #[test]
    fn test_null_date_becomes_now() {
        let response = r#"{"students": ["Sam"], "status": "present", "date": null}"#;
        assert_eq!(decode_response(response, now()).unwrap().date, now());
    }

    #[test]
    fn test_non_strict_date_becomes_now() {
        for date in [
            "06/02/2026",
            "2026-13-01",
            "2026-02-30",
            "Feb 6 2026",
            "2026-02-06T10:00:00",
            " 2026-02-06",
            "2026-02-06 ",
        ] {
            let response = format!(r#"{{"students": ["Sam"], "status": "present", "date": "{}"}}"#, date);
            assert_eq!(decode_response(&response, now()).unwrap().date, now(), "date {}", date);
        }
    }

    #[test]
    fn test_students_deduplicated_and_trimmed() {
        let response = r#"{"students": [" John ", "Mary", "John", ""], "status": "late", "date": null}"#;
        let cmd = decode_response(response, now()).unwrap();
        assert_eq!(cmd.students, vec!["John", "Mary"]);
    }

    #[test]
    fn test_markdown_wrapper() {
        let response = "```json\n{\"students\": [\"Ann\"], \"status\": \"absent\", \"date\": null}\n```";
        let cmd = decode_response(response, now()).unwrap();
        assert_eq!(cmd.students, vec!["Ann"]);
        assert_eq!(cmd.status, AttendanceStatus::Absent);
    }

    #[test]
    fn test_not_json_is_error() {
        let result = decode_response("This is not JSON", now());
        assert!(matches!(result, Err(ParserError::InvalidFormat(_))));
    }

    #[test]
    fn test_not_object_is_error() {
        let result = decode_response(r#"["John"]"#, now());
        assert!(matches!(result, Err(ParserError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_students_is_error() {
        let result = decode_response(r#"{"students": [], "status": "late"}"#, now());
        assert!(matches!(result, Err(ParserError::InvalidField { field: "students", .. })));
    }

    #[test]
    fn test_missing_students_is_error() {
        let result = decode_response(r#"{"status": "late"}"#, now());
        assert!(matches!(result, Err(ParserError::InvalidField { field: "students", .. })));
    }

    #[test]
    fn test_wrong_field_types_are_errors() {
        let cases = [
            (r#"{"students": [1, 2], "status": "late"}"#, "students"),
            (r#"{"students": ["A"], "status": null}"#, "status"),
            (r#"{"students": ["A"], "status": 3}"#, "status"),
            (r#"{"students": ["A"], "date": 20260206}"#, "date"),
        ];
        for (response, expected) in cases {
            match decode_response(response, now()) {
                Err(ParserError::InvalidField { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid {} for {}, got {:?}", expected, response, other),
            }
        }
    }

    #[test]
    fn test_extract_json_from_plain_json() {
        let json = r#"{"key": "value"}"#;
        assert_eq!(extract_json(json).unwrap(), json);
    }

    #[test]
    fn test_extract_json_from_markdown_without_language() {
        let response = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(response).unwrap().trim(), r#"{"key": "value"}"#);
    }
}
