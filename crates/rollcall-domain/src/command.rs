//! Command module - the structured result of parsing a free-text command

use crate::status::AttendanceStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Placeholder used when no student name can be extracted
pub const UNKNOWN_STUDENT: &str = "Unknown";

/// Structured form of a natural-language attendance command
///
/// Transient: built per parse call, turned into one attendance record per
/// student by the storage layer, then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAttendanceCommand {
    /// Student names, deduplicated, in first-seen order. Never empty.
    pub students: Vec<String>,

    /// Mark applied to every listed student
    pub status: AttendanceStatus,

    /// Date the mark applies to
    pub date: NaiveDateTime,
}

impl ParsedAttendanceCommand {
    /// Build a command, enforcing the non-empty, duplicate-free name list
    ///
    /// Blank names are dropped and duplicates removed; an empty list becomes
    /// `[UNKNOWN_STUDENT]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use rollcall_domain::{AttendanceStatus, ParsedAttendanceCommand};
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 2, 6).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let cmd = ParsedAttendanceCommand::new(
    ///     vec!["John".into(), "Mary".into(), "John".into()],
    ///     AttendanceStatus::Late,
    ///     date,
    /// );
    /// assert_eq!(cmd.students, vec!["John", "Mary"]);
    /// ```
    pub fn new(students: Vec<String>, status: AttendanceStatus, date: NaiveDateTime) -> Self {
        let mut students = dedup_names(students);
        if students.is_empty() {
            students.push(UNKNOWN_STUDENT.to_string());
        }

        Self {
            students,
            status,
            date,
        }
    }
}

/// Remove blank entries and duplicates, keeping first-seen order
pub fn dedup_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() || out.iter().any(|seen| seen == name) {
            continue;
        }
        out.push(name.to_string());
    }
    out
}
