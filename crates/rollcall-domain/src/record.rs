//! Record module - a stored attendance mark for one student

use crate::status::AttendanceStatus;
use crate::student::StudentId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the store when a record is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One attendance mark for one student on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Store-assigned identifier
    pub id: RecordId,

    /// Student the mark belongs to
    pub student_id: StudentId,

    /// Student name at the time of the last change
    pub student: String,

    /// Mark
    pub status: AttendanceStatus,

    /// Date the mark applies to
    pub date: NaiveDateTime,

    /// When the record was written
    pub created_at: NaiveDateTime,
}

/// A mark entered directly against a registered student
///
/// Used for manual marking and for replacing an existing record. A missing
/// date means "now" when marking and "unchanged" when replacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    /// Registered student
    pub student_id: StudentId,

    /// Mark
    pub status: AttendanceStatus,

    /// Date the mark applies to
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
}

impl AttendanceRecord {
    /// Calendar day of the mark
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}
