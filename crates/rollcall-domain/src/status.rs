//! Status module - the three attendance marks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attendance mark assigned to every student named in one command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Student attended
    #[default]
    Present,

    /// Student did not attend
    Absent,

    /// Student attended but arrived late
    Late,
}

impl AttendanceStatus {
    /// All statuses, in display order
    pub const ALL: [AttendanceStatus; 3] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
    ];

    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
        }
    }

    /// Parse a status from a string, ignoring case but not whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            "late" => Some(AttendanceStatus::Late),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid attendance status: {}", s))
    }
}
