//! Keyword-based status detection.

use rollcall_domain::AttendanceStatus;

/// Detect the status by case-insensitive substring search
///
/// "absent" is checked before "late"; anything else is `Present`.
pub fn detect_status(command: &str) -> AttendanceStatus {
    let lower = command.to_lowercase();

    if lower.contains("absent") {
        AttendanceStatus::Absent
    } else if lower.contains("late") {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}
