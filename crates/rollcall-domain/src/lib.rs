//! Rollcall Domain Layer
//!
//! Core value types and boundary traits for the attendance service.
//! Infrastructure (completion providers, HTTP, storage) lives in other crates
//! and depends on the traits defined here.
//!
//! ## Key Concepts
//!
//! - **AttendanceStatus**: one of Present, Absent or Late
//! - **ParsedAttendanceCommand**: the structured form of a free-text command
//! - **AttendanceRecord**: one stored mark for one student
//! - **Student**: a registered attendee, referenced by records
//! - **Clock**: the injectable source of "now"

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod command;
pub mod record;
pub mod status;
pub mod student;
pub mod traits;

// Re-exports for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{ParsedAttendanceCommand, UNKNOWN_STUDENT};
pub use record::{AttendanceEntry, AttendanceRecord, RecordId};
pub use status::AttendanceStatus;
pub use student::{Student, StudentId};
