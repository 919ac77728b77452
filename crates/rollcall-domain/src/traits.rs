//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, ParsedAttendanceCommand, RecordId, Student,
    StudentId,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

/// A single request to a completion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System instructions
    pub system: String,

    /// User message
    pub user: String,

    /// Ask the service to return a JSON object only
    pub json_mode: bool,
}

/// Trait for language-model completion services
///
/// Implemented by the infrastructure layer (rollcall-llm)
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Error type for completion operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Request one completion and return its text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;

    /// Model identifier sent with each request
    fn model_name(&self) -> &str;
}

/// Trait for turning free text into a structured attendance command
///
/// Implementations are total: they always produce a well-formed command.
/// Implemented by the application layer (rollcall-parser)
#[async_trait]
pub trait CommandParser: Send + Sync {
    /// Parse a natural-language attendance command
    async fn parse(&self, command: &str) -> ParsedAttendanceCommand;

    /// Whether parsing consults a remote completion service
    fn is_remote(&self) -> bool {
        false
    }
}

/// Trait for storing and retrieving attendance records
///
/// Implemented by the infrastructure layer (rollcall-server)
pub trait AttendanceStore {
    /// Error type for store operations
    type Error;

    /// Record one mark for a student named in free text, registering the
    /// student if the name is new
    fn record(
        &mut self,
        student: &str,
        status: AttendanceStatus,
        date: NaiveDateTime,
    ) -> Result<AttendanceRecord, Self::Error>;

    /// Record one mark for an already registered student
    fn mark(&mut self, entry: &AttendanceEntry) -> Result<AttendanceRecord, Self::Error>;

    /// Replace the student, status and (if given) date of an existing record
    fn update(
        &mut self,
        id: RecordId,
        entry: &AttendanceEntry,
    ) -> Result<AttendanceRecord, Self::Error>;

    /// Remove a record, returning it
    fn delete(&mut self, id: RecordId) -> Result<AttendanceRecord, Self::Error>;

    /// All records whose date falls on `day`
    fn by_date(&self, day: NaiveDate) -> Result<Vec<AttendanceRecord>, Self::Error>;

    /// All records of one student (case-insensitive), or `None` if the
    /// student has never been seen
    fn by_student(&self, student: &str) -> Result<Option<Vec<AttendanceRecord>>, Self::Error>;

    /// Known students, in registration order
    fn students(&self) -> Result<Vec<Student>, Self::Error>;
}

/// Trait for managing the set of known students
///
/// Names are unique ignoring case.
pub trait StudentRegistry {
    /// Error type for registry operations
    type Error;

    /// Register a new student
    fn register(&mut self, name: &str) -> Result<Student, Self::Error>;

    /// Look up a student by id
    fn student(&self, id: StudentId) -> Result<Student, Self::Error>;

    /// Change a student's name; existing records follow the new name
    fn rename(&mut self, id: StudentId, name: &str) -> Result<Student, Self::Error>;

    /// Remove a student together with their records
    fn remove(&mut self, id: StudentId) -> Result<Student, Self::Error>;

    /// Students whose name contains `fragment`, ignoring case
    fn search(&self, fragment: &str) -> Result<Vec<Student>, Self::Error>;
}
