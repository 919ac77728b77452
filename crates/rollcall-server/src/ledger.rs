//! In-memory attendance ledger and reports.
//!
//! Consumes parsed commands: one record per listed student, all sharing the
//! command's status and date. Students are registered on first mention and
//! matched case-insensitively afterwards; the first spelling seen is kept.

use chrono::{NaiveDate, NaiveDateTime};
use rollcall_domain::traits::{AttendanceStore, StudentRegistry};
use rollcall_domain::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, Clock, ParsedAttendanceCommand, RecordId,
    Student, StudentId, SystemClock,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Ledger operation error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// No student with this id
    #[error("Student not found: {0}")]
    StudentNotFound(StudentId),

    /// No record with this id
    #[error("Attendance record not found: {0}")]
    RecordNotFound(RecordId),

    /// Another student already has this name
    #[error("Student already exists: {0}")]
    DuplicateStudent(String),

    /// Blank student name
    #[error("Student name must not be empty")]
    EmptyName,
}

/// Attendance records and students held in memory
#[derive(Debug)]
pub struct MemoryLedger {
    records: Vec<AttendanceRecord>,
    students: Vec<Student>,
    next_record_id: u64,
    next_student_id: u64,
    clock: Arc<dyn Clock>,
}

/// Counts of each status on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Day summarised
    pub date: NaiveDate,
    /// Number of records
    pub total: usize,
    /// Present marks
    pub present: usize,
    /// Absent marks
    pub absent: usize,
    /// Late marks
    pub late: usize,
}

/// Attendance rate of one student across all records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendancePercentage {
    /// Student name
    pub student: String,
    /// Number of records
    pub total_days: usize,
    /// Present marks
    pub present_days: usize,
    /// Absent marks
    pub absent_days: usize,
    /// Late marks
    pub late_days: usize,
    /// Present marks as a percentage of all marks, two decimals
    pub percentage: f64,
}

#[derive(Default)]
struct StatusCounts {
    present: usize,
    absent: usize,
    late: usize,
}

impl StatusCounts {
    fn tally<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.status {
                AttendanceStatus::Present => counts.present += 1,
                AttendanceStatus::Absent => counts.absent += 1,
                AttendanceStatus::Late => counts.late += 1,
            }
        }
        counts
    }

    fn total(&self) -> usize {
        self.present + self.absent + self.late
    }
}

fn clean_name(name: &str) -> Result<String, LedgerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    Ok(name.to_string())
}

impl MemoryLedger {
    /// Create an empty ledger stamped by the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty ledger with an explicit clock for `created_at`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Vec::new(),
            students: Vec::new(),
            next_record_id: 1,
            next_student_id: 1,
            clock,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record one mark per student in the command
    pub fn apply(
        &mut self,
        command: &ParsedAttendanceCommand,
    ) -> Result<Vec<AttendanceRecord>, LedgerError> {
        command
            .students
            .iter()
            .map(|student| self.record(student, command.status, command.date))
            .collect()
    }

    /// Status counts for one day
    pub fn summary(&self, day: NaiveDate) -> DailySummary {
        let counts = StatusCounts::tally(self.records.iter().filter(|r| r.day() == day));
        DailySummary {
            date: day,
            total: counts.total(),
            present: counts.present,
            absent: counts.absent,
            late: counts.late,
        }
    }

    /// Attendance rate of one student, or `None` for an unknown student
    pub fn percentage(&self, student: &str) -> Option<AttendancePercentage> {
        let student = self.find_by_name(student)?;
        let counts = StatusCounts::tally(self.records_of(student.id));

        let total = counts.total();
        let percentage = if total > 0 {
            let raw = counts.present as f64 / total as f64 * 100.0;
            (raw * 100.0).round() / 100.0
        } else {
            0.0
        };

        Some(AttendancePercentage {
            student: student.name.clone(),
            total_days: total,
            present_days: counts.present,
            absent_days: counts.absent,
            late_days: counts.late,
            percentage,
        })
    }

    fn find_by_name(&self, name: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.is_named(name))
    }

    fn find_student(&self, id: StudentId) -> Result<&Student, LedgerError> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .ok_or(LedgerError::StudentNotFound(id))
    }

    fn records_of(&self, id: StudentId) -> impl Iterator<Item = &AttendanceRecord> {
        self.records.iter().filter(move |r| r.student_id == id)
    }

    fn insert_student(&mut self, name: String) -> Student {
        let student = Student {
            id: StudentId(self.next_student_id),
            name,
            created_at: self.clock.now(),
        };
        self.next_student_id += 1;
        self.students.push(student.clone());
        student
    }

    fn insert_record(
        &mut self,
        student: &Student,
        status: AttendanceStatus,
        date: NaiveDateTime,
    ) -> AttendanceRecord {
        let record = AttendanceRecord {
            id: RecordId(self.next_record_id),
            student_id: student.id,
            student: student.name.clone(),
            status,
            date,
            created_at: self.clock.now(),
        };
        self.next_record_id += 1;
        self.records.push(record.clone());
        record
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceStore for MemoryLedger {
    type Error = LedgerError;

    fn record(
        &mut self,
        student: &str,
        status: AttendanceStatus,
        date: NaiveDateTime,
    ) -> Result<AttendanceRecord, Self::Error> {
        let student = match self.find_by_name(student) {
            Some(known) => known.clone(),
            None => {
                let name = clean_name(student)?;
                self.insert_student(name)
            }
        };
        Ok(self.insert_record(&student, status, date))
    }

    fn mark(&mut self, entry: &AttendanceEntry) -> Result<AttendanceRecord, Self::Error> {
        let student = self.find_student(entry.student_id)?.clone();
        let date = entry.date.unwrap_or_else(|| self.clock.now());
        Ok(self.insert_record(&student, entry.status, date))
    }

    fn update(
        &mut self,
        id: RecordId,
        entry: &AttendanceEntry,
    ) -> Result<AttendanceRecord, Self::Error> {
        let student = self.find_student(entry.student_id)?.clone();
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(LedgerError::RecordNotFound(id))?;

        record.student_id = student.id;
        record.student = student.name;
        record.status = entry.status;
        if let Some(date) = entry.date {
            record.date = date;
        }
        Ok(record.clone())
    }

    fn delete(&mut self, id: RecordId) -> Result<AttendanceRecord, Self::Error> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(LedgerError::RecordNotFound(id))?;
        Ok(self.records.remove(index))
    }

    fn by_date(&self, day: NaiveDate) -> Result<Vec<AttendanceRecord>, Self::Error> {
        Ok(self.records.iter().filter(|r| r.day() == day).cloned().collect())
    }

    fn by_student(&self, student: &str) -> Result<Option<Vec<AttendanceRecord>>, Self::Error> {
        Ok(self
            .find_by_name(student)
            .map(|s| self.records_of(s.id).cloned().collect()))
    }

    fn students(&self) -> Result<Vec<Student>, Self::Error> {
        Ok(self.students.clone())
    }
}

impl StudentRegistry for MemoryLedger {
    type Error = LedgerError;

    fn register(&mut self, name: &str) -> Result<Student, Self::Error> {
        let name = clean_name(name)?;
        if self.find_by_name(&name).is_some() {
            return Err(LedgerError::DuplicateStudent(name));
        }
        Ok(self.insert_student(name))
    }

    fn student(&self, id: StudentId) -> Result<Student, Self::Error> {
        self.find_student(id).cloned()
    }

    fn rename(&mut self, id: StudentId, name: &str) -> Result<Student, Self::Error> {
        let name = clean_name(name)?;
        if self.find_by_name(&name).is_some_and(|other| other.id != id) {
            return Err(LedgerError::DuplicateStudent(name));
        }

        let student = self
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(LedgerError::StudentNotFound(id))?;
        student.name = name;
        let student = student.clone();

        for record in self.records.iter_mut().filter(|r| r.student_id == id) {
            record.student = student.name.clone();
        }
        Ok(student)
    }

    fn remove(&mut self, id: StudentId) -> Result<Student, Self::Error> {
        let index = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or(LedgerError::StudentNotFound(id))?;
        self.records.retain(|r| r.student_id != id);
        Ok(self.students.remove(index))
    }

    fn search(&self, fragment: &str) -> Result<Vec<Student>, Self::Error> {
        let wanted = fragment.trim().to_lowercase();
        Ok(self
            .students
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&wanted))
            .cloned()
            .collect())
    }
}
