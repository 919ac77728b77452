//! HTTP request handlers for the attendance service.
//!
//! Exposes natural-language parsing, recording, record and student
//! management, and reports using axum.

use crate::ledger::{AttendancePercentage, DailySummary, LedgerError, MemoryLedger};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router as AxumRouter,
};
use chrono::NaiveDate;
use rollcall_domain::traits::{AttendanceStore, CommandParser, StudentRegistry};
use rollcall_domain::{
    AttendanceEntry, AttendanceRecord, ParsedAttendanceCommand, RecordId, Student, StudentId,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Natural-language command parser
    pub parser: Arc<dyn CommandParser>,
    /// Attendance records
    pub ledger: Arc<Mutex<MemoryLedger>>,
}

impl AppState {
    /// Create state around a parser with an empty ledger
    pub fn new(parser: Arc<dyn CommandParser>) -> Self {
        Self {
            parser,
            ledger: Arc::new(Mutex::new(MemoryLedger::new())),
        }
    }

    fn ledger(&self) -> Result<MutexGuard<'_, MemoryLedger>, AppError> {
        self.ledger
            .lock()
            .map_err(|e| AppError::Internal(format!("Ledger lock poisoned: {}", e)))
    }
}

/// Natural-language command request
#[derive(Debug, Deserialize, Serialize)]
pub struct CommandRequest {
    /// Free-text attendance command
    pub command: String,
}

/// Student create or rename request
#[derive(Debug, Deserialize, Serialize)]
pub struct StudentRequest {
    /// Student name
    pub name: String,
}

/// Student search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Name fragment, matched ignoring case
    #[serde(default)]
    pub name: String,
}

/// Confirmation for deletions
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable result
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// "remote" when a completion service is configured, else "fallback"
    pub parser_mode: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Path parameter is not a YYYY-MM-DD date
    InvalidDate(String),
    /// Unknown student name
    StudentNotFound(String),
    /// Ledger rejected the operation
    Ledger(LedgerError),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidDate(raw) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid date format '{}'. Use YYYY-MM-DD", raw),
            ),
            AppError::StudentNotFound(name) => {
                (StatusCode::NOT_FOUND, format!("Student not found: {}", name))
            }
            AppError::Ledger(e) => {
                let status = match e {
                    LedgerError::StudentNotFound(_) | LedgerError::RecordNotFound(_) => {
                        StatusCode::NOT_FOUND
                    }
                    LedgerError::DuplicateStudent(_) => StatusCode::CONFLICT,
                    LedgerError::EmptyName => StatusCode::BAD_REQUEST,
                };
                (status, e.to_string())
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<LedgerError> for AppError {
    fn from(e: LedgerError) -> Self {
        AppError::Ledger(e)
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(raw.to_string()))
}

/// GET /health - Liveness and parser mode
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let parser_mode = if state.parser.is_remote() {
        "remote"
    } else {
        "fallback"
    };

    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        parser_mode: parser_mode.to_string(),
    })
}

/// POST /attendance/parse - Parse without recording
async fn parse_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Json<ParsedAttendanceCommand> {
    Json(state.parser.parse(&request.command).await)
}

/// POST /attendance/ai - Parse and record one mark per student
async fn record_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let parsed = state.parser.parse(&request.command).await;
    let records = state.ledger()?.apply(&parsed)?;

    info!(
        students = records.len(),
        status = %parsed.status,
        date = %parsed.date,
        "Recorded attendance from command"
    );

    Ok(Json(records))
}

/// POST /attendance/manual - Mark a registered student directly
async fn mark_attendance(
    State(state): State<AppState>,
    Json(entry): Json<AttendanceEntry>,
) -> Result<Json<AttendanceRecord>, AppError> {
    let record = state.ledger()?.mark(&entry)?;
    info!(id = %record.id, student = %record.student, status = %record.status, "Marked attendance");
    Ok(Json(record))
}

/// PUT /attendance/{id} - Replace a record's student and status
async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(entry): Json<AttendanceEntry>,
) -> Result<Json<AttendanceRecord>, AppError> {
    let record = state.ledger()?.update(RecordId(id), &entry)?;
    Ok(Json(record))
}

/// DELETE /attendance/{id} - Remove a record
async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, AppError> {
    let record = state.ledger()?.delete(RecordId(id))?;
    Ok(Json(MessageResponse {
        message: format!("Attendance record {} deleted", record.id),
    }))
}

/// GET /attendance/date/{date} - Records on one day
async fn records_by_date(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let day = parse_day(&raw)?;
    let records = state.ledger()?.by_date(day)?;
    Ok(Json(records))
}

/// GET /attendance/student/{name} - Records of one student
async fn records_by_student(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    let ledger = state.ledger()?;
    let records = ledger.by_student(&name)?;
    records.map(Json).ok_or(AppError::StudentNotFound(name))
}

/// GET /attendance/summary/{date} - Status counts on one day
async fn daily_summary(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<DailySummary>, AppError> {
    let day = parse_day(&raw)?;
    let ledger = state.ledger()?;
    Ok(Json(ledger.summary(day)))
}

/// GET /attendance/percentage/{name} - Attendance rate of one student
async fn student_percentage(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AttendancePercentage>, AppError> {
    let ledger = state.ledger()?;
    let report = ledger.percentage(&name);
    report.map(Json).ok_or(AppError::StudentNotFound(name))
}

/// GET /students - Registered students in registration order
async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let ledger = state.ledger()?;
    let students = ledger.students()?;
    Ok(Json(students))
}

/// POST /students - Register a student
async fn register_student(
    State(state): State<AppState>,
    Json(request): Json<StudentRequest>,
) -> Result<Json<Student>, AppError> {
    let student = state.ledger()?.register(&request.name)?;
    info!(id = %student.id, name = %student.name, "Registered student");
    Ok(Json(student))
}

/// GET /students/search?name= - Students whose name contains a fragment
async fn search_students(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Student>>, AppError> {
    let ledger = state.ledger()?;
    let students = ledger.search(&query.name)?;
    Ok(Json(students))
}

/// GET /students/{id} - One student
async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Student>, AppError> {
    let ledger = state.ledger()?;
    let student = ledger.student(StudentId(id))?;
    Ok(Json(student))
}

/// PUT /students/{id} - Rename a student
async fn rename_student(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<StudentRequest>,
) -> Result<Json<Student>, AppError> {
    let student = state.ledger()?.rename(StudentId(id), &request.name)?;
    Ok(Json(student))
}

/// DELETE /students/{id} - Remove a student and their records
async fn remove_student(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, AppError> {
    let student = state.ledger()?.remove(StudentId(id))?;
    info!(id = %student.id, name = %student.name, "Removed student");
    Ok(Json(MessageResponse {
        message: format!("Student {} deleted", student.name),
    }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/health", get(health_check))
        .route("/attendance/parse", post(parse_command))
        .route("/attendance/ai", post(record_command))
        .route("/attendance/manual", post(mark_attendance))
        .route("/attendance/:id", put(update_record).delete(delete_record))
        .route("/attendance/date/:date", get(records_by_date))
        .route("/attendance/student/:name", get(records_by_student))
        .route("/attendance/summary/:date", get(daily_summary))
        .route("/attendance/percentage/:name", get(student_percentage))
        .route("/students", get(list_students).post(register_student))
        .route("/students/search", get(search_students))
        .route(
            "/students/:id",
            get(get_student).put(rename_student).delete(remove_student),
        )
        .with_state(state)
}
