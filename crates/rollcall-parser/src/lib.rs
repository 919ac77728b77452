//! Rollcall Parser
//!
//! Turns natural-language attendance commands into structured records.
//!
//! # Overview
//!
//! Two parsers share one contract: given any string, return a
//! `ParsedAttendanceCommand` with at least one student, a status and a date.
//!
//! - `AttendanceParser` asks a completion service for a JSON answer and
//!   validates it. Any failure (no credential, network error, timeout,
//!   malformed JSON, invalid field) hands the command to the fallback.
//! - `FallbackParser` uses keywords and regular expressions only and cannot
//!   fail.
//!
//! # Architecture
//!
//! ```text
//! Command → AttendanceParser → LLM → JSON → ParsedAttendanceCommand
//!                 │ (any failure)
//!                 └────────→ FallbackParser → ParsedAttendanceCommand
//! ```
//!
//! # Example Usage
//!
//! ```
//! use rollcall_parser::{AttendanceParser, ParserConfig};
//! use rollcall_domain::AttendanceStatus;
//! use rollcall_llm::MockProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let llm = MockProvider::new(r#"{"students": ["John", "Mary"], "status": "late", "date": "2026-02-06"}"#);
//! let parser = AttendanceParser::new(llm, ParserConfig::default());
//!
//! let parsed = parser.parse("John and Mary were late on 6 Feb 2026").await;
//! assert_eq!(parsed.students, vec!["John", "Mary"]);
//! assert_eq!(parsed.status, AttendanceStatus::Late);
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod fallback;
mod prompt;
mod remote;
mod response;

#[cfg(test)]
mod tests;

pub use config::{ParserConfig, API_KEY_ENV};
pub use error::ParserError;
pub use fallback::{detect_status, extract_date, extract_names, FallbackParser};
pub use prompt::PromptBuilder;
pub use remote::AttendanceParser;
pub use response::decode_response;
