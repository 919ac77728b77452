//! Error types for the parser
//!
//! None of these reach callers of `AttendanceParser::parse`; they describe
//! why the remote path was abandoned in favour of the rule-based parser.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur on the remote parsing path
#[derive(Error, Debug)]
pub enum ParserError {
    /// No completion provider is configured
    #[error("No completion provider configured")]
    NoProvider,

    /// Command is blank
    #[error("Empty command")]
    EmptyCommand,

    /// Command exceeds maximum length
    #[error("Command too long: {0} chars (max: {1})")]
    CommandTooLong(usize, usize),

    /// Completion provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Completion did not arrive in time
    #[error("Completion timed out after {0:?}")]
    Timeout(Duration),

    /// Response is not a JSON object
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// A field of the response has the wrong type or value
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ParserError {
    fn from(e: serde_json::Error) -> Self {
        ParserError::InvalidFormat(format!("JSON parse error: {}", e))
    }
}

impl ParserError {
    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        ParserError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
