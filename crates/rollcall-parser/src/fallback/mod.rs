//! Deterministic, rule-based attendance command parser.
//!
//! Used whenever the completion service is unconfigured, unreachable or
//! returns something unusable. Total: any input, including empty text,
//! yields a well-formed command.

mod dates;
mod names;
mod patterns;
mod status;

pub use dates::extract_date;
pub use names::extract_names;
pub use status::detect_status;

use async_trait::async_trait;
use chrono::NaiveTime;
use rollcall_domain::traits::CommandParser;
use rollcall_domain::{Clock, ParsedAttendanceCommand, SystemClock};
use std::sync::Arc;
use tracing::debug;

/// Keyword and pattern based parser with no external dependencies
#[derive(Debug, Clone)]
pub struct FallbackParser {
    clock: Arc<dyn Clock>,
}

impl FallbackParser {
    /// Create a parser that defaults dates to the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a parser with an explicit clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Parse a command
    pub fn parse(&self, command: &str) -> ParsedAttendanceCommand {
        let status = detect_status(command);
        let students = extract_names(command);
        let date = match extract_date(command) {
            Some(day) => day.and_time(NaiveTime::MIN),
            None => self.clock.now(),
        };

        debug!(
            students = students.len(),
            status = %status,
            %date,
            "Parsed command with rule-based parser"
        );

        ParsedAttendanceCommand::new(students, status, date)
    }
}

impl Default for FallbackParser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandParser for FallbackParser {
    async fn parse(&self, command: &str) -> ParsedAttendanceCommand {
        FallbackParser::parse(self, command)
    }
}
