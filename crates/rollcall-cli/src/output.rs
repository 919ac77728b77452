//! Output formatting for the CLI.

use colored::*;
use rollcall_domain::{AttendanceStatus, ParsedAttendanceCommand};
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    json: bool,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(json: bool, color_enabled: bool) -> Self {
        Self {
            json,
            color_enabled,
        }
    }

    /// Format a parsed command as pretty JSON or a two-column table.
    pub fn parsed_command(&self, parsed: &ParsedAttendanceCommand) -> serde_json::Result<String> {
        if self.json {
            return serde_json::to_string_pretty(parsed);
        }

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Students".to_string(), parsed.students.join(", ")]);
        builder.push_record(["Status".to_string(), self.status(parsed.status)]);
        builder.push_record(["Date".to_string(), parsed.date.to_string()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Columns::first()).with(Alignment::right()));

        Ok(table.to_string())
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        let text = format!("⚠ {}", message);
        if self.color_enabled {
            text.yellow().to_string()
        } else {
            text
        }
    }

    fn status(&self, status: AttendanceStatus) -> String {
        if !self.color_enabled {
            return status.to_string();
        }

        match status {
            AttendanceStatus::Present => status.as_str().green().to_string(),
            AttendanceStatus::Absent => status.as_str().red().to_string(),
            AttendanceStatus::Late => status.as_str().yellow().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parsed() -> ParsedAttendanceCommand {
        ParsedAttendanceCommand::new(
            vec!["John".to_string(), "Mary".to_string()],
            AttendanceStatus::Late,
            NaiveDate::from_ymd_opt(2026, 2, 6)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_json_format() {
        let output = Formatter::new(true, false).parsed_command(&parsed()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["students"][1], "Mary");
        assert_eq!(value["status"], "Late");
        assert_eq!(value["date"], "2026-02-06T00:00:00");
    }

    #[test]
    fn test_table_format() {
        let output = Formatter::new(false, false).parsed_command(&parsed()).unwrap();
        assert!(output.contains("John, Mary"));
        assert!(output.contains("Late"));
        assert!(output.contains("2026-02-06 00:00:00"));
    }

    #[test]
    fn test_warning_without_color() {
        let formatter = Formatter::new(false, false);
        assert_eq!(formatter.warning("offline"), "⚠ offline");
    }
}
