//! LLM prompt engineering for attendance command extraction

use chrono::NaiveDate;
use rollcall_domain::traits::CompletionRequest;

/// Builds the completion request for one attendance command
pub struct PromptBuilder {
    command: String,
    today: Option<NaiveDate>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            today: None,
        }
    }

    /// Tell the model which day "today" is
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Build the system instructions
    pub fn system_prompt(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if let Some(today) = self.today {
            prompt.push_str(&format!(
                "Today is {}. Resolve relative dates such as \"today\" or \"yesterday\" against it.\n\n",
                today.format("%Y-%m-%d")
            ));
        }

        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt
    }

    /// Build the complete request; the user message is the command verbatim
    pub fn build(&self) -> CompletionRequest {
        CompletionRequest {
            system: self.system_prompt(),
            user: self.command.clone(),
            json_mode: true,
        }
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"You are an attendance parsing assistant. Extract the following information from the user's text:
1. Student names (list of names, as written)
2. Attendance status: exactly one of "present", "absent" or "late"
3. Date the attendance applies to, if mentioned, as YYYY-MM-DD; otherwise null

Rules:
- Every student named in the text gets the same status
- Do not invent names that are not in the text
- If no status is stated, use "present""#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (a single JSON object, no additional text):
{
  "students": ["student_name1", "student_name2"],
  "status": "present|absent|late",
  "date": "YYYY-MM-DD" or null
}

Remember: Return ONLY the JSON object, no markdown code blocks, no explanations."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_command() {
        let request = PromptBuilder::new("John and Mary were late").build();
        assert_eq!(request.user, "John and Mary were late");
        assert!(request.json_mode);
    }

    #[test]
    fn test_system_prompt_describes_schema() {
        let prompt = PromptBuilder::new("x").system_prompt();
        assert!(prompt.contains("\"students\""));
        assert!(prompt.contains("present|absent|late"));
        assert!(prompt.contains("YYYY-MM-DD"));
        assert!(prompt.contains("ONLY the JSON object"));
    }

    #[test]
    fn test_today_included_when_set() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 6).unwrap();
        let prompt = PromptBuilder::new("x").with_today(today).system_prompt();
        assert!(prompt.contains("Today is 2026-02-06"));

        let prompt = PromptBuilder::new("x").system_prompt();
        assert!(!prompt.contains("Today is"));
    }
}
