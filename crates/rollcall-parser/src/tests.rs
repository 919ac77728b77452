//! Integration tests for the parsers

#[cfg(test)]
mod tests {
    use crate::{AttendanceParser, FallbackParser, ParserConfig};
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;
    use rollcall_domain::{AttendanceStatus, Clock, FixedClock, UNKNOWN_STUDENT};
    use rollcall_llm::MockProvider;
    use std::sync::Arc;
    use std::time::Duration;

    fn today() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock::new(today()))
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn fallback() -> FallbackParser {
        FallbackParser::with_clock(clock())
    }

    fn remote(provider: MockProvider) -> AttendanceParser<MockProvider> {
        AttendanceParser::new(provider, ParserConfig::default()).with_clock(clock())
    }

    #[test]
    fn test_fallback_single_absent() {
        let parsed = fallback().parse("John is absent");
        assert_eq!(parsed.students, vec!["John"]);
        assert_eq!(parsed.status, AttendanceStatus::Absent);
        assert_eq!(parsed.date, today());
    }

    #[test]
    fn test_fallback_two_names_late_with_date() {
        let parsed = fallback().parse("John and Mary are late on 6 Feb 2026");
        assert_eq!(parsed.students, vec!["John", "Mary"]);
        assert_eq!(parsed.status, AttendanceStatus::Late);
        assert_eq!(parsed.date, midnight(2026, 2, 6));
    }

    #[test]
    fn test_fallback_present_iso_date() {
        let parsed = fallback().parse("Sam was present on 2026-02-06");
        assert_eq!(parsed.students, vec!["Sam"]);
        assert_eq!(parsed.status, AttendanceStatus::Present);
        assert_eq!(parsed.date, midnight(2026, 2, 6));
    }

    #[test]
    fn test_fallback_nonsense() {
        let parsed = fallback().parse("xyz123");
        assert_eq!(parsed.students, vec![UNKNOWN_STUDENT]);
        assert_eq!(parsed.status, AttendanceStatus::Present);
        assert_eq!(parsed.date, today());
    }

    #[test]
    fn test_fallback_is_idempotent() {
        let parser = fallback();
        for command in ["John is absent", "Ann and Bob were late on 02/06/2026", "", "??"] {
            assert_eq!(parser.parse(command), parser.parse(command));
        }
    }

    #[tokio::test]
    async fn test_remote_success() {
        let parser = remote(MockProvider::new(
            r#"{"students": ["John", "Mary"], "status": "Late", "date": "2026-02-06"}"#,
        ));
        let parsed = parser.parse("John and Mary were late on 6 Feb 2026").await;
        assert_eq!(parsed.students, vec!["John", "Mary"]);
        assert_eq!(parsed.status, AttendanceStatus::Late);
        assert_eq!(parsed.date, midnight(2026, 2, 6));
    }

    #[tokio::test]
    async fn test_remote_null_date_uses_clock() {
        let parser = remote(MockProvider::new(
            r#"{"students": ["Priya"], "status": "absent", "date": null}"#,
        ));
        let parsed = parser.parse("Priya is off sick").await;
        assert_eq!(parsed.students, vec!["Priya"]);
        assert_eq!(parsed.status, AttendanceStatus::Absent);
        assert_eq!(parsed.date, today());
    }

    #[tokio::test]
    async fn test_malformed_json_equals_fallback() {
        let provider = MockProvider::new("Sure! John was late {students: John}");
        let parser = remote(provider.clone());

        for command in [
            "John is absent",
            "John and Mary are late on 6 Feb 2026",
            "xyz123",
        ] {
            let parsed = parser.parse(command).await;
            assert_eq!(parsed, fallback().parse(command));
        }
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_provider_error_uses_fallback() {
        let mut provider = MockProvider::default();
        provider.add_error("Sam was present on 2026-02-06");
        let parser = remote(provider);

        let parsed = parser.parse("Sam was present on 2026-02-06").await;
        assert_eq!(parsed, fallback().parse("Sam was present on 2026-02-06"));
    }

    #[tokio::test]
    async fn test_invalid_field_uses_fallback() {
        let parser = remote(MockProvider::new(r#"{"students": [], "status": "absent", "date": null}"#));
        let parsed = parser.parse("John is late").await;
        assert_eq!(parsed.students, vec!["John"]);
        assert_eq!(parsed.status, AttendanceStatus::Late);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_uses_fallback() {
        let provider = MockProvider::new(r#"{"students": ["Zed"], "status": "present", "date": null}"#)
            .with_delay(Duration::from_secs(60));
        let config = ParserConfig {
            request_timeout_secs: 2,
            ..ParserConfig::default()
        };
        let parser = AttendanceParser::new(provider.clone(), config).with_clock(clock());

        let parsed = parser.parse("Kim is absent").await;
        assert_eq!(parsed.students, vec!["Kim"]);
        assert_eq!(parsed.status, AttendanceStatus::Absent);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_no_retry_after_failure() {
        let provider = MockProvider::new("not json");
        let parser = remote(provider.clone());
        parser.parse("John is late").await;
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fallback_only_never_calls_provider() {
        let parser = AttendanceParser::<MockProvider>::fallback_only(ParserConfig::default())
            .with_clock(clock());
        let parsed = parser.parse("John and Mary are late on 6 Feb 2026").await;
        assert_eq!(parsed, fallback().parse("John and Mary are late on 6 Feb 2026"));
    }

    #[tokio::test]
    async fn test_parsers_are_shareable_across_tasks() {
        let parser = Arc::new(remote(MockProvider::new(
            r#"{"students": ["A"], "status": "late", "date": null}"#,
        )));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let parser = Arc::clone(&parser);
                tokio::spawn(async move { parser.parse("A is late").await })
            })
            .collect();

        for handle in handles {
            let parsed = handle.await.unwrap();
            assert_eq!(parsed.students, vec!["A"]);
        }
    }

    proptest! {
        #[test]
        fn prop_fallback_is_total(command in ".{0,200}") {
            let parsed = fallback().parse(&command);
            prop_assert!(!parsed.students.is_empty());
            prop_assert!(parsed.students.iter().all(|s| !s.trim().is_empty()));
            prop_assert!(AttendanceStatus::ALL.contains(&parsed.status));
        }

        #[test]
        fn prop_status_keyword_any_case(name in "[A-Z][a-z]{1,8}", upper in any::<bool>()) {
            let word = if upper { "ABSENT" } else { "absent" };
            let parsed = fallback().parse(&format!("{} is {}", name, word));
            prop_assert_eq!(parsed.status, AttendanceStatus::Absent);
            prop_assert_eq!(parsed.students, vec![name]);
        }
    }
}
