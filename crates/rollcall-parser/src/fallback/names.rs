//! Student name extraction heuristics.
//!
//! A fixed chain of strategies; the first one that yields at least one name
//! wins. Each strategy deduplicates its own output in first-seen order.

use super::patterns::{CAPITALIZED_WORD, LEADING_WORD, NAME_BEFORE_VERB};
use rollcall_domain::command::dedup_names;
use rollcall_domain::UNKNOWN_STUDENT;

/// Capitalized words that are never names
const STOP_WORDS: [&str; 11] = [
    "the", "and", "are", "was", "were", "is", "am", "be", "to", "at", "on",
];

/// One name-extraction strategy
type NameStrategy = fn(&str) -> Vec<String>;

/// Strategies in priority order
const STRATEGIES: [(&str, NameStrategy); 4] = [
    ("leading_words", leading_words),
    ("name_before_verb", names_before_verb),
    ("capitalized_words", capitalized_words),
    ("placeholder", placeholder),
];

/// Extract student names; never returns an empty list
pub fn extract_names(command: &str) -> Vec<String> {
    for (label, strategy) in STRATEGIES {
        let names = dedup_names(strategy(command));
        if !names.is_empty() {
            tracing::trace!(strategy = label, count = names.len(), "Names extracted");
            return names;
        }
    }
    // The placeholder strategy always yields a name
    vec![UNKNOWN_STUDENT.to_string()]
}

/// Leading alphabetic word of each " and "-separated segment, or of the
/// whole command when it contains no "and"
pub fn leading_words(command: &str) -> Vec<String> {
    let segments: Vec<&str> = if command.contains("and") {
        command.split(" and ").collect()
    } else {
        vec![command]
    };

    segments
        .into_iter()
        .filter_map(|segment| LEADING_WORD.captures(segment.trim()))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Capitalized words directly followed by "is" or "are"
pub fn names_before_verb(command: &str) -> Vec<String> {
    NAME_BEFORE_VERB
        .captures_iter(command)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Every capitalized word outside the stop-list
pub fn capitalized_words(command: &str) -> Vec<String> {
    CAPITALIZED_WORD
        .captures_iter(command)
        .map(|caps| caps[1].to_string())
        .filter(|word| !STOP_WORDS.contains(&word.to_lowercase().as_str()))
        .collect()
}

fn placeholder(_command: &str) -> Vec<String> {
    vec![UNKNOWN_STUDENT.to_string()]
}
