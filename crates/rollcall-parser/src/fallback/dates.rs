//! Date recognition for attendance commands.
//!
//! Four recognizers are tried in a fixed order against the raw text. Each
//! looks at its first textual match only; a match that is not a real
//! calendar date is discarded and the next recognizer runs.

use super::patterns::{DATE_DAY_MONTH_YEAR, DATE_ISO, DATE_MONTH_DAY_YEAR, DATE_NUMERIC};
use chrono::NaiveDate;

/// One date recognizer
type DateRecognizer = fn(&str) -> Option<NaiveDate>;

/// Recognizers in priority order
const RECOGNIZERS: [(&str, DateRecognizer); 4] = [
    ("day_month_year", day_month_year),
    ("month_day_year", month_day_year),
    ("numeric", numeric),
    ("iso", iso),
];

/// Find the first valid date named in the command
pub fn extract_date(command: &str) -> Option<NaiveDate> {
    RECOGNIZERS.iter().find_map(|(label, recognize)| {
        let date = recognize(command)?;
        tracing::trace!(recognizer = *label, %date, "Date recognized");
        Some(date)
    })
}

/// "on 6 Feb 2026"
pub fn day_month_year(command: &str) -> Option<NaiveDate> {
    let caps = DATE_DAY_MONTH_YEAR.captures(command)?;
    let month = month_from_name(&caps[2])?;
    ymd(&caps[3], month, &caps[1])
}

/// "on February 6, 2026"
pub fn month_day_year(command: &str) -> Option<NaiveDate> {
    let caps = DATE_MONTH_DAY_YEAR.captures(command)?;
    let month = month_from_name(&caps[1])?;
    ymd(&caps[3], month, &caps[2])
}

/// "on 02/06/2026": month/day/year first, then day/month/year
pub fn numeric(command: &str) -> Option<NaiveDate> {
    let caps = DATE_NUMERIC.captures(command)?;
    if caps[2] != caps[4] {
        return None;
    }

    let first: u32 = caps[1].parse().ok()?;
    let second: u32 = caps[3].parse().ok()?;
    let year = &caps[5];

    ymd(year, first, &caps[3]).or_else(|| ymd(year, second, &caps[1]))
}

/// "on 2026-02-06"
pub fn iso(command: &str) -> Option<NaiveDate> {
    let caps = DATE_ISO.captures(command)?;
    let month: u32 = caps[2].parse().ok()?;
    ymd(&caps[1], month, &caps[3])
}

/// Month number from the first three letters of its English name
fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn ymd(year: &str, month: u32, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
