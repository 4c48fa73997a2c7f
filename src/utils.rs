// Utility functions
use chrono::{DateTime, NaiveDate};

/// Calendar day (UTC) of a millisecond timestamp, if it is representable.
pub fn day_from_millis(timestamp_ms: f64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms as i64).map(|dt| dt.date_naive())
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_iso_date(text: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
}

/// Upper-cases the first letter of every word, lower-cases the rest.
pub fn to_title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if word_start {
                result.extend(ch.to_uppercase());
            } else {
                result.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            result.push(ch);
            word_start = true;
        }
    }
    result
}
