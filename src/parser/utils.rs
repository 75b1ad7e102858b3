//! Common utility functions shared across the extraction pipeline
//!
//! Pattern compilation, vocabulary regexes and small string helpers that
//! more than one stage needs.

use super::ExtractionError;
use log::debug;
use regex::Regex;

/// Compile a pattern, tagging any failure with the component that owns it
pub fn compile(what: &'static str, pattern: &str) -> Result<Regex, ExtractionError> {
    debug!("Compiling {} pattern", what);
    Regex::new(pattern).map_err(|source| ExtractionError::Pattern { what, source })
}

/// Build a case-insensitive, whole-word alternation over a word list.
///
/// Entries may contain spaces; they match any run of whitespace. Longer
/// entries are tried first so "the day after" wins over "the".
pub fn word_list_pattern(words: &[&str]) -> String {
    let mut sorted: Vec<&str> = words.to_vec();
    sorted.sort_by_key(|w| std::cmp::Reverse(w.len()));

    let alternatives = sorted
        .iter()
        .map(|w| {
            w.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|");

    format!(r"(?i)\b(?:{})\b", alternatives)
}

/// Month names and the abbreviations accepted alongside them, as a regex
/// alternation. Full names come first so "june" is preferred over "jun".
pub const MONTH_ALTERNATION: &str = "january|february|march|april|may|june|july|august|september|\
october|november|december|sept|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec";

/// Weekday names as a regex alternation
pub const WEEKDAY_ALTERNATION: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";

/// Collapse runs of whitespace into single spaces
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
