//! Splits raw input into candidate event phrases

use log::debug;
use regex::Regex;

use crate::parser::utils::compile;
use crate::parser::ExtractionError;

/// Fragments shorter than this (after trimming) are dropped
pub const MIN_PHRASE_LEN: usize = 3;

/// Titles and short forms whose trailing period does not end a sentence
const ABBREVIATIONS: &[&str] =
    &["dr", "mr", "mrs", "ms", "mx", "prof", "sr", "jr", "st", "mt", "vs", "e.g", "i.e"];

/// True when `text` ends in an abbreviation or a single initial ("J")
fn ends_with_abbreviation(text: &str) -> bool {
    let Some(word) = text.split_whitespace().last() else {
        return false;
    };
    let word = word.to_lowercase();
    let is_initial = word.chars().count() == 1 && word.chars().all(char::is_alphabetic);
    is_initial || ABBREVIATIONS.contains(&word.as_str())
}

/// Splits on commas, the standalone word "and", and sentence-ending periods
pub struct Segmenter {
    delimiters: Regex,
}

impl Segmenter {
    pub fn new() -> Result<Self, ExtractionError> {
        Ok(Self { delimiters: compile("segment delimiter", r"(?i),|\band\b|\.\s+")? })
    }

    pub fn split(&self, input: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut start = 0;
        for delimiter in self.delimiters.find_iter(input) {
            let piece = &input[start..delimiter.start()];
            if delimiter.as_str().starts_with('.') && ends_with_abbreviation(piece) {
                continue;
            }
            pieces.push(piece);
            start = delimiter.end();
        }
        pieces.push(&input[start..]);

        pieces
            .into_iter()
            .map(str::trim)
            .filter(|fragment| {
                let keep = fragment.chars().count() >= MIN_PHRASE_LEN;
                if !keep && !fragment.is_empty() {
                    debug!("Dropping short fragment '{}'", fragment);
                }
                keep
            })
            .map(str::to_string)
            .collect()
    }
}
