//! Event title extraction
//!
//! A title is what is left of a phrase once DATE/TIME entities, filler words
//! and relative-date words are removed. The recognizer's spans need not match
//! the resolver's date patterns exactly, so a stray date fragment can survive
//! into a title.

use std::sync::Arc;

use log::debug;
use regex::Regex;

use crate::parser::traits::{EntityRecognizer, EntitySpan};
use crate::parser::utils::{capitalize_first, collapse_whitespace, compile, word_list_pattern};
use crate::parser::ExtractionError;

/// Title used when nothing survives cleaning
pub const PLACEHOLDER_TITLE: &str = "Event";

/// Connective and filler phrases removed from titles.
///
/// A phrase made only of these is not an event at all.
pub const FILLER_WORDS: &[&str] = &[
    "don't forget to",
    "don't forget",
    "dont forget",
    "remember to",
    "i have",
    "i've got",
    "i've",
    "we have",
    "there is",
    "there's",
    "also",
    "and",
    "then",
    "plus",
    "on",
    "at",
    "a",
    "an",
];

/// Relative-date words the resolver consumes; removed from titles only
pub const RELATIVE_WORDS: &[&str] =
    &["the day after tomorrow", "the day after", "tomorrow", "next week", "today", "tonight"];

const TRIM_CHARS: &[char] = &[',', '.', ';', ':', '!', '?', '-'];

pub struct TitleExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
    filler: Regex,
    relative: Regex,
}

impl TitleExtractor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Result<Self, ExtractionError> {
        Ok(Self {
            recognizer,
            filler: compile("filler word", &word_list_pattern(FILLER_WORDS))?,
            relative: compile("relative word", &word_list_pattern(RELATIVE_WORDS))?,
        })
    }

    /// True when the phrase holds nothing but filler and connectives ("also", "and then")
    pub fn is_non_event(&self, phrase: &str) -> bool {
        let stripped = self.filler.replace_all(phrase, " ");
        !stripped.chars().any(char::is_alphanumeric)
    }

    /// Produce a cleaned, capitalised title for a phrase
    pub fn summarize(&self, phrase: &str) -> String {
        let spans = self.recognizer.recognize(phrase);
        let without_entities = remove_spans(phrase, &spans);

        let without_relative = self.relative.replace_all(&without_entities, " ");
        let without_filler = self.filler.replace_all(&without_relative, " ");

        let collapsed = collapse_whitespace(&without_filler);
        let trimmed =
            collapsed.trim_matches(|c: char| c.is_whitespace() || TRIM_CHARS.contains(&c));

        if trimmed.is_empty() {
            debug!("Nothing left of '{}', using placeholder title", phrase);
            return PLACEHOLDER_TITLE.to_string();
        }

        let title = capitalize_first(trimmed);
        debug!("Title for '{}' -> '{}'", phrase, title);
        title
    }
}

/// Cut spans out of `text`, last span first so earlier offsets stay valid
fn remove_spans(text: &str, spans: &[EntitySpan]) -> String {
    let mut result = text.to_string();
    let mut ordered: Vec<&EntitySpan> = spans.iter().collect();
    ordered.sort_by_key(|s| std::cmp::Reverse(s.start));

    for span in ordered {
        if span.end <= result.len()
            && result.is_char_boundary(span.start)
            && result.is_char_boundary(span.end)
        {
            result.replace_range(span.start..span.end, " ");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::natural_language::entities::PatternRecognizer;
    use crate::parser::traits::EntityLabel;
    use test_case::test_case;

    fn extractor() -> TitleExtractor {
        TitleExtractor::new(Arc::new(PatternRecognizer::new().unwrap())).unwrap()
    }

    #[test_case("Dentist appointment tomorrow at 2pm" => "Dentist appointment" ; "relative with time")]
    #[test_case("exam next Friday" => "Exam" ; "weekday")]
    #[test_case("Meeting on 19th June" => "Meeting" ; "day month")]
    #[test_case("I have an exam on 3rd March at 9am." => "Exam" ; "filler words")]
    #[test_case("don't forget the day after a party with Sam!" => "Party with Sam" ; "chained phrase")]
    #[test_case("tomorrow" => "Event" ; "placeholder")]
    #[test_case("call mom at 4:30pm" => "Call mom" ; "bare time")]
    #[test_case("call at 10.30 tomorrow" => "Call" ; "dotted time")]
    #[test_case("meeting at 3 tomorrow" => "Meeting" ; "bare hour")]
    fn test_summarize(phrase: &str) -> String {
        extractor().summarize(phrase)
    }

    #[test]
    fn test_summarize_keeps_words_containing_filler() {
        assert_eq!(
            extractor().summarize("Sandra's band concert on Monday"),
            "Sandra's band concert"
        );
    }

    #[test_case("also" => true ; "also")]
    #[test_case("and then" => true ; "and then")]
    #[test_case("Also, and." => true ; "punctuation only")]
    #[test_case("also tomorrow" => false ; "relative word counts")]
    #[test_case("gym on Monday" => false ; "real event")]
    fn test_is_non_event(phrase: &str) -> bool {
        extractor().is_non_event(phrase)
    }

    struct FixedRecognizer(Vec<EntitySpan>);

    impl EntityRecognizer for FixedRecognizer {
        fn recognize(&self, _text: &str) -> Vec<EntitySpan> {
            self.0.clone()
        }
    }

    #[test]
    fn test_spans_removed_back_to_front() {
        let text = "lunch 12pm with Ana 2024-06-11";
        let recognizer = FixedRecognizer(vec![
            EntitySpan::new(EntityLabel::Time, 6, 10),
            EntitySpan::new(EntityLabel::Date, 20, 30),
        ]);
        let titles = TitleExtractor::new(Arc::new(recognizer)).unwrap();
        assert_eq!(titles.summarize(text), "Lunch with Ana");
    }
}
