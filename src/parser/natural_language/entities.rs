//! Pattern-based DATE/TIME entity recognizer
//!
//! Tags the kinds of spans a statistical tagger would label DATE or TIME in
//! short English event descriptions. Built once at startup and shared.

use log::debug;
use regex::Regex;

use crate::parser::traits::{EntityLabel, EntityRecognizer, EntitySpan};
use crate::parser::utils::{compile, MONTH_ALTERNATION, WEEKDAY_ALTERNATION};
use crate::parser::ExtractionError;

pub struct PatternRecognizer {
    patterns: Vec<(EntityLabel, Regex)>,
}

impl PatternRecognizer {
    pub fn new() -> Result<Self, ExtractionError> {
        let sources = [
            (
                EntityLabel::Date,
                r"(?i)\b(?:(?:the\s+)?day\s+after(?:\s+tomorrow)?|tomorrow|today|tonight|(?:next|this)\s+(?:week|month|year))\b"
                    .to_string(),
            ),
            (
                EntityLabel::Date,
                format!(r"(?i)\b(?:(?:next|this|coming)\s+)?(?:{})s?\b", WEEKDAY_ALTERNATION),
            ),
            (
                EntityLabel::Date,
                format!(
                    r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:{})\b(?:,?\s+\d{{4}})?",
                    MONTH_ALTERNATION
                ),
            ),
            (
                EntityLabel::Date,
                format!(
                    r"(?i)\b(?:{})\s+\d{{1,2}}(?:st|nd|rd|th)?\b(?:,?\s+\d{{4}})?",
                    MONTH_ALTERNATION
                ),
            ),
            (EntityLabel::Date, r"\b\d{4}-\d{1,2}-\d{1,2}\b".to_string()),
            (EntityLabel::Date, r"\b\d{1,2}/\d{1,2}(?:/\d{2,4})?\b".to_string()),
            (EntityLabel::Date, r"(?i)\bin\s+\d{1,3}\s+(?:days?|weeks?)\b".to_string()),
            (EntityLabel::Time, r"(?i)\b\d{1,2}(?::\d{2})?\s*[ap]\.?m\b\.?".to_string()),
            (EntityLabel::Time, r"\b\d{1,2}[:.]\d{2}\b".to_string()),
            (EntityLabel::Time, r"(?i)\bat\s+\d{1,2}\b".to_string()),
            (
                EntityLabel::Time,
                r"(?i)\b(?:noon|midday|midnight|(?:this\s+|in\s+the\s+)?(?:morning|afternoon|evening))\b"
                    .to_string(),
            ),
        ];

        let patterns = sources
            .into_iter()
            .map(|(label, source)| {
                let what = match label {
                    EntityLabel::Date => "DATE entity",
                    EntityLabel::Time => "TIME entity",
                };
                compile(what, &source).map(|re| (label, re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }
}

/// Sort spans and fold overlapping ones together, keeping the earlier label
fn merge_spans(mut spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
    spans.sort_by_key(|s| (s.start, std::cmp::Reverse(s.end)));

    let mut merged: Vec<EntitySpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if last.overlaps(&span) => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

impl EntityRecognizer for PatternRecognizer {
    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let spans = self
            .patterns
            .iter()
            .flat_map(|(label, re)| {
                re.find_iter(text).map(move |m| EntitySpan::new(*label, m.start(), m.end()))
            })
            .collect();

        let merged = merge_spans(spans);
        for span in &merged {
            debug!("{:?} entity: '{}'", span.label, &text[span.start..span.end]);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tagged(text: &str) -> Vec<(EntityLabel, String)> {
        PatternRecognizer::new()
            .unwrap()
            .recognize(text)
            .into_iter()
            .map(|s| (s.label, text[s.start..s.end].to_string()))
            .collect()
    }

    #[test]
    fn test_relative_and_time() {
        assert_eq!(
            tagged("Dentist appointment tomorrow at 2pm"),
            vec![
                (EntityLabel::Date, "tomorrow".to_string()),
                (EntityLabel::Time, "2pm".to_string()),
            ]
        );
    }

    #[test]
    fn test_weekday_with_modifier() {
        assert_eq!(
            tagged("exam next Friday"),
            vec![(EntityLabel::Date, "next Friday".to_string())]
        );
    }

    #[test]
    fn test_day_month_with_year() {
        assert_eq!(
            tagged("Meeting on 19th June 2025 at 10:30"),
            vec![
                (EntityLabel::Date, "19th June 2025".to_string()),
                (EntityLabel::Time, "at 10:30".to_string()),
            ]
        );
    }

    #[test]
    fn test_dotted_and_bare_hour_times() {
        assert_eq!(
            tagged("call at 10.30 tomorrow"),
            vec![
                (EntityLabel::Time, "at 10.30".to_string()),
                (EntityLabel::Date, "tomorrow".to_string()),
            ]
        );
        assert_eq!(tagged("meeting at 3"), vec![(EntityLabel::Time, "at 3".to_string())]);
        assert!(tagged("meet at 3rd gate").is_empty());
    }

    #[test]
    fn test_overlapping_spans_merge() {
        let spans = merge_spans(vec![
            EntitySpan::new(EntityLabel::Date, 4, 10),
            EntitySpan::new(EntityLabel::Time, 8, 14),
            EntitySpan::new(EntityLabel::Time, 20, 24),
        ]);
        assert_eq!(
            spans,
            vec![
                EntitySpan::new(EntityLabel::Date, 4, 14),
                EntitySpan::new(EntityLabel::Time, 20, 24),
            ]
        );
    }

    #[test]
    fn test_plain_text_has_no_entities() {
        assert!(tagged("blah blah").is_empty());
        assert!(tagged("Sandy band practice").is_empty());
    }
}
