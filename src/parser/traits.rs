//! Parser traits module for TextCal
//!
//! This module defines the seams of the extraction pipeline: date matchers
//! composed by the resolver, and the entity recognizer used for title cleanup.

use crate::parser::natural_language::date_resolver::{ResolveContext, ResolveError, Resolution};

/// One rule in the resolver's first-match-wins chain.
///
/// `Ok(None)` passes the phrase on to the next matcher. `Err` stops the chain:
/// the matcher recognised its pattern but the values were impossible.
pub trait DateMatcher: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Try to resolve a lowercased phrase
    fn try_match(
        &self,
        phrase: &str,
        ctx: &ResolveContext,
    ) -> Result<Option<Resolution>, ResolveError>;
}

/// Entity categories the title extractor cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Date,
    Time,
}

/// A tagged byte range within a phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

impl EntitySpan {
    pub fn new(label: EntityLabel, start: usize, end: usize) -> Self {
        Self { label, start, end }
    }

    pub fn overlaps(&self, other: &EntitySpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Named-entity recognizer over a single phrase.
///
/// Implementations are built once per process and shared read-only.
/// Returned spans are sorted by start offset and do not overlap.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<EntitySpan>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_overlap() {
        let a = EntitySpan::new(EntityLabel::Date, 0, 8);
        let b = EntitySpan::new(EntityLabel::Time, 5, 10);
        let c = EntitySpan::new(EntityLabel::Time, 8, 12);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
