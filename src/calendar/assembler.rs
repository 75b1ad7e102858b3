//! Turns an ordered list of phrases into calendar events.
//!
//! Phrases are processed strictly in order: a chainable phrase such as
//! "the day after" resolves against the date of an earlier one.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{Calendar, CalendarError, EventRecord};
use crate::parser::natural_language::default_time::default_time_for;
use crate::parser::{DateResolver, ResolveContext, ResolveError, TitleExtractor};

/// When the chain reference date moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ChainPolicy {
    /// Only phrases the resolver marks chainable update the reference
    #[default]
    ChainableOnly,
    /// Every assembled event updates the reference
    EveryEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// Zone attached to resolved local times
    pub timezone: Tz,
    /// Convert to UTC before emitting
    pub use_standard_timezone: bool,
    pub chain_policy: ChainPolicy,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            use_standard_timezone: true,
            chain_policy: ChainPolicy::default(),
        }
    }
}

/// Why a phrase produced no event
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error("No valid date found: {0}")]
    Unresolved(#[from] ResolveError),
    #[error(transparent)]
    TimeZone(#[from] CalendarError),
}

#[derive(Debug)]
pub struct SkippedPhrase {
    pub phrase: String,
    pub reason: SkipReason,
}

impl SkippedPhrase {
    fn new(phrase: &str, reason: impl Into<SkipReason>) -> Self {
        Self { phrase: phrase.to_string(), reason: reason.into() }
    }
}

/// Result of assembling one batch of phrases
#[derive(Debug, Default)]
pub struct Assembly {
    pub calendar: Calendar,
    pub skipped: Vec<SkippedPhrase>,
}

pub struct EventAssembler<'a> {
    resolver: &'a DateResolver,
    titles: &'a TitleExtractor,
    options: AssemblerOptions,
}

impl<'a> EventAssembler<'a> {
    pub fn new(
        resolver: &'a DateResolver,
        titles: &'a TitleExtractor,
        options: AssemblerOptions,
    ) -> Self {
        Self { resolver, titles, options }
    }

    /// Assemble events from phrases, given the current date in the local zone
    pub fn assemble<S: AsRef<str>>(&self, phrases: &[S], today: NaiveDate) -> Assembly {
        let mut assembly = Assembly::default();
        let mut reference: Option<NaiveDate> = None;

        for phrase in phrases {
            let phrase = phrase.as_ref();
            if self.titles.is_non_event(phrase) {
                debug!("Skipping connective fragment '{}'", phrase);
                continue;
            }

            let ctx = ResolveContext::new(today, reference);
            let resolution = match self.resolver.resolve(phrase, &ctx) {
                Ok(resolution) => resolution,
                Err(e) => {
                    warn!("No valid date found in segment: '{}' ({})", phrase, e);
                    assembly.skipped.push(SkippedPhrase::new(phrase, e));
                    continue;
                }
            };

            let local = resolution.moment.with_default_time(|| default_time_for(phrase));
            let start = match self.localize(local) {
                Ok(start) => start,
                Err(e) => {
                    warn!("Skipping segment '{}': {}", phrase, e);
                    assembly.skipped.push(SkippedPhrase::new(phrase, e));
                    continue;
                }
            };

            let event = EventRecord::new(self.titles.summarize(phrase), start);
            debug!("Assembled '{}' at {} ({})", event.summary, event.start, event.uid);
            assembly.calendar.push(event);

            if resolution.chainable || self.options.chain_policy == ChainPolicy::EveryEvent {
                reference = Some(resolution.moment.date);
            }
        }

        assembly
    }

    /// Attach the configured zone, converting to UTC when normalising.
    ///
    /// A repeated local time (clocks turned back) takes its first occurrence.
    fn localize(&self, local: NaiveDateTime) -> Result<DateTime<Tz>, CalendarError> {
        let zoned = self
            .options
            .timezone
            .from_local_datetime(&local)
            .earliest()
            .ok_or(CalendarError::TimeZone { local, timezone: self.options.timezone })?;

        Ok(if self.options.use_standard_timezone { zoned.with_timezone(&Tz::UTC) } else { zoned })
    }
}
