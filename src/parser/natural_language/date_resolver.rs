//! Date/time resolution for a single phrase
//!
//! The resolver runs an ordered chain of [`DateMatcher`]s and the first one to
//! recognise the phrase wins:
//!
//! 1. relative phrases ("the day after", "tomorrow", "next week")
//! 2. explicit day-month dates ("19th June 2025 at 3pm")
//! 3. weekday names ("Friday", always strictly in the future)
//! 4. a general fallback (ISO and US dates, "June 19", "in 3 days", bare times)

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::time_parser::{clock_time, TimeParser};
use crate::parser::traits::DateMatcher;
use crate::parser::utils::{compile, MONTH_ALTERNATION, WEEKDAY_ALTERNATION};
use crate::parser::ExtractionError;

static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let mut map = HashMap::new();
    let names = [
        ("january", "jan"),
        ("february", "feb"),
        ("march", "mar"),
        ("april", "apr"),
        ("may", "may"),
        ("june", "jun"),
        ("july", "jul"),
        ("august", "aug"),
        ("september", "sep"),
        ("october", "oct"),
        ("november", "nov"),
        ("december", "dec"),
    ];
    for (number, (full, short)) in (1u32..).zip(names) {
        map.insert(full, number);
        map.insert(short, number);
    }
    map.insert("sept", 9);
    map
});

static WEEKDAYS: Lazy<HashMap<&'static str, Weekday>> = Lazy::new(|| {
    HashMap::from([
        ("monday", Weekday::Mon),
        ("tuesday", Weekday::Tue),
        ("wednesday", Weekday::Wed),
        ("thursday", Weekday::Thu),
        ("friday", Weekday::Fri),
        ("saturday", Weekday::Sat),
        ("sunday", Weekday::Sun),
    ])
});

/// Why a phrase could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no date or time expression found")]
    NoDateFound,
    #[error("{year}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("{hour}:{minute:02} is not a valid time of day")]
    InvalidTime { hour: u32, minute: u32 },
    #[error("unknown month '{0}'")]
    UnknownMonth(String),
    #[error("date is out of the supported range")]
    OutOfRange,
}

/// An absolute date with an optional explicit time of day.
///
/// `time == None` means no time was stated; midnight is only ever an
/// explicit value here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMoment {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

impl ResolvedMoment {
    pub fn new(date: NaiveDate, time: Option<NaiveTime>) -> Self {
        Self { date, time }
    }

    /// Combine into a naive timestamp, calling `default` only when no time was stated
    pub fn with_default_time<F>(&self, default: F) -> NaiveDateTime
    where
        F: FnOnce() -> NaiveTime,
    {
        self.date.and_time(self.time.unwrap_or_else(default))
    }
}

/// Which rule produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Relative,
    DayMonth,
    Weekday,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub moment: ResolvedMoment,
    /// Whether this date should become the new chain reference
    pub chainable: bool,
    pub rule: MatchRule,
}

impl Resolution {
    fn new(rule: MatchRule, date: NaiveDate, time: Option<NaiveTime>) -> Self {
        Self { moment: ResolvedMoment::new(date, time), chainable: false, rule }
    }

    fn chainable(mut self) -> Self {
        self.chainable = true;
        self
    }
}

/// Dates a phrase is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveContext {
    /// The current wall-clock date
    pub today: NaiveDate,
    /// The chain reference carried over from earlier phrases
    pub reference: Option<NaiveDate>,
}

impl ResolveContext {
    pub fn new(today: NaiveDate, reference: Option<NaiveDate>) -> Self {
        Self { today, reference }
    }

    /// Base for relative offsets: the chain reference when present, else today
    pub fn anchor(&self) -> NaiveDate {
        self.reference.unwrap_or(self.today)
    }
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, ResolveError> {
    date.checked_add_days(Days::new(days)).ok_or(ResolveError::OutOfRange)
}

fn month_number(name: &str) -> Result<u32, ResolveError> {
    MONTHS
        .get(name.to_lowercase().as_str())
        .copied()
        .ok_or_else(|| ResolveError::UnknownMonth(name.to_string()))
}

fn make_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, ResolveError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ResolveError::InvalidDate { year, month, day })
}

/// Year-less dates prefer the future: a date already past this year rolls to next year.
fn prefer_future(today: NaiveDate, month: u32, day: u32) -> Result<NaiveDate, ResolveError> {
    let this_year = make_date(today.year(), month, day);
    match this_year {
        Ok(date) if date >= today => Ok(date),
        _ => make_date(today.year() + 1, month, day),
    }
}

/// Rule 1: fixed vocabulary of relative expressions, by substring
pub struct RelativeMatcher {
    times: Arc<TimeParser>,
}

impl RelativeMatcher {
    pub fn new(times: Arc<TimeParser>) -> Self {
        Self { times }
    }
}

impl DateMatcher for RelativeMatcher {
    fn name(&self) -> &'static str {
        "relative"
    }

    fn try_match(
        &self,
        phrase: &str,
        ctx: &ResolveContext,
    ) -> Result<Option<Resolution>, ResolveError> {
        let time = self.times.find_time(phrase);

        let resolution = if phrase.contains("the day after tomorrow") {
            Resolution::new(MatchRule::Relative, add_days(ctx.today, 2)?, time)
        } else if phrase.contains("the day after") {
            let base = ctx.reference.unwrap_or(ctx.today);
            Resolution::new(MatchRule::Relative, add_days(base, 1)?, time).chainable()
        } else if phrase.contains("tomorrow") {
            Resolution::new(MatchRule::Relative, add_days(ctx.today, 1)?, time)
        } else if phrase.contains("next week") {
            Resolution::new(MatchRule::Relative, add_days(ctx.today, 7)?, time)
        } else {
            return Ok(None);
        };

        Ok(Some(resolution))
    }
}

/// Rule 2: `<day>[st|nd|rd|th] <Month> [<year>] [at <hour>[:<minute>] [am|pm]]`
pub struct DayMonthMatcher {
    pattern: Regex,
    times: Arc<TimeParser>,
}

impl DayMonthMatcher {
    pub fn new(times: Arc<TimeParser>) -> Result<Self, ExtractionError> {
        let pattern = format!(
            r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({})\b(?:,?\s+(\d{{4}}))?(?:\s+at\s+(\d{{1,2}})(?::(\d{{2}}))?(?:\s*([ap])\.?m\b\.?)?)?",
            MONTH_ALTERNATION
        );
        Ok(Self { pattern: compile("day-month date", &pattern)?, times })
    }
}

impl DateMatcher for DayMonthMatcher {
    fn name(&self) -> &'static str {
        "day-month"
    }

    fn try_match(
        &self,
        phrase: &str,
        ctx: &ResolveContext,
    ) -> Result<Option<Resolution>, ResolveError> {
        let Some(caps) = self.pattern.captures(phrase) else {
            return Ok(None);
        };

        let day: u32 = caps[1].parse().map_err(|_| ResolveError::NoDateFound)?;
        let month = month_number(&caps[2])?;
        let year = match caps.get(3) {
            Some(y) => y.as_str().parse().map_err(|_| ResolveError::NoDateFound)?,
            None => ctx.today.year(),
        };
        let date = make_date(year, month, day)?;

        let time = match caps.get(4) {
            Some(hour) => {
                let hour: u32 = hour.as_str().parse().map_err(|_| ResolveError::NoDateFound)?;
                let minute: u32 = match caps.get(5) {
                    Some(m) => m.as_str().parse().map_err(|_| ResolveError::NoDateFound)?,
                    None => 0,
                };
                Some(clock_time(hour, minute, caps.get(6).map(|m| m.as_str()))?)
            }
            // "at noon", a trailing "7pm" and the like
            None => self.times.find_time(phrase),
        };

        Ok(Some(Resolution::new(MatchRule::DayMonth, date, time)))
    }
}

/// Rule 3: the next occurrence of a named weekday, never today
pub struct WeekdayMatcher {
    pattern: Regex,
    times: Arc<TimeParser>,
}

impl WeekdayMatcher {
    pub fn new(times: Arc<TimeParser>) -> Result<Self, ExtractionError> {
        let pattern = format!(r"(?i)\b({})\b", WEEKDAY_ALTERNATION);
        Ok(Self { pattern: compile("weekday", &pattern)?, times })
    }
}

/// Days from `today` to the next `target`, in 1..=7
pub fn days_until_weekday(today: NaiveDate, target: Weekday) -> u64 {
    let current = today.weekday().num_days_from_monday();
    let wanted = target.num_days_from_monday();
    match (wanted + 7 - current) % 7 {
        0 => 7,
        n => u64::from(n),
    }
}

impl DateMatcher for WeekdayMatcher {
    fn name(&self) -> &'static str {
        "weekday"
    }

    fn try_match(
        &self,
        phrase: &str,
        ctx: &ResolveContext,
    ) -> Result<Option<Resolution>, ResolveError> {
        let Some(m) = self.pattern.find(phrase) else {
            return Ok(None);
        };
        let Some(&weekday) = WEEKDAYS.get(m.as_str().to_lowercase().as_str()) else {
            return Ok(None);
        };

        let date = add_days(ctx.today, days_until_weekday(ctx.today, weekday))?;
        debug!("Weekday '{}' resolves to {}", m.as_str(), date);
        Ok(Some(Resolution::new(MatchRule::Weekday, date, self.times.find_time(phrase))))
    }
}

/// Rule 4: general-purpose fallback, biased towards future dates
pub struct FallbackMatcher {
    iso: Regex,
    month_day: Regex,
    slash: Regex,
    offset: Regex,
    today_word: Regex,
    times: Arc<TimeParser>,
}

impl FallbackMatcher {
    pub fn new(times: Arc<TimeParser>) -> Result<Self, ExtractionError> {
        Ok(Self {
            iso: compile("ISO date", r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b")?,
            month_day: compile(
                "month-day date",
                &format!(
                    r"(?i)\b({})\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(\d{{4}}))?",
                    MONTH_ALTERNATION
                ),
            )?,
            slash: compile("numeric date", r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}))?\b")?,
            offset: compile("relative offset", r"(?i)\bin\s+(\d{1,3})\s+(day|week)s?\b")?,
            today_word: compile("today", r"(?i)\b(?:today|tonight)\b")?,
            times,
        })
    }

    fn find_date(
        &self,
        phrase: &str,
        ctx: &ResolveContext,
    ) -> Result<Option<NaiveDate>, ResolveError> {
        if let Some(caps) = self.iso.captures(phrase) {
            let year: i32 = caps[1].parse().map_err(|_| ResolveError::NoDateFound)?;
            let month: u32 = caps[2].parse().map_err(|_| ResolveError::NoDateFound)?;
            let day: u32 = caps[3].parse().map_err(|_| ResolveError::NoDateFound)?;
            return make_date(year, month, day).map(Some);
        }

        if let Some(caps) = self.month_day.captures(phrase) {
            let month = month_number(&caps[1])?;
            let day: u32 = caps[2].parse().map_err(|_| ResolveError::NoDateFound)?;
            return match caps.get(3) {
                Some(y) => {
                    let year: i32 = y.as_str().parse().map_err(|_| ResolveError::NoDateFound)?;
                    make_date(year, month, day).map(Some)
                }
                None => prefer_future(ctx.today, month, day).map(Some),
            };
        }

        if let Some(caps) = self.slash.captures(phrase) {
            let month: u32 = caps[1].parse().map_err(|_| ResolveError::NoDateFound)?;
            let day: u32 = caps[2].parse().map_err(|_| ResolveError::NoDateFound)?;
            return match caps.get(3) {
                Some(y) => {
                    let year: i32 = y.as_str().parse().map_err(|_| ResolveError::NoDateFound)?;
                    make_date(year, month, day).map(Some)
                }
                None => prefer_future(ctx.today, month, day).map(Some),
            };
        }

        if let Some(caps) = self.offset.captures(phrase) {
            let count: u64 = caps[1].parse().map_err(|_| ResolveError::NoDateFound)?;
            let days = if caps[2].eq_ignore_ascii_case("week") { count * 7 } else { count };
            return add_days(ctx.anchor(), days).map(Some);
        }

        if self.today_word.is_match(phrase) {
            return Ok(Some(ctx.today));
        }

        Ok(None)
    }
}

impl DateMatcher for FallbackMatcher {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn try_match(
        &self,
        phrase: &str,
        ctx: &ResolveContext,
    ) -> Result<Option<Resolution>, ResolveError> {
        if let Some(date) = self.find_date(phrase, ctx)? {
            let time = self.times.find_time(phrase);
            return Ok(Some(Resolution::new(MatchRule::Fallback, date, time)));
        }

        // A clock time on its own is taken to mean today
        Ok(self
            .times
            .find_clock_time(phrase)
            .map(|time| Resolution::new(MatchRule::Fallback, ctx.today, Some(time))))
    }
}

/// Resolves phrases by running matchers in order; the first match wins.
pub struct DateResolver {
    matchers: Vec<Box<dyn DateMatcher>>,
}

impl DateResolver {
    /// Build the standard chain: relative, day-month, weekday, fallback
    pub fn new() -> Result<Self, ExtractionError> {
        let times = Arc::new(TimeParser::new()?);
        Ok(Self::with_matchers(vec![
            Box::new(RelativeMatcher::new(Arc::clone(&times))),
            Box::new(DayMonthMatcher::new(Arc::clone(&times))?),
            Box::new(WeekdayMatcher::new(Arc::clone(&times))?),
            Box::new(FallbackMatcher::new(times)?),
        ]))
    }

    pub fn with_matchers(matchers: Vec<Box<dyn DateMatcher>>) -> Self {
        Self { matchers }
    }

    pub fn resolve(&self, phrase: &str, ctx: &ResolveContext) -> Result<Resolution, ResolveError> {
        let lowered = phrase.to_lowercase();

        for matcher in &self.matchers {
            if let Some(resolution) = matcher.try_match(&lowered, ctx)? {
                debug!(
                    "Matcher '{}' resolved '{}' to {:?} (chainable: {})",
                    matcher.name(),
                    phrase,
                    resolution.moment,
                    resolution.chainable
                );
                return Ok(resolution);
            }
            debug!("Matcher '{}' passed on '{}'", matcher.name(), phrase);
        }

        Err(ResolveError::NoDateFound)
    }
}
