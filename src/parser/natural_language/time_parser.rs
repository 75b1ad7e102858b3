//! Clock-time parsing shared by the date resolver rules

use chrono::NaiveTime;
use log::debug;
use regex::Regex;

use super::date_resolver::ResolveError;
use crate::parser::utils::{compile, MONTH_ALTERNATION};
use crate::parser::ExtractionError;

/// Convert a 12-hour clock hour to 24-hour format.
///
/// Any pm hour below 12 gains 12; 12am becomes 0.
pub fn convert_to_24_hour(hour: u32, meridiem: &str) -> u32 {
    let meridiem = meridiem.to_lowercase();
    if meridiem.starts_with('p') && hour < 12 {
        hour + 12
    } else if meridiem.starts_with('a') && hour == 12 {
        0
    } else {
        hour
    }
}

/// Build a clock time from captured parts
///
/// # Arguments
///
/// * `hour` - Hour as written (1-12 with a meridiem, 0-23 without)
/// * `minute` - Minute, 0-59
/// * `meridiem` - Optional "am"/"pm" marker (only the first letter matters)
pub fn clock_time(
    hour: u32,
    minute: u32,
    meridiem: Option<&str>,
) -> Result<NaiveTime, ResolveError> {
    let hour_24 = match meridiem {
        Some(m) => {
            if hour == 0 || hour > 12 {
                return Err(ResolveError::InvalidTime { hour, minute });
            }
            convert_to_24_hour(hour, m)
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour_24, minute, 0).ok_or(ResolveError::InvalidTime { hour, minute })
}

/// Finds clock times inside free text.
///
/// Priority: 12-hour times, then 24-hour "HH:MM" or "HH.MM", then a bare
/// hour after "at", then named times (noon, midnight), then parts of the day.
pub struct TimeParser {
    meridiem: Regex,
    clock_24h: Regex,
    bare_hour: Regex,
    month_word: Regex,
    named: Regex,
    part_of_day: Regex,
}

impl TimeParser {
    pub fn new() -> Result<Self, ExtractionError> {
        Ok(Self {
            meridiem: compile("12-hour time", r"(?i)\b(\d{1,2})(?::(\d{2}))?\s*([ap])\.?m\b\.?")?,
            clock_24h: compile("24-hour time", r"\b([01]?\d|2[0-3])[:.]([0-5]\d)\b")?,
            bare_hour: compile("bare hour", r"(?i)\bat\s+(\d{1,2})\b(\S*)(?:\s+([a-z]+))?")?,
            month_word: compile("month name", &format!(r"(?i)^(?:{})$", MONTH_ALTERNATION))?,
            named: compile("named time", r"(?i)\b(noon|midday|midnight)\b")?,
            part_of_day: compile("part of day", r"(?i)\b(morning|afternoon|evening|tonight)\b")?,
        })
    }

    /// Find an explicit clock time: digits with a meridiem, "HH:MM", "at 3", noon or midnight.
    pub fn find_clock_time(&self, text: &str) -> Option<NaiveTime> {
        if let Some(caps) = self.meridiem.captures(text) {
            let hour: u32 = caps[1].parse().ok()?;
            let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
            match clock_time(hour, minute, Some(&caps[3])) {
                Ok(time) => {
                    debug!("Found 12-hour time '{}' -> {}", &caps[0], time);
                    return Some(time);
                }
                Err(e) => debug!("Ignoring '{}': {}", &caps[0], e),
            }
        }

        if let Some(caps) = self.clock_24h.captures(text) {
            let hour: u32 = caps[1].parse().ok()?;
            let minute: u32 = caps[2].parse().ok()?;
            if let Ok(time) = clock_time(hour, minute, None) {
                debug!("Found 24-hour time '{}' -> {}", &caps[0], time);
                return Some(time);
            }
        }

        if let Some(time) = self.find_bare_hour(text) {
            return Some(time);
        }

        let caps = self.named.captures(text)?;
        let hour = match caps[1].to_lowercase().as_str() {
            "midnight" => 0,
            _ => 12,
        };
        NaiveTime::from_hms_opt(hour, 0, 0)
    }

    /// "at 3" as a 24-hour clock hour; not "at 3/4", "at 3rd" or "at 3 June"
    fn find_bare_hour(&self, text: &str) -> Option<NaiveTime> {
        let caps = self.bare_hour.captures(text)?;
        let trailing_ok = caps[2].chars().all(|c| matches!(c, ',' | '.' | ';' | '!' | '?'));
        let before_month = caps.get(3).is_some_and(|w| self.month_word.is_match(w.as_str()));
        if !trailing_ok || before_month {
            return None;
        }

        let hour: u32 = caps[1].parse().ok()?;
        let time = clock_time(hour, 0, None).ok()?;
        debug!("Found bare hour '{}' -> {}", caps[0].trim(), time);
        Some(time)
    }

    /// Like [`find_clock_time`](Self::find_clock_time), falling back to parts of the day.
    pub fn find_time(&self, text: &str) -> Option<NaiveTime> {
        if let Some(time) = self.find_clock_time(text) {
            return Some(time);
        }

        let caps = self.part_of_day.captures(text)?;
        let hour = match caps[1].to_lowercase().as_str() {
            "morning" => 9,
            "afternoon" => 14,
            "evening" => 19,
            _ => 20,
        };
        debug!("Using part-of-day time for '{}'", &caps[1]);
        NaiveTime::from_hms_opt(hour, 0, 0)
    }
}
