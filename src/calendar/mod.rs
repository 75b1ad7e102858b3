use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use std::path::PathBuf;
use uuid::Uuid;

mod assembler;
mod ics_writer;

pub use assembler::*;
pub use ics_writer::*;

/// Domain suffix for generated event identifiers
pub const UID_DOMAIN: &str = "event.org";

/// Every generated event lasts this long
pub fn event_duration() -> Duration {
    Duration::hours(1)
}

/// Custom error type for calendar operations
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("No events to write")]
    NoEvents,
    #[error("Local time {local} does not exist in {timezone}")]
    TimeZone { local: chrono::NaiveDateTime, timezone: Tz },
    #[error("Could not write calendar file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One resolved event. Built once and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub summary: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub uid: String,
}

impl EventRecord {
    /// Create an event with a fresh identifier and the standard one-hour duration
    pub fn new(summary: impl Into<String>, start: DateTime<Tz>) -> Self {
        Self {
            summary: summary.into(),
            end: start + event_duration(),
            start,
            uid: format!("{}@{}", Uuid::new_v4(), UID_DOMAIN),
        }
    }
}

/// Events in the order their phrases appeared
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    events: Vec<EventRecord>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: EventRecord) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn test_event_record_duration_and_uid() {
        let start = Tz::UTC.with_ymd_and_hms(2024, 6, 11, 14, 0, 0).unwrap();
        let event = EventRecord::new("Dentist appointment", start);
        assert_eq!(event.end - event.start, Duration::hours(1));
        assert!(event.uid.ends_with("@event.org"));
    }

    #[test]
    fn test_uids_unique_for_identical_events() {
        let start = Tz::UTC.with_ymd_and_hms(2024, 6, 11, 14, 0, 0).unwrap();
        let uids: HashSet<String> =
            (0..50).map(|_| EventRecord::new("Same", start).uid).collect();
        assert_eq!(uids.len(), 50);
    }

    #[test]
    fn test_calendar_keeps_insertion_order() {
        let mut calendar = Calendar::new();
        let start = Tz::UTC.with_ymd_and_hms(2024, 6, 11, 9, 0, 0).unwrap();
        calendar.push(EventRecord::new("Second by date", start + Duration::days(1)));
        calendar.push(EventRecord::new("First by date", start));
        let titles: Vec<&str> = calendar.events().iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(titles, vec!["Second by date", "First by date"]);
        assert_eq!(calendar.len(), 2);
    }
}
