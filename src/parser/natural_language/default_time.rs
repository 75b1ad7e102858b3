//! Keyword-driven default start times
//!
//! Used only when a phrase resolved to a date without an explicit time.

use chrono::NaiveTime;

/// Keyword categories, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Exam,
    Meeting,
    Other,
}

impl EventKind {
    pub fn classify(phrase: &str) -> Self {
        let lowered = phrase.to_lowercase();
        if lowered.contains("exam") {
            EventKind::Exam
        } else if lowered.contains("meeting") || lowered.contains("appointment") {
            EventKind::Meeting
        } else {
            EventKind::Other
        }
    }

    /// Canonical start as (hour, minute)
    pub fn start(self) -> (u32, u32) {
        match self {
            EventKind::Exam => (9, 0),
            EventKind::Meeting => (15, 0),
            EventKind::Other => (12, 0),
        }
    }
}

/// Default start time for a phrase with no stated time
pub fn default_time_for(phrase: &str) -> NaiveTime {
    let (hour, minute) = EventKind::classify(phrase).start();
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Final EXAM next Friday" => (9, 0) ; "exam")]
    #[test_case("Meeting on 19th June" => (15, 0) ; "meeting")]
    #[test_case("dentist appointment" => (15, 0) ; "appointment")]
    #[test_case("exam prep meeting" => (9, 0) ; "exam wins over meeting")]
    #[test_case("birthday party" => (12, 0) ; "other")]
    fn test_default_start(phrase: &str) -> (u32, u32) {
        EventKind::classify(phrase).start()
    }

    #[test]
    fn test_default_time_for() {
        assert_eq!(default_time_for("Exam"), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }
}
