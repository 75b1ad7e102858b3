//! iCalendar output for assembled events.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Component, Property};
use log::info;
use std::fs;
use std::path::Path;

use super::{Calendar, CalendarError, EventRecord};

/// PRODID written in place of the icalendar crate's default
pub const PRODUCT_ID: &str = "-//TextCal//textcal//EN";

/// Render events as an iCalendar document
pub fn render_ics(calendar: &Calendar) -> String {
    let mut cal = icalendar::Calendar::new();
    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();

    for event in calendar.events() {
        cal.push(to_ics_event(event, &dtstamp));
    }

    let cal = cal.done();
    normalize_ics(&cal.to_string())
}

/// Write events to `path`. Nothing is written for an empty calendar.
pub fn write_calendar(calendar: &Calendar, path: &Path) -> Result<(), CalendarError> {
    if calendar.is_empty() {
        return Err(CalendarError::NoEvents);
    }

    fs::write(path, render_ics(calendar))
        .map_err(|source| CalendarError::Write { path: path.to_path_buf(), source })?;
    info!("Wrote {} event(s) to {}", calendar.len(), path.display());
    Ok(())
}

fn to_ics_event(event: &EventRecord, dtstamp: &str) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.summary(&event.summary);
    ics_event.add_property("DTSTAMP", dtstamp);
    add_datetime_property(&mut ics_event, "DTSTART", &event.start);
    add_datetime_property(&mut ics_event, "DTEND", &event.end);
    ics_event.done()
}

/// UTC times get a Z suffix, anything else a TZID parameter
fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &DateTime<Tz>) {
    let zone = time.timezone();
    if zone == Tz::UTC {
        ics_event.add_property(name, time.format("%Y%m%dT%H%M%SZ").to_string());
    } else {
        let mut prop = Property::new(name, time.naive_local().format("%Y%m%dT%H%M%S").to_string());
        prop.add_parameter("TZID", zone.name());
        ics_event.append_property(prop);
    }
}

/// Replace PRODID and drop the implied CALSCALE line
fn normalize_ics(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODUCT_ID);
            result.push_str("\r\n");
            continue;
        }
        if line == "CALSCALE:GREGORIAN" {
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
