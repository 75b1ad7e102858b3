// Resolver properties through the public parser API
use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use test_case::test_case;
use textcal::parser::{DateResolver, ResolveContext, ResolveError};

fn resolver() -> DateResolver {
    DateResolver::new().unwrap()
}

#[test_case(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap() ; "monday")]
#[test_case(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap() ; "year end")]
#[test_case(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap() ; "leap february")]
fn test_tomorrow_is_always_next_day(today: NaiveDate) {
    let resolver = resolver();
    for reference in [None, Some(today + Days::new(30))] {
        let ctx = ResolveContext::new(today, reference);
        let r = resolver.resolve("pay rent tomorrow", &ctx).unwrap();
        assert_eq!(r.moment.date, today + Days::new(1));
        assert!(!r.chainable);
    }
}

#[test]
fn test_weekday_named_today_is_a_week_away() {
    let resolver = resolver();
    let mut day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    for _ in 0..7 {
        let name = match day.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        };
        let ctx = ResolveContext::new(day, None);
        let r = resolver.resolve(&format!("yoga {}", name), &ctx).unwrap();
        assert_eq!(r.moment.date, day + Days::new(7), "for {}", name);
        day = day + Days::new(1);
    }
}

#[test]
fn test_day_after_follows_reference() {
    let resolver = resolver();
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let d = NaiveDate::from_ymd_opt(2024, 8, 31).unwrap();
    let ctx = ResolveContext::new(today, Some(d));
    let r = resolver.resolve("The Day After: cleanup", &ctx).unwrap();
    assert_eq!(r.moment.date, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
    assert_eq!(r.moment.time, None);
}

#[test_case("standup 4th July at 9:15am" => Some(NaiveTime::from_hms_opt(9, 15, 0).unwrap()) ; "morning")]
#[test_case("launch 4th July at 12pm" => Some(NaiveTime::from_hms_opt(12, 0, 0).unwrap()) ; "noon")]
#[test_case("launch 4th July at 12am" => Some(NaiveTime::from_hms_opt(0, 0, 0).unwrap()) ; "midnight")]
#[test_case("launch 4th July" => None ; "no time")]
fn test_explicit_time_clause(phrase: &str) -> Option<NaiveTime> {
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    resolver().resolve(phrase, &ResolveContext::new(today, None)).unwrap().moment.time
}

#[test]
fn test_unresolvable_phrase() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    assert_eq!(
        resolver().resolve("water the plants", &ResolveContext::new(today, None)),
        Err(ResolveError::NoDateFound)
    );
}
