//! Batch input → URL list through the `QuickEvent` facade.

use chrono::{DateTime, TimeZone, Utc};
use quick_event::{EventUrlBuilder, ParseOptions, QuickEvent, QuickEventError, Settings};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap()
}

#[test]
fn single_event_url() {
    let urls = QuickEvent::default()
        .create_event_urls("Gym tomorrow 2pm", now())
        .unwrap();
    assert_eq!(
        urls,
        vec![
            "https://www.google.com/calendar/event?action=TEMPLATE&text=Gym\
             &dates=20261021T140000%2F20261021T150000&details=&location="
        ]
    );
}

#[test]
fn full_event_url() {
    let urls = QuickEvent::default()
        .create_event_urls(
            "Team sync d(weekly update) l(Room 4) every 2 weeks Friday 10am",
            now(),
        )
        .unwrap();
    assert_eq!(
        urls[0],
        "https://www.google.com/calendar/event?action=TEMPLATE&text=Team%20sync\
         &dates=20261023T100000%2F20261023T110000\
         &recur=RRULE%3AFREQ%3DWEEKLY%3BINTERVAL%3D2\
         &details=weekly%20update&location=Room%204"
    );
}

#[test]
fn multiple_events_keep_input_order() {
    let urls = QuickEvent::default()
        .create_event_urls("A 1pm; B 2pm", now())
        .unwrap();
    assert_eq!(urls.len(), 2);
    assert!(urls[0].contains("text=A&dates=20261020T130000%2F20261020T140000"));
    assert!(urls[1].contains("text=B&dates=20261020T140000%2F20261020T150000"));
}

#[test]
fn bad_segments_are_dropped() {
    let urls = QuickEvent::default()
        .create_event_urls("nothing here; Gym tomorrow 2pm; ; also nothing", now())
        .unwrap();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].contains("text=Gym"));
}

#[test]
fn nickname_sets_src() {
    let settings =
        Settings::from_json(r#"{"calendars": {"@work": "w@cal.com"}}"#).unwrap();
    let quick = QuickEvent::from_settings(settings).unwrap();

    let urls = quick.create_event_urls("Standup 9am @work", now()).unwrap();
    assert!(urls[0].contains("text=Standup&"));
    assert!(urls[0].ends_with("&src=w%40cal.com"));

    // An unknown nickname fails only its own segment
    let urls = quick
        .create_event_urls("Standup 9am @unknown; Lunch 1pm @work", now())
        .unwrap();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].contains("text=Lunch&"));
}

#[test]
fn unknown_nickname_alone_fails_the_batch() {
    let settings =
        Settings::from_json(r#"{"calendars": {"@work": "w@cal.com"}}"#).unwrap();
    let err = QuickEvent::from_settings(settings)
        .unwrap()
        .create_event_urls("Standup 9am @unknown", now())
        .unwrap_err();
    assert!(matches!(err, QuickEventError::NoEvents { .. }));
}

#[test]
fn empty_input_reports_no_valid_events() {
    let err = QuickEvent::default()
        .create_event_urls("", now())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "No valid events found. Please try a different format, like: \
         \"Meeting tomorrow 2pm\", \"Lunch Friday 1pm to 2pm\""
    );
}

#[test]
fn failed_multi_event_input_suggests_delimiter() {
    let err = QuickEvent::default()
        .create_event_urls("foo; bar", now())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not generate any events from the provided text. Please try a \
         different format, like: \"Meeting tomorrow 2pm\", \"Lunch Friday 1pm to 2pm\", \
         \"Meeting 2pm; Lunch 5pm\" (multiple events)"
    );
}

#[test]
fn custom_base_url_and_timezone() {
    let quick = QuickEvent::new(
        ParseOptions {
            timezone: "America/New_York".parse().unwrap(),
            ..ParseOptions::default()
        },
        EventUrlBuilder::new("https://calendar.example.com/render"),
    );
    let urls = quick.create_event_urls("Gym tomorrow 2pm", now()).unwrap();
    assert_eq!(
        urls[0],
        "https://calendar.example.com/render?action=TEMPLATE&text=Gym\
         &dates=20261021T140000%2F20261021T150000&details=&location="
    );
}
