//! The structured result of parsing one event.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

/// Wall-clock format for timed events.
const TIMED_FORMAT: &str = "%Y%m%dT%H%M%S";
/// Date format for all-day events.
const ALL_DAY_FORMAT: &str = "%Y%m%d";

/// One calendar event described by free text.
///
/// `end` is always after `start`, and `title` holds none of the text that
/// produced the other fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSpec {
    pub title: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub is_all_day: bool,
    /// `RRULE:FREQ=...;INTERVAL=...`, if the text asked for one.
    pub recurrence_rule: Option<String>,
    pub description: String,
    pub location: String,
    /// Target calendar resolved from an `@nickname`.
    pub calendar_id: Option<String>,
}

impl EventSpec {
    /// The `start/end` pair in calendar-template form, e.g.
    /// `20261021T140000/20261021T150000`.
    pub fn dates(&self) -> String {
        date_range(&self.start, &self.end, self.is_all_day)
    }
}

/// Format a start/end pair as local wall-clock values joined by `/`:
/// `YYYYMMDDTHHMMSS` for timed events, `YYYYMMDD` for all-day ones.
pub fn date_range(start: &DateTime<Tz>, end: &DateTime<Tz>, is_all_day: bool) -> String {
    let format = if is_all_day {
        ALL_DAY_FORMAT
    } else {
        TIMED_FORMAT
    };
    format!("{}/{}", start.format(format), end.format(format))
}
