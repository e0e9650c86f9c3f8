//! Sub-field extractors for event text.
//!
//! Each extractor is a pure function over the text it is given and returns
//! the extracted value together with the literal substring it matched, so
//! the caller can cut that substring out before the next extractor runs:
//!
//! - `every [N] <unit>` → recurrence rule ([`extract_recurrence`])
//! - `d(...)` → description ([`extract_description`])
//! - `l(...)` → location ([`extract_location`])
//! - `@nickname` → calendar nickname ([`extract_calendar_nickname`])

use std::sync::LazyLock;

use regex::{Captures, Regex};
use rrule::Frequency;

use crate::error::{QuickEventError, Result};
use crate::temporal::parse_weekday;

static RECURRENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bevery\s*(\d+)?\s*(\w+)").expect("valid recurrence regex")
});
static DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bd\(([^)]*)\)").expect("valid description regex"));
static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bl\(([^)]*)\)").expect("valid location regex"));
static NICKNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(@([[:alnum:]]+))").expect("valid nickname regex"));

/// A value pulled out of event text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub value: String,
    /// Literal substring of the input that carried the value.
    pub matched_span: String,
}

/// A recurrence parsed from `every [N] <unit>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub frequency: Frequency,
    pub interval: u32,
}

impl Recurrence {
    /// The rule in calendar-template form: `RRULE:FREQ=WEEKLY;INTERVAL=2`.
    pub fn to_rule(&self) -> String {
        format!("RRULE:FREQ={};INTERVAL={}", self.frequency, self.interval)
    }
}

/// Extract `every [N] <unit>`.
///
/// Returns `Ok(None)` when the text has no `every` phrase, and
/// [`QuickEventError::UnrecognizedRecurrenceUnit`] when none of its `every`
/// phrases has a unit that maps to a frequency. `every` inside a longer word
/// ("everyone") is passed over when a later phrase is recognized. The value
/// is the rule string from [`Recurrence::to_rule`].
pub fn extract_recurrence(text: &str) -> Result<Option<ExtractionResult>> {
    let mut first_error = None;
    for caps in RECURRENCE_RE.captures_iter(text) {
        match recurrence_from(&caps) {
            Ok(found) => return Ok(Some(found)),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    match first_error {
        Some(err) => Err(err),
        None => Ok(None),
    }
}

fn recurrence_from(caps: &Captures<'_>) -> Result<ExtractionResult> {
    let unit = &caps[2];
    let frequency = normalize_frequency(unit)
        .ok_or_else(|| QuickEventError::UnrecognizedRecurrenceUnit(unit.to_string()))?;
    let interval = match caps.get(1) {
        Some(n) => n
            .as_str()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| QuickEventError::UnrecognizedRecurrenceUnit(caps[0].to_string()))?,
        None => 1,
    };

    let recurrence = Recurrence {
        frequency,
        interval,
    };
    Ok(ExtractionResult {
        value: recurrence.to_rule(),
        matched_span: caps[0].to_string(),
    })
}

/// Map a recurrence unit word to a frequency.
///
/// Checked in a fixed order so no word can land in two buckets: "month"
/// before weekday abbreviations (otherwise "mon" would claim it), weekday
/// names before "day" (otherwise "sunday" would be daily).
pub fn normalize_frequency(unit: &str) -> Option<Frequency> {
    let word = unit.to_lowercase();
    if word.contains("month") {
        return Some(Frequency::Monthly);
    }
    if word.contains("year") || word.contains("annual") {
        return Some(Frequency::Yearly);
    }
    if word.contains("week") {
        return Some(Frequency::Weekly);
    }
    let singular = word.strip_suffix('s').unwrap_or(&word);
    if parse_weekday(&word).is_some() || parse_weekday(singular).is_some() {
        return Some(Frequency::Weekly);
    }
    if word.contains("day") || word.contains("daily") {
        return Some(Frequency::Daily);
    }
    None
}

/// Extract `d(...)`. The inner text is taken literally and may be empty.
pub fn extract_description(text: &str) -> Option<ExtractionResult> {
    extract_wrapped(&DESCRIPTION_RE, text)
}

/// Extract `l(...)`. The inner text is taken literally and may be empty.
pub fn extract_location(text: &str) -> Option<ExtractionResult> {
    extract_wrapped(&LOCATION_RE, text)
}

/// Extract `@nickname` at the start of the text or after whitespace. The
/// value is the nickname without `@`; the matched span is `@nickname`.
pub fn extract_calendar_nickname(text: &str) -> Option<ExtractionResult> {
    let caps = NICKNAME_RE.captures(text)?;
    Some(ExtractionResult {
        value: caps[2].to_string(),
        matched_span: caps[1].to_string(),
    })
}

fn extract_wrapped(pattern: &Regex, text: &str) -> Option<ExtractionResult> {
    let caps = pattern.captures(text)?;
    Some(ExtractionResult {
        value: caps[1].to_string(),
        matched_span: caps[0].to_string(),
    })
}
