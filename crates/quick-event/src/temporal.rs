//! Deterministic English date/time phrase recognition.
//!
//! [`EnglishResolver`] scans free text ("Lunch next Tuesday at 1 l(Cafe)")
//! for date/time phrases and pins each one to the timeline relative to a
//! caller-supplied reference instant. It never reads the system clock, so
//! every result is reproducible from `(text, reference)` alone.
//!
//! # Scanning
//!
//! The text is split into word tokens. Starting at each token, the scanner
//! tries to read one expression (a date phrase, a time phrase, or both in
//! either order). A successful read becomes a [`DateCandidate`] whose
//! `matched_span` is the literal slice of the input from the first to the
//! last consumed token; scanning then resumes after it. Candidates therefore
//! come back in reading order and never overlap.
//!
//! # Supported phrases
//!
//! **Day words**: `"today"`, `"tonight"` (20:00), `"tomorrow"`, `"yesterday"`
//!
//! **Weekdays**: `"Friday"`, `"on Friday"`, `"next Tuesday"`, `"this Friday"`,
//! `"last Wednesday"`. A bare weekday is that day of the current
//! Monday-start week and may lie in the past.
//!
//! **Periods**: `"next week"`, `"last month"`, `"next year"` (start of the
//! period), `"this week"` (today)
//!
//! **Parts of day**: `"tomorrow morning"`, `"Friday evening"`, `"this afternoon"`
//!
//! **Offsets**: `"in 2 hours"`, `"in a week"`, `"3 days from now"`
//!
//! **Calendar dates**: `"2026-11-05"`, `"12/24"`, `"12/24/2026"`,
//! `"Nov 3rd"`, `"3 November 2027"`. Without a year, a date that already
//! passed this year means next year.
//!
//! **Times**: `"2pm"`, `"2 pm"`, `"2:30pm"`, `"14:00"`, `"noon"`,
//! `"midnight"`, `"at 1"`. Bare hours need `at`/`from` or a range partner.
//! Hours 1-7 without a meridiem read as afternoon unless zero-padded.
//!
//! **Ranges**: `"1pm to 2pm"`, `"9am-10am"`, `"from 9 to 5"`, `"11 to 1pm"`.
//! An end at or before the start rolls over to the next day.
//!
//! Phrases naming a day but no time get the implied time 12:00.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::{
    DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Weekday,
};
use chrono_tz::Tz;
use regex::Regex;

use crate::resolver::{DateCandidate, DateTimeResolver};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{1,2}-\d{1,2}|[\p{L}\p{N}:/]+|[-–]").expect("valid token regex")
});
static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})(?::(\d{2}))?(am|pm)?$").expect("valid clock regex"));
static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid iso date regex"));
static SLASH_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?$").expect("valid slash date regex")
});
static DAY_OF_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})(?:st|nd|rd|th)?$").expect("valid day regex"));

/// The built-in resolver for English text.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishResolver;

impl DateTimeResolver for EnglishResolver {
    fn resolve(&self, text: &str, reference: &DateTime<Tz>) -> Vec<DateCandidate> {
        let tokens = tokenize(text);
        let mut candidates = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            match parse_expression(&tokens[i..], reference) {
                Some((expression, used)) => {
                    let span = tokens[i].span.start..tokens[i + used - 1].span.end;
                    candidates.push(expression.into_candidate(text, span, reference));
                    i += used;
                }
                None => i += 1,
            }
        }
        candidates
    }
}

/// Pin a local wall-clock time to the timeline. Ambiguous times (DST fall
/// back) take the earlier instant; nonexistent times (DST gap) give `None`.
pub(crate) fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest()
}

// ── Tokens ──────────────────────────────────────────────────────────────────

struct Token {
    /// Lowercased token text.
    word: String,
    /// Byte range in the scanned text.
    span: Range<usize>,
}

fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| Token {
            word: m.as_str().to_lowercase(),
            span: m.range(),
        })
        .collect()
}

// ── Expressions ─────────────────────────────────────────────────────────────

/// A recognized phrase before it is pinned to the timeline.
#[derive(Debug, Default)]
struct Expression {
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
}

impl Expression {
    fn into_candidate(
        self,
        text: &str,
        span: Range<usize>,
        reference: &DateTime<Tz>,
    ) -> DateCandidate {
        let tz = reference.timezone();
        let date = self.date.unwrap_or_else(|| reference.date_naive());
        let start_naive = date.and_time(self.time.unwrap_or_else(implied_time));

        let end = self.end_time.and_then(|end_time| {
            let mut end_naive = date.and_time(end_time);
            if end_naive <= start_naive {
                end_naive = end_naive.checked_add_days(Days::new(1))?;
            }
            localize(&tz, end_naive)
        });

        DateCandidate {
            start: localize(&tz, start_naive),
            end,
            matched_span: text[span.clone()].to_string(),
            offset: span.start,
        }
    }
}

fn implied_time() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}

/// Read one expression at the head of `tokens`: a date optionally followed
/// by a time, or a time optionally followed by a date.
fn parse_expression(tokens: &[Token], reference: &DateTime<Tz>) -> Option<(Expression, usize)> {
    if let Some((date, mut used)) = date_phrase(tokens, reference) {
        let mut expression = Expression {
            date: Some(date.date),
            time: date.time,
            end_time: None,
        };
        if let Some((time, n)) = time_phrase(&tokens[used..]) {
            expression.time = Some(time.start);
            expression.end_time = time.end;
            used += n;
        }
        return Some((expression, used));
    }

    let (time, mut used) = time_phrase(tokens)?;
    let mut expression = Expression {
        date: None,
        time: Some(time.start),
        end_time: time.end,
    };
    if let Some((date, n)) = date_phrase(&tokens[used..], reference) {
        expression.date = Some(date.date);
        used += n;
    }
    Some((expression, used))
}

// ── Date phrases ────────────────────────────────────────────────────────────

struct DatePhrase {
    date: NaiveDate,
    /// Time implied by the phrase itself ("tonight", "in 2 hours").
    time: Option<NaiveTime>,
}

impl DatePhrase {
    fn day(date: NaiveDate) -> Self {
        Self { date, time: None }
    }
}

fn date_phrase(tokens: &[Token], reference: &DateTime<Tz>) -> Option<(DatePhrase, usize)> {
    let lead = usize::from(tokens.first()?.word == "on");
    let rest = &tokens[lead..];
    let today = reference.date_naive();

    let (mut phrase, mut used) = try_day_word(rest, today)
        .or_else(|| try_relative_weekday(rest, today))
        .or_else(|| try_relative_period(rest, today))
        .or_else(|| try_bare_weekday(rest, today))
        .or_else(|| try_calendar_date(rest, today))
        .or_else(|| try_offset(rest, reference))?;

    if phrase.time.is_none() {
        if let Some(time) = rest.get(used).and_then(|t| part_of_day(&t.word)) {
            phrase.time = Some(time);
            used += 1;
        }
    }
    Some((phrase, lead + used))
}

/// "today", "tonight", "tomorrow", "yesterday", "this morning".
fn try_day_word(tokens: &[Token], today: NaiveDate) -> Option<(DatePhrase, usize)> {
    let date = match tokens.first()?.word.as_str() {
        "today" => today,
        "tonight" => {
            let phrase = DatePhrase {
                date: today,
                time: NaiveTime::from_hms_opt(20, 0, 0),
            };
            return Some((phrase, 1));
        }
        "tomorrow" | "tmrw" | "tmr" => today.succ_opt()?,
        "yesterday" => today.pred_opt()?,
        "this" => {
            let time = part_of_day(&tokens.get(1)?.word)?;
            let phrase = DatePhrase {
                date: today,
                time: Some(time),
            };
            return Some((phrase, 2));
        }
        _ => return None,
    };
    Some((DatePhrase::day(date), 1))
}

/// "next Monday", "this Friday", "last Wednesday".
fn try_relative_weekday(tokens: &[Token], today: NaiveDate) -> Option<(DatePhrase, usize)> {
    let modifier = tokens.first()?.word.as_str();
    let weekday = parse_weekday(&tokens.get(1)?.word)?;
    let current = today.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;

    let date = match modifier {
        "next" => {
            // Always future: the same weekday as today means a week ahead
            let ahead = (target - current + 7) % 7;
            today + Duration::days(if ahead == 0 { 7 } else { ahead })
        }
        "this" => today + Duration::days(target - current),
        "last" => {
            let back = (current - target + 7) % 7;
            today - Duration::days(if back == 0 { 7 } else { back })
        }
        _ => return None,
    };
    Some((DatePhrase::day(date), 2))
}

/// "next week", "last month", "next year", "this week".
fn try_relative_period(tokens: &[Token], today: NaiveDate) -> Option<(DatePhrase, usize)> {
    let modifier = tokens.first()?.word.as_str();
    let unit = tokens.get(1)?.word.as_str();
    let since_monday = today.weekday().num_days_from_monday() as i64;
    let first_of_month = today.with_day(1)?;

    let date = match (modifier, unit) {
        ("this", "week" | "month" | "year") => today,
        ("next", "week") => today + Duration::days(7 - since_monday),
        ("last", "week") => today - Duration::days(since_monday + 7),
        ("next", "month") => first_of_month.checked_add_months(Months::new(1))?,
        ("last", "month") => first_of_month.checked_sub_months(Months::new(1))?,
        ("next", "year") => NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?,
        ("last", "year") => NaiveDate::from_ymd_opt(today.year() - 1, 1, 1)?,
        _ => return None,
    };
    Some((DatePhrase::day(date), 2))
}

/// "Friday" (this week), or "Friday Oct 23" where the explicit date wins.
fn try_bare_weekday(tokens: &[Token], today: NaiveDate) -> Option<(DatePhrase, usize)> {
    let weekday = parse_weekday(&tokens.first()?.word)?;
    if let Some((explicit, n)) = try_calendar_date(&tokens[1..], today) {
        return Some((explicit, 1 + n));
    }
    let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let date = monday + Duration::days(weekday.num_days_from_monday() as i64);
    Some((DatePhrase::day(date), 1))
}

/// "2026-11-05", "12/24[/2026]", "Nov 3rd [2027]", "3 November [2027]".
fn try_calendar_date(tokens: &[Token], today: NaiveDate) -> Option<(DatePhrase, usize)> {
    let first = tokens.first()?.word.as_str();

    if let Some(caps) = ISO_DATE_RE.captures(first) {
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )?;
        return Some((DatePhrase::day(date), 1));
    }

    if let Some(caps) = SLASH_DATE_RE.captures(first) {
        let year = match caps.get(3) {
            Some(y) if y.as_str().len() == 2 => Some(2000 + y.as_str().parse::<i32>().ok()?),
            Some(y) => Some(y.as_str().parse().ok()?),
            None => None,
        };
        let date = month_day(
            today,
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            year,
        )?;
        return Some((DatePhrase::day(date), 1));
    }

    let (month, day) = if let Some(month) = parse_month(first) {
        (month, parse_day_of_month(&tokens.get(1)?.word)?)
    } else {
        let day = parse_day_of_month(first)?;
        (parse_month(&tokens.get(1)?.word)?, day)
    };
    let year = tokens.get(2).and_then(|t| parse_year(&t.word));
    let date = month_day(today, month, day, year)?;
    Some((DatePhrase::day(date), 2 + usize::from(year.is_some())))
}

/// "in 2 hours", "in a week", "3 days from now".
fn try_offset(tokens: &[Token], reference: &DateTime<Tz>) -> Option<(DatePhrase, usize)> {
    if tokens.first()?.word == "in" {
        let (n, unit) = amount_and_unit(&tokens[1..])?;
        return Some((shift(reference, n, unit)?, 3));
    }
    let (n, unit) = amount_and_unit(tokens)?;
    if tokens.get(2)?.word == "from" && tokens.get(3)?.word == "now" {
        return Some((shift(reference, n, unit)?, 4));
    }
    None
}

fn shift(reference: &DateTime<Tz>, n: u32, unit: TimeUnit) -> Option<DatePhrase> {
    let shifted = match unit {
        TimeUnit::Minutes => reference.checked_add_signed(Duration::minutes(i64::from(n)))?,
        TimeUnit::Hours => reference.checked_add_signed(Duration::hours(i64::from(n)))?,
        TimeUnit::Days => reference.checked_add_days(Days::new(u64::from(n)))?,
        TimeUnit::Weeks => reference.checked_add_days(Days::new(u64::from(n) * 7))?,
        TimeUnit::Months => reference.checked_add_months(Months::new(n))?,
        TimeUnit::Years => reference.checked_add_months(Months::new(n.checked_mul(12)?))?,
    };
    Some(DatePhrase {
        date: shifted.date_naive(),
        time: Some(shifted.time()),
    })
}

/// Resolve a month/day pair, rolling a year-less date that already passed
/// into next year.
fn month_day(today: NaiveDate, month: u32, day: u32, year: Option<i32>) -> Option<NaiveDate> {
    if let Some(year) = year {
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if this_year < today {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    } else {
        Some(this_year)
    }
}

// ── Time phrases ────────────────────────────────────────────────────────────

struct TimePhrase {
    start: NaiveTime,
    end: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

/// A wall-clock reading before meridiem resolution.
#[derive(Debug, Clone, Copy)]
struct Clock {
    hour: u32,
    minute: u32,
    meridiem: Option<Meridiem>,
    /// No minutes and no meridiem: "5" alone.
    bare: bool,
    /// Hour is taken as written (24-hour, zero-padded, noon, midnight).
    literal: bool,
}

impl Clock {
    fn named(hour: u32) -> Self {
        Self {
            hour,
            minute: 0,
            meridiem: None,
            bare: false,
            literal: true,
        }
    }

    fn to_time(self, inherited: Option<Meridiem>) -> Option<NaiveTime> {
        let hour = match self.meridiem.or(inherited) {
            Some(Meridiem::Am) => self.hour % 12,
            Some(Meridiem::Pm) => self.hour % 12 + 12,
            None if !self.literal && (1..=7).contains(&self.hour) => self.hour + 12,
            None => self.hour,
        };
        NaiveTime::from_hms_opt(hour, self.minute, 0)
    }
}

fn time_phrase(tokens: &[Token]) -> Option<(TimePhrase, usize)> {
    let anchored = matches!(tokens.first()?.word.as_str(), "at" | "from");
    let lead = usize::from(anchored);
    let (start, n) = clock(&tokens[lead..])?;
    let mut used = lead + n;

    let mut range_end = None;
    if tokens
        .get(used)
        .is_some_and(|t| is_range_connector(&t.word))
    {
        if let Some((end, n)) = clock(&tokens[used + 1..]) {
            if !end.bare || anchored || !start.bare {
                range_end = Some(end);
                used += 1 + n;
            }
        }
    }
    if start.bare && !anchored && range_end.is_none() {
        return None;
    }

    let phrase = match range_end {
        None => TimePhrase {
            start: start.to_time(None)?,
            end: None,
        },
        Some(end) => {
            let end_time = end.to_time(None)?;
            let start_time = match (start.meridiem, end.meridiem) {
                (None, Some(meridiem)) if !start.literal => {
                    // "11 to 1pm" is 11am, "1 to 2pm" is 1pm, "12 to 12pm" starts
                    // at midnight
                    let inherited = start.to_time(Some(meridiem))?;
                    if inherited < end_time {
                        inherited
                    } else {
                        start.to_time(Some(Meridiem::Am))?
                    }
                }
                _ => start.to_time(None)?,
            };
            TimePhrase {
                start: start_time,
                end: Some(end_time),
            }
        }
    };
    Some((phrase, used))
}

/// Read a clock time: "2pm", "2 pm", "2:30pm", "14:00", "noon", "5".
fn clock(tokens: &[Token]) -> Option<(Clock, usize)> {
    let word = tokens.first()?.word.as_str();
    match word {
        "noon" | "midday" => return Some((Clock::named(12), 1)),
        "midnight" => return Some((Clock::named(0), 1)),
        _ => {}
    }

    let caps = CLOCK_RE.captures(word)?;
    let hour_text = caps.get(1)?.as_str();
    let hour: u32 = hour_text.parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    let mut used = 1;
    let mut meridiem = caps.get(3).and_then(|m| parse_meridiem(m.as_str()));
    if meridiem.is_none() {
        if let Some(m) = tokens.get(1).and_then(|t| parse_meridiem(&t.word)) {
            meridiem = Some(m);
            used = 2;
        }
    }

    if minute > 59 {
        return None;
    }
    match meridiem {
        Some(_) if !(1..=12).contains(&hour) => return None,
        None if hour > 23 => return None,
        _ => {}
    }

    let clock = Clock {
        hour,
        minute,
        meridiem,
        bare: meridiem.is_none() && caps.get(2).is_none(),
        literal: hour_text.starts_with('0') || hour > 12,
    };
    Some((clock, used))
}

fn is_range_connector(word: &str) -> bool {
    matches!(
        word,
        "to" | "-" | "–" | "until" | "till" | "til" | "through" | "thru"
    )
}

// ── Parsing helpers ─────────────────────────────────────────────────────────

/// Parse a weekday name (lowercased, full or abbreviated).
pub(crate) fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parse a month name to number (1-12).
fn parse_month(s: &str) -> Option<u32> {
    match s {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

/// "3", "3rd", "21st" → day of month.
fn parse_day_of_month(s: &str) -> Option<u32> {
    let caps = DAY_OF_MONTH_RE.captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_meridiem(s: &str) -> Option<Meridiem> {
    match s {
        "am" => Some(Meridiem::Am),
        "pm" => Some(Meridiem::Pm),
        _ => None,
    }
}

/// Map a part of day to its conventional time.
fn part_of_day(s: &str) -> Option<NaiveTime> {
    match s {
        "morning" => NaiveTime::from_hms_opt(9, 0, 0),
        "noon" => NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => NaiveTime::from_hms_opt(13, 0, 0),
        "evening" => NaiveTime::from_hms_opt(18, 0, 0),
        "night" => NaiveTime::from_hms_opt(21, 0, 0),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

fn normalize_time_unit(s: &str) -> Option<TimeUnit> {
    match s {
        "minute" | "minutes" | "min" | "mins" => Some(TimeUnit::Minutes),
        "hour" | "hours" | "hr" | "hrs" => Some(TimeUnit::Hours),
        "day" | "days" => Some(TimeUnit::Days),
        "week" | "weeks" | "wk" | "wks" => Some(TimeUnit::Weeks),
        "month" | "months" => Some(TimeUnit::Months),
        "year" | "years" => Some(TimeUnit::Years),
        _ => None,
    }
}

/// "2 hours", "a week", "an hour".
fn amount_and_unit(tokens: &[Token]) -> Option<(u32, TimeUnit)> {
    let n = match tokens.first()?.word.as_str() {
        "a" | "an" => 1,
        other => other.parse().ok()?,
    };
    let unit = normalize_time_unit(&tokens.get(1)?.word)?;
    Some((n, unit))
}

// ── Tests ───────────────────────────────────────────────────────────────────
