//! Free text → [`EventSpec`] for a single event.
//!
//! Parsing one event runs a fixed pipeline:
//!
//! 1. Extract sub-fields in order, each cut out of the remaining text before
//!    the next extractor sees it: recurrence, description, location, and the
//!    `@nickname` calendar target when a directory is configured.
//! 2. Resolve date/time candidates and take the first. Text inside `d(...)`
//!    and `l(...)` is skipped unless nothing outside it names a time.
//! 3. Roll a past weekday forward a week when the text names a day
//!    (`"Call mom Monday 5pm"` said on a Tuesday means next Monday).
//! 4. Cut the date phrase out as well; what is left is the title.
//! 5. Default the end to one hour after the start.

use std::ops::Range;

use chrono::{DateTime, Days, Duration, Utc};
use chrono_tz::Tz;

use crate::calendar::CalendarDirectory;
use crate::error::{QuickEventError, Result};
use crate::event::EventSpec;
use crate::extract::{
    extract_calendar_nickname, extract_description, extract_location, extract_recurrence,
    ExtractionResult,
};
use crate::resolver::{ResolverRegistry, DEFAULT_LANGUAGE};
use crate::temporal::localize;

/// How far back a date may resolve and still be read as "the next one".
const ROLLBACK_WINDOW_DAYS: i64 = 7;

/// Options for [`EventTextParser`].
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Language code used to pick a resolver (`"en"`, `"en-GB"`, ...).
    pub language: String,
    /// Timezone in which wall-clock phrases are read and dates are emitted.
    pub timezone: Tz,
    /// Nickname directory; `@nickname` targeting is off when `None`.
    pub calendars: Option<CalendarDirectory>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            timezone: Tz::UTC,
            calendars: None,
        }
    }
}

/// Turns one event's text into one [`EventSpec`].
///
/// The parser holds no per-call state; one instance can serve any number of
/// threads.
#[derive(Debug, Default)]
pub struct EventTextParser {
    registry: ResolverRegistry,
    options: ParseOptions,
}

impl EventTextParser {
    pub fn new(options: ParseOptions) -> Self {
        Self::with_registry(ResolverRegistry::default(), options)
    }

    pub fn with_registry(registry: ResolverRegistry, options: ParseOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse one event relative to `now`.
    ///
    /// # Errors
    ///
    /// - [`QuickEventError::EmptyInput`] if the text is blank
    /// - [`QuickEventError::NoTimeData`] if no date/time phrase is found
    /// - [`QuickEventError::UnknownCalendarNickname`] if an `@nickname` is not
    ///   in the configured directory
    pub fn parse(&self, text: &str, now: DateTime<Utc>) -> Result<EventSpec> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QuickEventError::EmptyInput);
        }

        let now = now.with_timezone(&self.options.timezone);
        let mut remainder = Remainder::new(text);

        let recurrence_rule = match extract_recurrence(&remainder.text()) {
            Ok(found) => remainder.take(found),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring recurrence phrase");
                None
            }
        };
        let description = remainder
            .take_field(extract_description(&remainder.text()))
            .unwrap_or_default();
        let location = remainder
            .take_field(extract_location(&remainder.text()))
            .unwrap_or_default();

        // Times written inside d(...) or l(...) only count when nothing else does
        let resolver = self.registry.resolver_for(&self.options.language);
        let candidate = resolver
            .resolve(&remainder.mask_fields(), &now)
            .into_iter()
            .next()
            .or_else(|| resolver.resolve(text, &now).into_iter().next())
            .ok_or_else(|| QuickEventError::NoTimeData(text.to_string()))?;
        tracing::debug!(matched = %candidate.matched_span, "using date candidate");

        let calendar_id = match &self.options.calendars {
            Some(directory) => match remainder.take(extract_calendar_nickname(&remainder.text())) {
                Some(nickname) => Some(directory.lookup(&nickname)?.to_string()),
                None => None,
            },
            None => None,
        };

        let mut start = candidate.start.unwrap_or(now);
        let mut end = candidate.end;
        if should_roll_forward(text, &start, &now) {
            tracing::debug!(%start, "weekday already passed this week, moving a week ahead");
            start = add_week(start);
            end = end.map(add_week);
        }

        // Masking keeps byte offsets, so the span indexes `text` directly
        let span = candidate.span();
        if text.get(span.clone()).is_some() {
            remainder.remove(span);
        } else if let Some(at) = text.find(&candidate.matched_span) {
            remainder.remove(at..at + candidate.matched_span.len());
        }

        let end = end
            .filter(|end| *end > start)
            .unwrap_or_else(|| start + Duration::hours(1));

        Ok(EventSpec {
            title: remainder.title(),
            start,
            end,
            is_all_day: false,
            recurrence_rule,
            description,
            location,
            calendar_id,
        })
    }
}

/// A weekday reference that landed in the past week almost always means the
/// next occurrence. The start must fall on an earlier date than today but
/// after this moment one week ago, and the text must mention a day at all.
fn should_roll_forward(text: &str, start: &DateTime<Tz>, now: &DateTime<Tz>) -> bool {
    start.date_naive() < now.date_naive()
        && *start > *now - Duration::days(ROLLBACK_WINDOW_DAYS)
        && text.to_lowercase().contains("day")
}

/// Seven days later at the same wall-clock time where that time exists.
fn add_week(at: DateTime<Tz>) -> DateTime<Tz> {
    at.naive_local()
        .checked_add_days(Days::new(7))
        .and_then(|naive| localize(&at.timezone(), naive))
        .unwrap_or_else(|| at + Duration::days(7))
}

/// The event text with extracted spans cut out.
///
/// Cuts are recorded as byte ranges of the original text, so a phrase that
/// overlaps an earlier cut (`"every Monday"` and `"Monday 9am"`) only removes
/// what is still there.
struct Remainder<'a> {
    original: &'a str,
    /// Sorted, non-overlapping cuts.
    removed: Vec<Range<usize>>,
    /// Cuts made for `d(...)` and `l(...)`.
    fields: Vec<Range<usize>>,
}

impl<'a> Remainder<'a> {
    fn new(original: &'a str) -> Self {
        Self {
            original,
            removed: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Kept pieces of the original text, in order.
    fn pieces(&self) -> Vec<Range<usize>> {
        let mut pieces = Vec::new();
        let mut cursor = 0;
        for cut in &self.removed {
            if cut.start > cursor {
                pieces.push(cursor..cut.start);
            }
            cursor = cursor.max(cut.end);
        }
        if cursor < self.original.len() {
            pieces.push(cursor..self.original.len());
        }
        pieces
    }

    /// The kept pieces joined by single spaces, with each piece's offset in
    /// the joined string.
    fn render(&self) -> (String, Vec<(usize, Range<usize>)>) {
        let mut text = String::new();
        let mut layout = Vec::new();
        for piece in self.pieces() {
            if !text.is_empty() {
                text.push(' ');
            }
            layout.push((text.len(), piece.clone()));
            text.push_str(&self.original[piece]);
        }
        (text, layout)
    }

    fn text(&self) -> String {
        self.render().0
    }

    /// Cut out a range of the original text.
    fn remove(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.removed.push(range);
        self.removed.sort_by_key(|r| r.start);
        let mut merged: Vec<Range<usize>> = Vec::with_capacity(self.removed.len());
        for r in self.removed.drain(..) {
            match merged.last_mut() {
                Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
                _ => merged.push(r),
            }
        }
        self.removed = merged;
    }

    /// Cut out the first occurrence of `literal` in the current text.
    fn remove_literal(&mut self, literal: &str) -> Vec<Range<usize>> {
        let (text, layout) = self.render();
        let Some(at) = text.find(literal) else {
            return Vec::new();
        };
        let (lo, hi) = (at, at + literal.len());
        let cuts: Vec<Range<usize>> = layout
            .iter()
            .filter_map(|(offset, piece)| {
                let from = lo.max(*offset);
                let to = hi.min(offset + piece.len());
                (from < to).then(|| piece.start + (from - offset)..piece.start + (to - offset))
            })
            .collect();
        for cut in &cuts {
            self.remove(cut.clone());
        }
        cuts
    }

    /// Cut out an extraction's matched span and hand back its value.
    fn take(&mut self, extraction: Option<ExtractionResult>) -> Option<String> {
        let extraction = extraction?;
        self.remove_literal(&extraction.matched_span);
        Some(extraction.value)
    }

    /// Like [`Remainder::take`], and remember where the field was.
    fn take_field(&mut self, extraction: Option<ExtractionResult>) -> Option<String> {
        let extraction = extraction?;
        let cuts = self.remove_literal(&extraction.matched_span);
        self.fields.extend(cuts);
        Some(extraction.value)
    }

    /// The original text with field cuts blanked out. Byte offsets match
    /// the original.
    fn mask_fields(&self) -> String {
        let mut masked = self.original.as_bytes().to_vec();
        for field in &self.fields {
            masked[field.clone()].fill(b' ');
        }
        String::from_utf8(masked).unwrap_or_else(|_| self.original.to_string())
    }

    /// What is left, with whitespace collapsed.
    fn title(&self) -> String {
        self.text().split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
