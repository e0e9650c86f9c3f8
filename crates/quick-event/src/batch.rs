//! Several events in one line of text: `"Gym 7am; Lunch with Sam 1pm"`.

use chrono::{DateTime, Utc};

use crate::config::Settings;
use crate::error::{QuickEventError, Result};
use crate::event::EventSpec;
use crate::parser::{EventTextParser, ParseOptions};
use crate::url::EventUrlBuilder;

/// Separates events in one input.
pub const EVENT_DELIMITER: char = ';';

/// Split input into trimmed, non-empty event texts, in input order.
pub fn split_events(text: &str) -> Vec<&str> {
    text.split(EVENT_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Raw input → calendar URLs, one per event.
///
/// Each `;`-separated segment is parsed on its own. A segment that fails is
/// logged and skipped; the batch fails only when no segment succeeds.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use quick_event::QuickEvent;
///
/// let now = Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap();
/// let urls = QuickEvent::default()
///     .create_event_urls("Gym tomorrow 2pm; Lunch Friday 1pm", now)
///     .unwrap();
/// assert_eq!(urls.len(), 2);
/// assert!(urls[0].contains("text=Gym"));
/// ```
#[derive(Debug, Default)]
pub struct QuickEvent {
    parser: EventTextParser,
    url_builder: EventUrlBuilder,
}

impl QuickEvent {
    pub fn new(options: ParseOptions, url_builder: EventUrlBuilder) -> Self {
        Self::with_parser(EventTextParser::new(options), url_builder)
    }

    pub fn with_parser(parser: EventTextParser, url_builder: EventUrlBuilder) -> Self {
        Self {
            parser,
            url_builder,
        }
    }

    pub fn from_settings(settings: Settings) -> Result<Self> {
        let (options, url_builder) = settings.into_parts()?;
        Ok(Self::new(options, url_builder))
    }

    pub fn parser(&self) -> &EventTextParser {
        &self.parser
    }

    pub fn url_builder(&self) -> &EventUrlBuilder {
        &self.url_builder
    }

    /// Parse every segment of `text`, keeping the ones that succeed.
    ///
    /// # Errors
    ///
    /// [`QuickEventError::NoEvents`] when the input has no segments or every
    /// segment failed.
    pub fn parse_all(&self, text: &str, now: DateTime<Utc>) -> Result<Vec<EventSpec>> {
        let segments = split_events(text);
        if segments.is_empty() {
            return Err(no_events("No valid events found", text));
        }

        let events: Vec<EventSpec> = segments
            .iter()
            .filter_map(|segment| match self.parser.parse(segment, now) {
                Ok(event) => Some(event),
                Err(err) => {
                    tracing::warn!(segment = %segment, error = %err, "skipping event");
                    None
                }
            })
            .collect();

        if events.is_empty() {
            return Err(no_events(
                "Could not generate any events from the provided text",
                text,
            ));
        }
        tracing::debug!(parsed = events.len(), segments = segments.len(), "parsed batch");
        Ok(events)
    }

    /// One URL per successfully parsed segment, in input order. The first
    /// URL is the primary event.
    pub fn create_event_urls(&self, text: &str, now: DateTime<Utc>) -> Result<Vec<String>> {
        let events = self.parse_all(text, now)?;
        Ok(events
            .iter()
            .map(|event| self.url_builder.build(event))
            .collect())
    }
}

fn no_events(reason: &str, text: &str) -> QuickEventError {
    let mut examples = vec![
        "\"Meeting tomorrow 2pm\"",
        "\"Lunch Friday 1pm to 2pm\"",
    ];
    if text.contains(EVENT_DELIMITER) {
        examples.push("\"Meeting 2pm; Lunch 5pm\" (multiple events)");
    }
    QuickEventError::NoEvents {
        reason: reason.to_string(),
        examples: examples.join(", "),
    }
}
