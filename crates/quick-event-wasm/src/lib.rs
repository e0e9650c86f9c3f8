//! WASM bindings for quick-event.
//!
//! Exposes batch URL creation and single-event parsing to JavaScript via
//! `wasm-bindgen`. Complex values cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p quick-event-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/quick_event_wasm.wasm
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use quick_event::{EventSpec, QuickEvent, Settings};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventDto {
    title: String,
    start: String,
    end: String,
    /// Calendar template form, e.g. "20261021T140000/20261021T150000".
    dates: String,
    is_all_day: bool,
    recurrence_rule: Option<String>,
    description: String,
    location: String,
    calendar_id: Option<String>,
}

impl From<&EventSpec> for EventDto {
    fn from(e: &EventSpec) -> Self {
        Self {
            title: e.title.clone(),
            start: e.start.to_rfc3339(),
            end: e.end.to_rfc3339(),
            dates: e.dates(),
            is_all_day: e.is_all_day,
            recurrence_rule: e.recurrence_rule.clone(),
            description: e.description.clone(),
            location: e.location.clone(),
            calendar_id: e.calendar_id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers (plain `String` errors so they run natively under `cargo test`)
// ---------------------------------------------------------------------------

fn build(
    lang: Option<String>,
    timezone: Option<String>,
    calendars_json: Option<&str>,
) -> Result<QuickEvent, String> {
    let mut settings = Settings::default();
    if let Some(lang) = lang {
        settings.language = lang;
    }
    if let Some(timezone) = timezone {
        settings.timezone = timezone;
    }
    if let Some(json) = calendars_json {
        settings.calendars = serde_json::from_str::<HashMap<String, String>>(json)
            .map_err(|e| format!("Invalid calendars JSON: {}", e))?;
    }
    QuickEvent::from_settings(settings).map_err(|e| e.to_string())
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>, String> {
    match now {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| format!("Invalid datetime '{}': {}", s, e)),
        None => Ok(Utc::now()),
    }
}

fn event_urls_json(
    text: &str,
    lang: Option<String>,
    timezone: Option<String>,
    calendars_json: Option<String>,
    now: Option<String>,
) -> Result<String, String> {
    let quick = build(lang, timezone, calendars_json.as_deref())?;
    let now = parse_now(now.as_deref())?;
    let urls = quick
        .create_event_urls(text, now)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&urls).map_err(|e| format!("Serialization error: {}", e))
}

fn event_json(
    text: &str,
    lang: Option<String>,
    timezone: Option<String>,
    now: Option<String>,
    calendars_json: Option<String>,
) -> Result<String, String> {
    let quick = build(lang, timezone, calendars_json.as_deref())?;
    let now = parse_now(now.as_deref())?;
    let event = quick
        .parser()
        .parse(text, now)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&EventDto::from(&event))
        .map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Turn event text (several events separated by `;`) into calendar URLs.
///
/// Returns a JSON string containing an array of URLs, primary event first.
///
/// # Arguments
/// - `text` -- Event text, e.g. "Gym tomorrow 2pm; Lunch Friday 1pm"
/// - `lang` -- Optional language code (default "en")
/// - `timezone` -- Optional IANA timezone (default "UTC")
/// - `calendars_json` -- Optional JSON object mapping nicknames to calendar ids
/// - `now` -- Optional reference instant as RFC 3339 (default: current time)
#[wasm_bindgen(js_name = "createEventUrls")]
pub fn create_event_urls(
    text: &str,
    lang: Option<String>,
    timezone: Option<String>,
    calendars_json: Option<String>,
    now: Option<String>,
) -> Result<String, JsValue> {
    event_urls_json(text, lang, timezone, calendars_json, now).map_err(|e| JsValue::from_str(&e))
}

/// Parse a single event.
///
/// Returns a JSON string with `title`, `start`, `end` (RFC 3339), `dates`,
/// `isAllDay`, `recurrenceRule`, `description`, `location` and `calendarId`.
///
/// # Arguments
/// - `text` -- Event text, e.g. "Lunch next Tuesday at 1 l(Cafe)"
/// - `lang` -- Optional language code (default "en")
/// - `timezone` -- Optional IANA timezone (default "UTC")
/// - `now` -- Optional reference instant as RFC 3339 (default: current time)
/// - `calendars_json` -- Optional JSON object mapping nicknames to calendar ids
#[wasm_bindgen(js_name = "parseEvent")]
pub fn parse_event(
    text: &str,
    lang: Option<String>,
    timezone: Option<String>,
    now: Option<String>,
    calendars_json: Option<String>,
) -> Result<String, JsValue> {
    event_json(text, lang, timezone, now, calendars_json).map_err(|e| JsValue::from_str(&e))
}
