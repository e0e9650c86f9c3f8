//! User settings loaded from JSON.
//!
//! ```json
//! {
//!   "language": "en",
//!   "timezone": "America/New_York",
//!   "base_url": "https://www.google.com/calendar/event",
//!   "calendars": { "@work": "team@group.calendar.google.com" }
//! }
//! ```
//!
//! Every key is optional. An absent or empty `calendars` map turns
//! `@nickname` targeting off.

use std::collections::HashMap;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarDirectory;
use crate::error::{QuickEventError, Result};
use crate::parser::ParseOptions;
use crate::resolver::DEFAULT_LANGUAGE;
use crate::url::{EventUrlBuilder, DEFAULT_BASE_URL};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: String,
    /// IANA timezone name.
    pub timezone: String,
    pub base_url: String,
    pub calendars: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            timezone: "UTC".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            calendars: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| QuickEventError::InvalidSettings(e.to_string()))
    }

    /// Validate and split into parser options and a URL builder.
    pub fn into_parts(self) -> Result<(ParseOptions, EventUrlBuilder)> {
        if self.base_url.trim().is_empty() {
            return Err(QuickEventError::InvalidSettings(
                "base_url must not be empty".to_string(),
            ));
        }
        let timezone = parse_timezone(&self.timezone)?;
        let calendars =
            (!self.calendars.is_empty()).then(|| CalendarDirectory::from(self.calendars));
        let options = ParseOptions {
            language: self.language,
            timezone,
            calendars,
        };
        Ok((options, EventUrlBuilder::new(self.base_url)))
    }
}

/// Parse an IANA timezone name such as `"America/New_York"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| QuickEventError::InvalidTimezone(name.to_string()))
}
