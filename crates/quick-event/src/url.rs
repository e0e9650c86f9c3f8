//! EventSpec → calendar template URL.

use crate::event::EventSpec;

/// Calendar template endpoint used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://www.google.com/calendar/event";

/// Serializes an [`EventSpec`] into a calendar template URL:
///
/// ```text
/// <base>?action=TEMPLATE&text=…&dates=…[&recur=…]&details=…&location=…[&src=…]
/// ```
///
/// Every value is percent-encoded. Building is pure: the same event always
/// gives the same URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventUrlBuilder {
    base_url: String,
}

impl EventUrlBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build(&self, event: &EventSpec) -> String {
        let dates = event.dates();
        let mut params: Vec<(&str, &str)> = vec![
            ("action", "TEMPLATE"),
            ("text", event.title.as_str()),
            ("dates", dates.as_str()),
        ];
        if let Some(rule) = &event.recurrence_rule {
            params.push(("recur", rule.as_str()));
        }
        params.push(("details", event.description.as_str()));
        params.push(("location", event.location.as_str()));
        if let Some(calendar_id) = &event.calendar_id {
            params.push(("src", calendar_id.as_str()));
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.base_url)
    }
}

impl Default for EventUrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
