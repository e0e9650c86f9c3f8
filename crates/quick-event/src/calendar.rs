//! Calendar nicknames: `@work` → a calendar identifier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{QuickEventError, Result};

/// Nickname → calendar identifier map supplied by the caller.
///
/// Nicknames are case-insensitive and may be registered with or without the
/// leading `@`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct CalendarDirectory {
    calendars: HashMap<String, String>,
}

impl CalendarDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, nickname: &str, calendar_id: &str) {
        self.calendars
            .insert(normalize_nickname(nickname), calendar_id.to_string());
    }

    /// Look up a nickname. Unknown nicknames are an error: an event must
    /// never silently fall back to the default calendar because of a typo.
    pub fn lookup(&self, nickname: &str) -> Result<&str> {
        let key = normalize_nickname(nickname);
        self.calendars
            .get(&key)
            .map(String::as_str)
            .ok_or(QuickEventError::UnknownCalendarNickname(key))
    }

    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for CalendarDirectory {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (nickname, calendar_id) in iter {
            directory.insert(nickname.as_ref(), calendar_id.as_ref());
        }
        directory
    }
}

impl From<HashMap<String, String>> for CalendarDirectory {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<CalendarDirectory> for HashMap<String, String> {
    fn from(directory: CalendarDirectory) -> Self {
        directory.calendars
    }
}

fn normalize_nickname(nickname: &str) -> String {
    nickname.trim().trim_start_matches('@').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_with_or_without_at() {
        let directory: CalendarDirectory = [("@work", "w@cal.com")].into_iter().collect();
        assert_eq!(directory.lookup("work").unwrap(), "w@cal.com");
        assert_eq!(directory.lookup("@work").unwrap(), "w@cal.com");
        assert_eq!(directory.lookup("WORK").unwrap(), "w@cal.com");
    }

    #[test]
    fn test_unknown_nickname_is_an_error() {
        let directory: CalendarDirectory = [("home", "h@cal.com")].into_iter().collect();
        let err = directory.lookup("@Wrok").unwrap_err();
        assert_eq!(err, QuickEventError::UnknownCalendarNickname("wrok".to_string()));
        assert!(err.to_string().contains("@wrok"), "got: {err}");
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let directory: CalendarDirectory =
            serde_json::from_str(r#"{"@work": "w@cal.com", "Family": "f@cal.com"}"#).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.lookup("family").unwrap(), "f@cal.com");
    }
}
