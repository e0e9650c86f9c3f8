//! # quick-event
//!
//! Natural-language quick-add for calendars.
//!
//! Turns free text such as `"Lunch next Tuesday at 1 d(discuss budget) l(Cafe)"`
//! into a structured event and a prefilled calendar template URL. Input may
//! carry several events separated by `;`, a recurrence (`every 2 weeks`), a
//! description `d(...)`, a location `l(...)` and a target calendar
//! (`@work`). Parsing is deterministic: "now" is always passed in.
//!
//! ## Modules
//!
//! - [`batch`] - `;`-separated input → ordered list of URLs
//! - [`parser`] - one event's text → [`EventSpec`]
//! - [`resolver`] - date/time resolver trait and per-language registry
//! - [`temporal`] - built-in English date/time phrase recognition
//! - [`extract`] - recurrence, description, location and nickname extractors
//! - [`calendar`] - `@nickname` → calendar identifier directory
//! - [`event`] - the [`EventSpec`] model and date formatting
//! - [`url`] - [`EventSpec`] → calendar template URL
//! - [`config`] - JSON settings
//! - [`error`] - Error types

pub mod batch;
pub mod calendar;
pub mod config;
pub mod error;
pub mod event;
pub mod extract;
pub mod parser;
pub mod resolver;
pub mod temporal;
pub mod url;

pub use batch::{split_events, QuickEvent, EVENT_DELIMITER};
pub use calendar::CalendarDirectory;
pub use config::{parse_timezone, Settings};
pub use error::QuickEventError;
pub use event::{date_range, EventSpec};
pub use extract::{
    extract_calendar_nickname, extract_description, extract_location, extract_recurrence,
    normalize_frequency, ExtractionResult, Recurrence,
};
pub use parser::{EventTextParser, ParseOptions};
pub use resolver::{DateCandidate, DateTimeResolver, ResolverRegistry, DEFAULT_LANGUAGE};
pub use temporal::EnglishResolver;
pub use url::{EventUrlBuilder, DEFAULT_BASE_URL};
