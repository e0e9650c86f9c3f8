//! Error types for quick-event operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuickEventError {
    #[error("Invalid input text: nothing left after trimming")]
    EmptyInput,

    #[error("Could not find time data in '{0}'")]
    NoTimeData(String),

    #[error("Unknown calendar nickname: '@{0}'")]
    UnknownCalendarNickname(String),

    #[error("Unrecognized recurrence unit: '{0}'")]
    UnrecognizedRecurrenceUnit(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("{reason}. Please try a different format, like: {examples}")]
    NoEvents { reason: String, examples: String },
}

pub type Result<T> = std::result::Result<T, QuickEventError>;
