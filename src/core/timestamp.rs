//! Timestamp layouts for the `${time}` placeholder
//!
//! The placeholder argument selects the layout:
//! - empty: `2025-01-08 10:30:45`
//! - `timestamp`: Unix seconds
//! - anything else: a strftime layout

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Layout used when `${time}` has no argument.
pub const DEFAULT_TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp layout selected by a `${time:...}` argument.
///
/// # Examples
///
/// ```
/// use rust_template_logger::core::TimestampFormat;
///
/// assert_eq!(TimestampFormat::from_argument(""), TimestampFormat::DateTime);
/// assert_eq!(TimestampFormat::from_argument("timestamp"), TimestampFormat::Unix);
/// assert_eq!(
///     TimestampFormat::from_argument("%H:%M"),
///     TimestampFormat::Custom("%H:%M".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `YYYY-MM-DD HH:MM:SS`
    #[default]
    DateTime,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Custom strftime layout
    Custom(String),
}

impl TimestampFormat {
    pub fn from_argument(argument: &str) -> Self {
        match argument {
            "" => TimestampFormat::DateTime,
            "timestamp" => TimestampFormat::Unix,
            layout => TimestampFormat::Custom(layout.to_string()),
        }
    }

    /// Format `datetime` with this layout.
    ///
    /// A custom layout chrono cannot interpret is returned verbatim.
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self {
            TimestampFormat::DateTime => datetime.format(DEFAULT_TIME_LAYOUT).to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::Custom(layout) => {
                let mut out = String::new();
                if write!(out, "{}", datetime.format(layout)).is_err() {
                    return layout.clone();
                }
                out
            }
        }
    }
}
