//! Placeholder contract
//!
//! A placeholder turns the record context and the argument written in the
//! template (`${name:argument}`) into replacement text.

use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Everything a placeholder may read about the record being rendered.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderContext {
    level: LogLevel,
    location: Option<&'static Location<'static>>,
    timestamp: DateTime<Local>,
}

impl PlaceholderContext {
    /// Context for `level` stamped with the current time and no call site.
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            location: None,
            timestamp: Local::now(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Call site captured at the public logging entry point, if any.
    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }
}

/// A named template function.
///
/// Any `Fn(&PlaceholderContext, &str) -> String` closure is a placeholder.
pub trait Placeholder: Send + Sync {
    fn render(&self, context: &PlaceholderContext, argument: &str) -> String;
}

impl<F> Placeholder for F
where
    F: Fn(&PlaceholderContext, &str) -> String + Send + Sync,
{
    fn render(&self, context: &PlaceholderContext, argument: &str) -> String {
        self(context, argument)
    }
}

pub type SharedPlaceholder = Arc<dyn Placeholder>;

/// Placeholder registry: name to function.
pub type Placeholders = HashMap<String, SharedPlaceholder>;

/// Box a closure as a [`SharedPlaceholder`].
///
/// ```
/// use rust_template_logger::core::placeholder::placeholder_fn;
///
/// let custom = placeholder_fn(|_, argument| format!("<{}>", argument));
/// # let _ = custom;
/// ```
pub fn placeholder_fn<F>(f: F) -> SharedPlaceholder
where
    F: Fn(&PlaceholderContext, &str) -> String + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Split a placeholder argument on unescaped `:`.
///
/// `\:` yields a literal colon; any other backslash is kept as written.
/// An empty argument yields no fields.
pub fn split_arguments(argument: &str) -> Vec<String> {
    if argument.is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = argument.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&':') => {
                current.push(':');
                chars.next();
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// Debug helper listing registered names in sorted order.
pub(crate) struct PlaceholderNames<'a>(pub &'a Placeholders);

impl fmt::Debug for PlaceholderNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.0.keys().collect();
        names.sort();
        f.debug_list().entries(names).finish()
    }
}
