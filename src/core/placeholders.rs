//! Built-in placeholders: `level`, `line`, `file` and `time`

use super::cache;
use super::log_level::LogLevel;
use super::placeholder::{PlaceholderContext, Placeholders, SharedPlaceholder};
use super::timestamp::TimestampFormat;
use std::path::Path;
use std::sync::Arc;

/// Column width of a padded full level name (`WARNING`).
pub const LEVEL_WIDTH: usize = 7;

/// Column width of a padded short level name (`DEBUG`).
pub const SHORT_LEVEL_WIDTH: usize = 5;

/// Rendered by `line` and `file` when no call site was captured.
pub const UNKNOWN_LOCATION: &str = "??";

/// The default registry: `level`, `line`, `file` and `time`.
pub fn default_placeholders() -> Placeholders {
    let entries: [(&str, SharedPlaceholder); 4] = [
        ("level", Arc::new(placeholder_level)),
        ("line", Arc::new(placeholder_line)),
        ("file", Arc::new(placeholder_file)),
        ("time", Arc::new(placeholder_time)),
    ];

    entries
        .into_iter()
        .map(|(name, placeholder)| (name.to_string(), placeholder))
        .collect()
}

/// `${level:format:alignment:short}`
///
/// - `format`: `%s` is replaced by the level name, defaults to `%s`
/// - `alignment`: `left` or `right` pads the result with spaces so the level
///   name occupies a fixed column; empty means no padding
/// - `short`: `true`, `yes` or `1` selects the short name (`WARN`)
///
/// ```
/// use rust_template_logger::core::placeholders::placeholder_level;
/// use rust_template_logger::core::{LogLevel, PlaceholderContext};
///
/// let debug = PlaceholderContext::new(LogLevel::Debug);
/// assert_eq!(placeholder_level(&debug, "[%s]:left"), "[DEBUG]  ");
///
/// let warning = PlaceholderContext::new(LogLevel::Warning);
/// assert_eq!(placeholder_level(&warning, "%s:right:true"), " WARN");
/// ```
pub fn placeholder_level(context: &PlaceholderContext, argument: &str) -> String {
    let level = context.level();
    cache::memoize_output("level", level, argument, || render_level(level, argument))
}

fn render_level(level: LogLevel, argument: &str) -> String {
    let fields = cache::split_cached(argument);
    let field = |index: usize| fields.get(index).map(String::as_str).unwrap_or("");

    let format = match field(0) {
        "" => "%s",
        format => format,
    };
    let short = matches!(field(2), "true" | "yes" | "1");

    let (name, width) = if short {
        (level.to_str_short(), SHORT_LEVEL_WIDTH)
    } else {
        (level.to_str(), LEVEL_WIDTH)
    };

    let formatted = format.replacen("%s", name, 1);
    let padding = " ".repeat(width.saturating_sub(name.len()));

    match field(1) {
        "left" => formatted + &padding,
        "right" => padding + &formatted,
        _ => formatted,
    }
}

/// `${line}`: line of the logging call.
pub fn placeholder_line(context: &PlaceholderContext, _argument: &str) -> String {
    match context.location() {
        Some(location) => location.line().to_string(),
        None => UNKNOWN_LOCATION.to_string(),
    }
}

/// `${file}` / `${file:long}`: base name or full path of the calling file.
pub fn placeholder_file(context: &PlaceholderContext, argument: &str) -> String {
    let Some(location) = context.location() else {
        return UNKNOWN_LOCATION.to_string();
    };

    let path = location.file();
    if argument == "long" {
        return path.to_string();
    }

    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// `${time}`, `${time:timestamp}` or `${time:<strftime layout>}`.
pub fn placeholder_time(context: &PlaceholderContext, argument: &str) -> String {
    TimestampFormat::from_argument(argument).format(context.timestamp())
}
