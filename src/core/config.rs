//! Deserializable logger settings

use super::error::{LoggerError, Result};
use super::format::{DEFAULT_FORMAT, MESSAGE_TOKEN};
use super::log_level::LogLevel;
use super::logger::{Logger, LoggerBuilder};
use serde::{Deserialize, Serialize};

/// Logger settings that can be loaded from any serde format.
///
/// Output routing and custom placeholders are code-level concerns and are
/// configured on the built [`Logger`].
///
/// # Example
///
/// ```
/// use rust_template_logger::core::{LogLevel, LoggerConfig};
///
/// let config: LoggerConfig = serde_json::from_str(
///     r#"{ "level": "debug", "format": "[${level}] %s", "indent_lines": true }"#,
/// )
/// .unwrap();
///
/// let logger = config.build().unwrap();
/// assert_eq!(logger.level(), LogLevel::Debug);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: LogLevel,
    /// Template for the leading part of every record.
    pub format: String,
    pub prefix: String,
    pub indent_lines: bool,
    /// Fixed continuation-line shift; takes precedence over `indent_lines`.
    pub shift_indent: Option<usize>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: DEFAULT_FORMAT.to_string(),
            prefix: String::new(),
            indent_lines: false,
            shift_indent: None,
        }
    }
}

impl LoggerConfig {
    /// Reject settings that would silently drop message bodies.
    pub fn validate(&self) -> Result<()> {
        if !self.format.contains(MESSAGE_TOKEN) {
            return Err(LoggerError::config(
                "format",
                format!("template {:?} has no {} message token", self.format, MESSAGE_TOKEN),
            ));
        }
        Ok(())
    }

    /// A builder preloaded with these settings, for adding outputs.
    pub fn builder(&self) -> Result<LoggerBuilder> {
        self.validate()?;

        let builder = Logger::builder()
            .level(self.level)
            .template(self.format.clone())
            .prefix(self.prefix.clone());

        Ok(match self.shift_indent {
            Some(width) => builder.shift_indent(width),
            None => builder.indent_lines(self.indent_lines),
        })
    }

    /// Build a logger writing to standard error.
    pub fn build(&self) -> Result<Logger> {
        Ok(self.builder()?.build())
    }
}
