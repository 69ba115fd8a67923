//! Core logger types and traits

pub mod appender;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod log_api;
pub mod log_level;
pub mod logger;
pub mod output;
pub mod placeholder;
pub mod placeholders;
pub mod timestamp;

pub use appender::{shared, Appender, SharedAppender, WriterAppender};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use format::{Format, Formatter, DEFAULT_FORMAT, MESSAGE_TOKEN, PREFIX_TOKEN};
pub use log_api::{Discarder, Log};
pub use log_level::LogLevel;
pub use logger::{Exiter, Indent, Logger, LoggerBuilder, FATAL_EXIT_CODE};
pub use output::{LevelWriter, Output};
pub use placeholder::{
    placeholder_fn, split_arguments, Placeholder, PlaceholderContext, Placeholders,
    SharedPlaceholder,
};
pub use placeholders::default_placeholders;
pub use timestamp::{TimestampFormat, DEFAULT_TIME_LAYOUT};
