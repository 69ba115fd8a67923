//! # Rust Template Logger
//!
//! A leveled logger whose record layout is a text template with named
//! placeholders, for example `${time} ${level:[%s]:right} ${prefix}%s`.
//!
//! ## Features
//!
//! - **Templates**: `${name}` / `${name:argument}` tokens resolved by
//!   registered placeholders, compiled once and reused
//! - **Custom Placeholders**: any `Fn(&PlaceholderContext, &str) -> String`
//! - **Level Routing**: each level can be written to its own set of appenders
//! - **Child Loggers**: prefixed children sharing the parent's output and level
//! - **Thread Safe**: records are rendered and written atomically per logger
//!
//! ## Example
//!
//! ```
//! use rust_template_logger::appenders::MemoryAppender;
//! use rust_template_logger::prelude::*;
//! use rust_template_logger::info;
//!
//! let memory = MemoryAppender::new();
//! let logger = Logger::builder()
//!     .template("${level:[%s]:right:true} ${prefix}%s")
//!     .output(memory.clone())
//!     .build();
//!
//! let db = logger.new_child_with_prefix("db:");
//! info!(logger, "listening on {}", 8080);
//! db.warning("slow query");
//!
//! assert_eq!(memory.contents(), " [INFO] listening on 8080\n [WARN] db: slow query\n");
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
    pub use crate::core::{
        placeholder_fn, shared, Appender, Discarder, Format, Formatter, LevelWriter, Log,
        LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError, Output, PlaceholderContext,
        Placeholders, Result,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender};
pub use core::{
    placeholder_fn, shared, Appender, Discarder, Format, Formatter, LevelWriter, Log, LogLevel,
    Logger, LoggerBuilder, LoggerConfig, LoggerError, Output, PlaceholderContext, Placeholders,
    Result,
};
