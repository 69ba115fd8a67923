//! Object-safe logging interface
//!
//! Code that only emits records can take `&dyn Log` and be handed either a
//! [`Logger`] or a [`Discarder`].

use super::log_level::LogLevel;
use super::logger::Logger;
use std::fmt;

/// The emitting half of a logger.
pub trait Log: Send + Sync {
    #[track_caller]
    fn log(&self, level: LogLevel, message: &dyn fmt::Display);

    #[track_caller]
    fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>);

    /// Log unconditionally, then terminate through the exit callback.
    #[track_caller]
    fn fatal(&self, message: &dyn fmt::Display);

    #[track_caller]
    fn fatal_fmt(&self, args: fmt::Arguments<'_>);

    #[track_caller]
    fn error(&self, message: &dyn fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    #[track_caller]
    fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Error, args);
    }

    #[track_caller]
    fn warning(&self, message: &dyn fmt::Display) {
        self.log(LogLevel::Warning, message);
    }

    #[track_caller]
    fn warning_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Warning, args);
    }

    #[track_caller]
    fn info(&self, message: &dyn fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    #[track_caller]
    fn print(&self, message: &dyn fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    fn print_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    #[track_caller]
    fn debug(&self, message: &dyn fmt::Display) {
        self.log(LogLevel::Debug, message);
    }

    #[track_caller]
    fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Debug, args);
    }

    #[track_caller]
    fn trace(&self, message: &dyn fmt::Display) {
        self.log(LogLevel::Trace, message);
    }

    #[track_caller]
    fn trace_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Trace, args);
    }
}

impl Log for Logger {
    #[track_caller]
    fn log(&self, level: LogLevel, message: &dyn fmt::Display) {
        Logger::log(self, level, message);
    }

    #[track_caller]
    fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        Logger::log_fmt(self, level, args);
    }

    #[track_caller]
    fn fatal(&self, message: &dyn fmt::Display) {
        Logger::fatal(self, message);
    }

    #[track_caller]
    fn fatal_fmt(&self, args: fmt::Arguments<'_>) {
        Logger::fatal_fmt(self, args);
    }
}

/// A [`Log`] that drops every record and never exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discarder;

impl Log for Discarder {
    fn log(&self, _level: LogLevel, _message: &dyn fmt::Display) {}

    fn log_fmt(&self, _level: LogLevel, _args: fmt::Arguments<'_>) {}

    fn fatal(&self, _message: &dyn fmt::Display) {}

    fn fatal_fmt(&self, _args: fmt::Arguments<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn emit_all(log: &dyn Log) {
        log.error(&"e");
        log.warning_fmt(format_args!("{}", "w"));
        log.info(&1);
        log.print(&"p");
        log.debug(&"d");
        log.trace_fmt(format_args!("t"));
    }

    #[test]
    fn test_logger_through_trait_object() {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .template("${level:%s:left:true} %s")
            .output(memory.clone())
            .build();

        emit_all(&logger);
        assert_eq!(
            memory.contents(),
            "ERROR e\nWARN  w\nINFO  1\nINFO  p\n"
        );
    }

    #[test]
    fn test_fatal_through_trait_object() {
        let exits = Arc::new(Mutex::new(0));
        let exits_clone = Arc::clone(&exits);
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .template("${level} %s")
            .output(memory.clone())
            .exiter(move |_| *exits_clone.lock() += 1)
            .build();

        let log: &dyn Log = &logger;
        log.fatal(&"gone");
        log.fatal_fmt(format_args!("gone {}", 2));

        assert_eq!(*exits.lock(), 2);
        assert_eq!(memory.contents(), "FATAL gone\nFATAL gone 2\n");
    }

    #[test]
    fn test_location_points_at_trait_caller() {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .template("${file}:${line} %s")
            .output(memory.clone())
            .build();

        let log: &dyn Log = &logger;
        let line = line!() + 1;
        log.info(&"x");
        assert_eq!(memory.contents(), format!("log_api.rs:{} x\n", line));
    }

    #[test]
    fn test_discarder() {
        let discarder = Discarder;
        emit_all(&discarder);
        discarder.fatal(&"not exiting");
        discarder.fatal_fmt(format_args!("still here"));
    }
}
