//! Main logger implementation
//!
//! A [`Logger`] is a cheap, cloneable handle. Clones share one instance;
//! [`Logger::new_child`] creates a separate instance that shares the
//! parent's output and follows the parent's level until it sets its own.

use super::{
    appender::{shared, Appender, SharedAppender},
    format::{Format, Formatter, MESSAGE_TOKEN},
    log_level::LogLevel,
    output::{LevelWriter, Output},
    placeholder::PlaceholderContext,
};
use crate::appenders::ConsoleAppender;
use parking_lot::Mutex;
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Weak};

/// Exit status passed to the exit callback by the fatal entry points.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Called with [`FATAL_EXIT_CODE`] after a fatal record has been written.
pub type Exiter = Arc<dyn Fn(i32) + Send + Sync>;

/// How continuation lines of a multi-line message are shifted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Indent {
    /// Continuation lines start at column zero.
    #[default]
    Disabled,
    /// Continuation lines start under the first character of the message.
    Auto,
    /// Continuation lines are shifted by a fixed number of spaces.
    Shift(usize),
}

impl Indent {
    fn width(self, rendered: &str) -> Option<usize> {
        match self {
            Indent::Disabled => None,
            Indent::Auto => Some(message_column(rendered)),
            Indent::Shift(width) => Some(width),
        }
    }
}

/// Visible column of the message token on its line, ignoring ANSI escapes.
fn message_column(rendered: &str) -> usize {
    let Some(position) = rendered.find(MESSAGE_TOKEN) else {
        return 0;
    };
    let before = &rendered[..position];
    let line = before.rsplit('\n').next().unwrap_or(before);

    let mut width = 0;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            width += 1;
            continue;
        }
        match chars.next() {
            // CSI sequence: parameters until a final byte in '@'..='~'
            Some('[') => {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(_) | None => {}
        }
    }
    width
}

fn indent_body(body: &str, width: usize) -> String {
    if width == 0 || !body.contains('\n') {
        return body.to_string();
    }
    body.replace('\n', &format!("\n{}", " ".repeat(width)))
}

struct LoggerState {
    format: Arc<dyn Formatter>,
    output: Arc<dyn LevelWriter>,
    prefix: String,
    indent: Indent,
    exiter: Exiter,
    fallback: SharedAppender,
    children: Vec<Weak<LoggerInner>>,
    follows_parent: bool,
}

struct LoggerInner {
    level: AtomicU8,
    state: Mutex<LoggerState>,
}

impl LoggerInner {
    fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Acquire))
    }

    /// Store `level` and push it to every child still following this logger.
    ///
    /// A cascade from the parent is dropped once this logger has set its own
    /// level; both the check and the opt-out happen under the state lock.
    fn apply_level(&self, level: LogLevel, from_parent: bool) {
        let mut state = self.state.lock();
        if from_parent && !state.follows_parent {
            return;
        }
        if !from_parent {
            state.follows_parent = false;
        }
        self.level.store(level as u8, Ordering::Release);

        state.children.retain(|child| match child.upgrade() {
            Some(child) => {
                child.apply_level(level, true);
                true
            }
            None => false,
        });
    }
}

/// Leveled logger rendering records through a [`Formatter`] and writing them
/// through a [`LevelWriter`].
///
/// # Example
///
/// ```
/// use rust_template_logger::appenders::MemoryAppender;
/// use rust_template_logger::prelude::*;
///
/// let memory = MemoryAppender::new();
/// let logger = Logger::builder()
///     .template("[${level}] %s")
///     .output(memory.clone())
///     .build();
///
/// logger.info("ready");
/// logger.debug("not emitted at the default level");
/// logger.warning_fmt(format_args!("{} retries left", 2));
///
/// assert_eq!(memory.contents(), "[INFO] ready\n[WARNING] 2 retries left\n");
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// Logger at [`LogLevel::Info`] with [`DEFAULT_FORMAT`](super::format::DEFAULT_FORMAT),
    /// writing every level to standard error.
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn from_parts(level: LogLevel, state: LoggerState) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                level: AtomicU8::new(level as u8),
                state: Mutex::new(state),
            }),
        }
    }

    /// Set the level of this logger and of every child still following it.
    ///
    /// A child that sets its own level stops following its parent.
    pub fn set_level(&self, level: LogLevel) {
        self.inner.apply_level(level, false);
    }

    pub fn level(&self) -> LogLevel {
        self.inner.level()
    }

    /// Whether a record at `level` would be written.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.inner.level().allows(level)
    }

    pub fn set_format<F: Formatter + 'static>(&self, format: F) {
        self.set_shared_format(Arc::new(format));
    }

    pub fn set_shared_format(&self, format: Arc<dyn Formatter>) {
        self.inner.state.lock().format = format;
    }

    pub fn format(&self) -> Arc<dyn Formatter> {
        Arc::clone(&self.inner.state.lock().format)
    }

    /// Write every level to `appender`.
    pub fn set_output<A: Appender + 'static>(&self, appender: A) {
        self.set_level_writer(Arc::new(Output::new(appender)));
    }

    /// Use `writer` (typically a configured [`Output`]) for every record.
    pub fn set_level_writer(&self, writer: Arc<dyn LevelWriter>) {
        self.inner.state.lock().output = writer;
    }

    pub fn output(&self) -> Arc<dyn LevelWriter> {
        Arc::clone(&self.inner.state.lock().output)
    }

    /// Align continuation lines of multi-line messages under the message
    /// column of the rendered template.
    ///
    /// ```text
    /// [INFO] before-new-line
    ///        after-new-line
    /// ```
    pub fn set_indent_lines(&self, enabled: bool) {
        self.inner.state.lock().indent = if enabled {
            Indent::Auto
        } else {
            Indent::Disabled
        };
    }

    /// Shift continuation lines of multi-line messages by `width` spaces.
    pub fn set_shift_indent(&self, width: usize) {
        self.inner.state.lock().indent = Indent::Shift(width);
    }

    pub fn indent(&self) -> Indent {
        self.inner.state.lock().indent
    }

    /// Text rendered by the `${prefix}` token.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.state.lock().prefix = prefix.into();
    }

    pub fn prefix(&self) -> String {
        self.inner.state.lock().prefix.clone()
    }

    /// Replace the callback run after fatal records. Defaults to
    /// [`std::process::exit`].
    pub fn set_exiter<F>(&self, exiter: F)
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.inner.state.lock().exiter = Arc::new(exiter);
    }

    /// Where write failures are reported. Defaults to standard error.
    pub fn set_fallback<A: Appender + 'static>(&self, appender: A) {
        self.inner.state.lock().fallback = shared(appender);
    }

    pub fn flush(&self) -> super::error::Result<()> {
        let output = self.output();
        output.flush()
    }

    /// Create a child sharing this logger's output.
    ///
    /// The child copies the current level, format, indentation, exit callback
    /// and fallback, and receives later [`Logger::set_level`] calls made on
    /// this logger until it sets a level of its own.
    pub fn new_child(&self) -> Logger {
        let mut state = self.inner.state.lock();

        let child = Logger::from_parts(
            self.inner.level(),
            LoggerState {
                format: Arc::clone(&state.format),
                output: Arc::clone(&state.output),
                prefix: String::new(),
                indent: state.indent,
                exiter: Arc::clone(&state.exiter),
                fallback: Arc::clone(&state.fallback),
                children: Vec::new(),
                follows_parent: true,
            },
        );

        state.children.push(Arc::downgrade(&child.inner));
        child
    }

    /// [`Logger::new_child`] with `prefix` rendered by `${prefix}`.
    pub fn new_child_with_prefix(&self, prefix: impl Into<String>) -> Logger {
        let child = self.new_child();
        child.set_prefix(prefix);
        child
    }

    /// Log `message` at `level`.
    #[track_caller]
    pub fn log<M: fmt::Display>(&self, level: LogLevel, message: M) {
        if !self.enabled(level) {
            return;
        }
        self.write_record(level, Location::caller(), &message);
    }

    /// Log preformatted arguments at `level`, see the [`log!`](crate::log) macro.
    #[track_caller]
    pub fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.write_record(level, Location::caller(), &args);
    }

    /// Log at [`LogLevel::Fatal`] regardless of the level, then run the exit
    /// callback with [`FATAL_EXIT_CODE`].
    #[track_caller]
    pub fn fatal<M: fmt::Display>(&self, message: M) {
        self.write_record(LogLevel::Fatal, Location::caller(), &message);
        self.exit();
    }

    #[track_caller]
    pub fn fatal_fmt(&self, args: fmt::Arguments<'_>) {
        self.write_record(LogLevel::Fatal, Location::caller(), &args);
        self.exit();
    }

    #[track_caller]
    pub fn error<M: fmt::Display>(&self, message: M) {
        self.log(LogLevel::Error, message);
    }

    #[track_caller]
    pub fn error_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Error, args);
    }

    #[track_caller]
    pub fn warning<M: fmt::Display>(&self, message: M) {
        self.log(LogLevel::Warning, message);
    }

    #[track_caller]
    pub fn warning_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Warning, args);
    }

    #[track_caller]
    pub fn info<M: fmt::Display>(&self, message: M) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    pub fn info_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    /// Alias for [`Logger::info`].
    #[track_caller]
    pub fn print<M: fmt::Display>(&self, message: M) {
        self.log(LogLevel::Info, message);
    }

    /// Alias for [`Logger::info_fmt`].
    #[track_caller]
    pub fn print_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    #[track_caller]
    pub fn debug<M: fmt::Display>(&self, message: M) {
        self.log(LogLevel::Debug, message);
    }

    #[track_caller]
    pub fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Debug, args);
    }

    #[track_caller]
    pub fn trace<M: fmt::Display>(&self, message: M) {
        self.log(LogLevel::Trace, message);
    }

    #[track_caller]
    pub fn trace_fmt(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Trace, args);
    }

    /// Render, assemble and write one record. The level gate is the caller's
    /// responsibility.
    fn write_record(
        &self,
        level: LogLevel,
        location: &'static Location<'static>,
        message: &dyn fmt::Display,
    ) {
        // formatted before locking so a Display impl may log through this logger
        let body = message.to_string();
        let context = PlaceholderContext::new(level).with_location(location);

        let state = self.inner.state.lock();
        let rendered = state.format.render(&context, &state.prefix);

        let body = match state.indent.width(&rendered) {
            Some(width) => indent_body(&body, width),
            None => body,
        };

        let mut record = rendered.replacen(MESSAGE_TOKEN, &body, 1);
        record.push('\n');

        if let Err(e) = state.output.write_with_level(record.as_bytes(), level) {
            let diagnostic = format!("[LOGGER ERROR] failed to write to log: {}\n", e);
            // nowhere left to report a failing fallback
            let _ = state.fallback.lock().write(diagnostic.as_bytes());
        }
    }

    fn exit(&self) {
        let exiter = Arc::clone(&self.inner.state.lock().exiter);
        exiter(FATAL_EXIT_CODE);
    }

    #[cfg(test)]
    fn live_children(&self) -> usize {
        self.inner
            .state
            .lock()
            .children
            .iter()
            .filter(|child| child.strong_count() > 0)
            .count()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Logger")
            .field("level", &self.inner.level())
            .field("prefix", &state.prefix)
            .field("indent", &state.indent)
            .field("children", &state.children.len())
            .finish()
    }
}

/// Builder for [`Logger`]
///
/// # Example
///
/// ```
/// use rust_template_logger::appenders::MemoryAppender;
/// use rust_template_logger::prelude::*;
///
/// let memory = MemoryAppender::new();
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .template("${level:%s:left} | %s")
///     .output(memory.clone())
///     .indent_lines(true)
///     .build();
///
/// logger.debug("first\nsecond");
/// assert_eq!(memory.contents(), "DEBUG   | first\n          second\n");
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    format: Option<Arc<dyn Formatter>>,
    output: Option<Arc<dyn LevelWriter>>,
    prefix: String,
    indent: Indent,
    exiter: Option<Exiter>,
    fallback: Option<SharedAppender>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: LogLevel::default(),
            format: None,
            output: None,
            prefix: String::new(),
            indent: Indent::Disabled,
            exiter: None,
            fallback: None,
        }
    }

    /// Set the level threshold
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Use a [`Format`] compiled from `template` with the built-in placeholders
    #[must_use = "builder methods return a new value"]
    pub fn template(self, template: impl Into<String>) -> Self {
        self.format(Format::new(template))
    }

    /// Use a custom formatter
    #[must_use = "builder methods return a new value"]
    pub fn format<F: Formatter + 'static>(self, format: F) -> Self {
        self.shared_format(Arc::new(format))
    }

    /// Use a formatter shared with other loggers
    #[must_use = "builder methods return a new value"]
    pub fn shared_format(mut self, format: Arc<dyn Formatter>) -> Self {
        self.format = Some(format);
        self
    }

    /// Write every level to `appender`
    #[must_use = "builder methods return a new value"]
    pub fn output<A: Appender + 'static>(self, appender: A) -> Self {
        self.level_writer(Arc::new(Output::new(appender)))
    }

    /// Use a routing writer, typically a configured [`Output`]
    #[must_use = "builder methods return a new value"]
    pub fn level_writer(mut self, writer: Arc<dyn LevelWriter>) -> Self {
        self.output = Some(writer);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn indent_lines(mut self, enabled: bool) -> Self {
        self.indent = if enabled {
            Indent::Auto
        } else {
            Indent::Disabled
        };
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn shift_indent(mut self, width: usize) -> Self {
        self.indent = Indent::Shift(width);
        self
    }

    /// Set the callback run after fatal records
    #[must_use = "builder methods return a new value"]
    pub fn exiter<F>(mut self, exiter: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.exiter = Some(Arc::new(exiter));
        self
    }

    /// Set where write failures are reported
    #[must_use = "builder methods return a new value"]
    pub fn fallback<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.fallback = Some(shared(appender));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let exiter: Exiter = match self.exiter {
            Some(exiter) => exiter,
            None => Arc::new(|code| std::process::exit(code)),
        };

        Logger::from_parts(
            self.level,
            LoggerState {
                format: self
                    .format
                    .unwrap_or_else(|| Arc::new(Format::default())),
                output: self
                    .output
                    .unwrap_or_else(|| Arc::new(Output::new(ConsoleAppender::stderr()))),
                prefix: self.prefix,
                indent: self.indent,
                exiter,
                fallback: self
                    .fallback
                    .unwrap_or_else(|| shared(ConsoleAppender::stderr())),
                children: Vec::new(),
                follows_parent: true,
            },
        )
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::MemoryAppender;
    use crate::core::error::LoggerError;
    use crate::core::placeholder::Placeholders;
    use crate::core::SharedPlaceholder;
    use std::sync::atomic::AtomicUsize;

    /// Formatter that counts renders and always yields `[testcase] %s`.
    #[derive(Default)]
    struct MockFormat {
        renders: AtomicUsize,
        last_level: Mutex<Option<LogLevel>>,
    }

    impl Formatter for MockFormat {
        fn set_placeholders(&self, _placeholders: Placeholders) {
            panic!("should not be called");
        }

        fn set_placeholder(&self, _name: &str, _placeholder: SharedPlaceholder) {
            panic!("should not be called");
        }

        fn placeholders(&self) -> Placeholders {
            panic!("should not be called");
        }

        fn render(&self, context: &PlaceholderContext, _prefix: &str) -> String {
            self.renders.fetch_add(1, Ordering::SeqCst);
            *self.last_level.lock() = Some(context.level());
            "[testcase] %s".to_string()
        }

        fn reset(&self) {}
    }

    fn memory_logger(template: &str) -> (Logger, MemoryAppender) {
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .template(template)
            .output(memory.clone())
            .build();
        (logger, memory)
    }

    #[test]
    fn test_defaults() {
        let logger = Logger::new();
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(logger.prefix(), "");
        assert_eq!(logger.indent(), Indent::Disabled);
    }

    #[test]
    fn test_logging_functions_call_render() {
        let mock = Arc::new(MockFormat::default());
        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .level(LogLevel::Trace)
            .shared_format(mock.clone())
            .output(memory.clone())
            .build();

        logger.error("1");
        assert_eq!(mock.renders.load(Ordering::SeqCst), 1);
        assert_eq!(*mock.last_level.lock(), Some(LogLevel::Error));

        logger.error_fmt(format_args!("{}", 2));
        logger.warning("3");
        logger.warning_fmt(format_args!("{}", 4));
        logger.info("5");
        logger.info_fmt(format_args!("{}", 6));
        logger.print("7");
        logger.print_fmt(format_args!("{}", 8));
        assert_eq!(mock.renders.load(Ordering::SeqCst), 8);

        logger.debug("9");
        logger.trace_fmt(format_args!("{}", 10));
        assert_eq!(mock.renders.load(Ordering::SeqCst), 10);
        assert_eq!(*mock.last_level.lock(), Some(LogLevel::Trace));

        assert_eq!(memory.lines().len(), 10);
        assert_eq!(memory.lines()[9], "[testcase] 10");
    }

    #[test]
    fn test_gate_skips_render() {
        let mock = Arc::new(MockFormat::default());
        let logger = Logger::builder()
            .level(LogLevel::Warning)
            .shared_format(mock.clone())
            .output(MemoryAppender::new())
            .build();

        logger.info("skipped");
        logger.debug_fmt(format_args!("skipped {}", 1));
        logger.trace("skipped");
        assert_eq!(mock.renders.load(Ordering::SeqCst), 0);

        logger.warning("written");
        assert_eq!(mock.renders.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_records_with_same_level_or_above() {
        for threshold in LogLevel::ALL {
            let (logger, memory) = memory_logger("${level} %s");
            logger.set_level(threshold);

            for level in LogLevel::ALL.iter().filter(|l| **l != LogLevel::Fatal) {
                logger.log(*level, "x");
                let written = !memory.drain().is_empty();
                assert_eq!(
                    written,
                    threshold >= *level,
                    "threshold {} record {}",
                    threshold,
                    level
                );
            }
        }
    }

    #[test]
    fn test_log_at_fatal_level_passes_every_gate() {
        let (logger, memory) = memory_logger("${level} %s");
        logger.set_level(LogLevel::Fatal);
        logger.log(LogLevel::Fatal, "x");
        assert_eq!(memory.contents(), "FATAL x\n");
    }

    #[test]
    fn test_fatal_calls_exiter() {
        let codes = Arc::new(Mutex::new(Vec::new()));
        let codes_clone = Arc::clone(&codes);

        let memory = MemoryAppender::new();
        let logger = Logger::builder()
            .format(MockFormat::default())
            .output(memory.clone())
            .exiter(move |code| codes_clone.lock().push(code))
            .build();

        logger.fatal("TESTCASE: log_fatal");
        logger.fatal_fmt(format_args!("TESTCASE: {}", "log_fatalf"));

        assert_eq!(*codes.lock(), vec![1, 1]);
        assert_eq!(
            memory.contents(),
            "[testcase] TESTCASE: log_fatal\n[testcase] TESTCASE: log_fatalf\n"
        );
    }

    #[test]
    fn test_set_format_and_output() {
        let (logger, first) = memory_logger("a %s");
        logger.info("1");

        let second = MemoryAppender::new();
        logger.set_output(second.clone());
        logger.set_format(Format::new("b %s"));
        logger.info("2");

        assert_eq!(first.contents(), "a 1\n");
        assert_eq!(second.contents(), "b 2\n");
    }

    #[test]
    fn test_template_without_message_token() {
        let (logger, memory) = memory_logger("${level}");
        logger.info("dropped body");
        assert_eq!(memory.contents(), "INFO\n");
    }

    #[test]
    fn test_message_substituted_once() {
        let (logger, memory) = memory_logger("%s | %s");
        logger.info("x");
        assert_eq!(memory.contents(), "x | %s\n");
    }

    #[test]
    fn test_routing_gap_reported_to_fallback() {
        let fallback = MemoryAppender::new();
        let logger = Logger::builder()
            .template("%s")
            .level_writer(Arc::new(Output::empty()))
            .fallback(fallback.clone())
            .build();

        logger.info("lost");

        let diagnostic = fallback.contents();
        assert!(diagnostic.starts_with("[LOGGER ERROR] failed to write to log:"));
        assert!(diagnostic.contains("INFO"));
    }

    #[test]
    fn test_write_failure_reported_to_fallback() {
        struct Broken;
        impl Appender for Broken {
            fn write(&mut self, _data: &[u8]) -> crate::core::Result<usize> {
                Err(LoggerError::writer("disk full"))
            }
            fn name(&self) -> &str {
                "broken"
            }
        }

        let fallback = MemoryAppender::new();
        let logger = Logger::builder()
            .template("%s")
            .output(Broken)
            .fallback(fallback.clone())
            .build();

        logger.error("x");
        assert!(fallback.contents().contains("disk full"));
    }

    #[test]
    fn test_line_and_file_placeholders() {
        let (logger, memory) = memory_logger("${file}:${line} %s");
        let line = line!() + 1;
        logger.info("here");
        assert_eq!(memory.contents(), format!("logger.rs:{} here\n", line));

        let (logger, memory) = memory_logger("${file:long} %s");
        logger.warning_fmt(format_args!("{}", "there"));
        assert_eq!(memory.contents(), format!("{} there\n", file!()));
    }

    #[test]
    fn test_message_column() {
        assert_eq!(message_column("[blah] %s"), 7);
        assert_eq!(message_column("\x1b[48;5;2mblah: %s"), 6);
        assert_eq!(message_column("head\n  > %s"), 4);
        assert_eq!(message_column("no token"), 0);
        assert_eq!(message_column("%s"), 0);
    }

    #[test]
    fn test_indent_lines() {
        let (logger, memory) = memory_logger("[blah] %s");
        logger.set_indent_lines(true);

        logger.info("1");
        logger.info("2\n3\n4");

        assert_eq!(
            memory.contents(),
            "[blah] 1\n[blah] 2\n       3\n       4\n"
        );
    }

    #[test]
    fn test_indent_lines_with_escape_sequences() {
        let (logger, memory) = memory_logger("\x1b[48;5;2mblah: %s");
        logger.set_indent_lines(true);

        logger.info("1");
        logger.info("2\n3\n4");

        assert_eq!(
            memory.contents(),
            "\x1b[48;5;2mblah: 1\n\x1b[48;5;2mblah: 2\n      3\n      4\n"
        );
    }

    #[test]
    fn test_shift_indent() {
        let (logger, memory) = memory_logger("[blah] %s");
        logger.set_shift_indent(2);
        logger.info("a\nb");
        assert_eq!(memory.contents(), "[blah] a\n  b\n");
        assert_eq!(logger.indent(), Indent::Shift(2));

        logger.set_indent_lines(false);
        logger.info("c\nd");
        assert_eq!(memory.contents(), "[blah] a\n  b\n[blah] c\nd\n");
    }

    #[test]
    fn test_child_inherits_settings() {
        let (logger, memory) = memory_logger("${prefix}%s");
        logger.set_level(LogLevel::Debug);
        logger.set_shift_indent(3);

        let child = logger.new_child();
        assert_eq!(child.level(), LogLevel::Debug);
        assert_eq!(child.indent(), Indent::Shift(3));
        assert_eq!(child.prefix(), "");
        assert!(Arc::ptr_eq(&child.output(), &logger.output()));

        child.debug("from child");
        assert_eq!(memory.contents(), "from child\n");
    }

    #[test]
    fn test_set_level_cascades_to_children() {
        let logger = Logger::builder().output(MemoryAppender::new()).build();
        let child = logger.new_child();
        let child2 = logger.new_child();
        let grandchild = child.new_child();

        logger.set_level(LogLevel::Trace);
        assert_eq!(child.level(), LogLevel::Trace);
        assert_eq!(child2.level(), LogLevel::Trace);
        assert_eq!(grandchild.level(), LogLevel::Trace);
    }

    #[test]
    fn test_child_cannot_change_parent_level() {
        let logger = Logger::builder().output(MemoryAppender::new()).build();
        let child = logger.new_child();

        child.set_level(LogLevel::Error);
        assert_eq!(logger.level(), LogLevel::Info);
        assert_eq!(child.level(), LogLevel::Error);
    }

    #[test]
    fn test_child_own_level_breaks_inheritance() {
        let logger = Logger::builder().output(MemoryAppender::new()).build();
        let follower = logger.new_child();
        let independent = logger.new_child();

        logger.set_level(LogLevel::Debug);
        assert_eq!(independent.level(), LogLevel::Debug);

        independent.set_level(LogLevel::Error);
        logger.set_level(LogLevel::Trace);

        assert_eq!(follower.level(), LogLevel::Trace);
        assert_eq!(independent.level(), LogLevel::Error);
    }

    #[test]
    fn test_child_override_survives_racing_parent_cascade() {
        use std::sync::Barrier;
        use std::thread;

        for _ in 0..500 {
            let logger = Logger::builder().output(MemoryAppender::new()).build();
            let child = logger.new_child();
            let barrier = Arc::new(Barrier::new(2));

            let parent = {
                let logger = logger.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    logger.set_level(LogLevel::Trace);
                })
            };

            let own = {
                let child = child.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    child.set_level(LogLevel::Error);
                })
            };

            parent.join().expect("parent thread panicked");
            own.join().expect("child thread panicked");

            assert_eq!(logger.level(), LogLevel::Trace);
            assert_eq!(child.level(), LogLevel::Error);
        }
    }

    #[test]
    fn test_prefix_chain() {
        let (logger, memory) = memory_logger("${prefix}%s");
        let child = logger.new_child_with_prefix("child");
        let subchild = child.new_child_with_prefix("subchild");

        logger.info("1");
        child.info("2");
        subchild.info("3");
        child.info("4");
        logger.info("5");

        assert_eq!(memory.contents(), "1\nchild 2\nsubchild 3\nchild 4\n5\n");
    }

    #[test]
    fn test_dropped_children_are_pruned() {
        let logger = Logger::builder().output(MemoryAppender::new()).build();
        let kept = logger.new_child();
        drop(logger.new_child());

        assert_eq!(logger.live_children(), 1);
        logger.set_level(LogLevel::Debug);
        assert_eq!(logger.inner.state.lock().children.len(), 1);
        assert_eq!(kept.level(), LogLevel::Debug);
    }

    #[test]
    fn test_clones_share_instance() {
        let (logger, memory) = memory_logger("%s");
        let clone = logger.clone();
        clone.set_level(LogLevel::Trace);
        assert_eq!(logger.level(), LogLevel::Trace);

        logger.trace("shared");
        assert_eq!(memory.contents(), "shared\n");
    }

    #[test]
    fn test_display_may_log_reentrantly() {
        struct Noisy(Logger);
        impl fmt::Display for Noisy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.info("inner");
                f.write_str("outer")
            }
        }

        let (logger, memory) = memory_logger("%s");
        logger.info(Noisy(logger.clone()));
        assert_eq!(memory.contents(), "inner\nouter\n");
    }
}
