//! Per-level output routing
//!
//! [`Output`] maps every level to an ordered list of appenders. A fresh
//! router sends every level to the same appender; [`Output::set_appenders`]
//! replaces the list of a single level.

use super::appender::{shared, Appender, SharedAppender};
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A destination that accepts records together with their level.
pub trait LevelWriter: Send + Sync {
    /// Write a complete record for `level`, returning the byte count.
    fn write_with_level(&self, data: &[u8], level: LogLevel) -> Result<usize>;

    fn flush(&self) -> Result<()>;
}

/// The default [`LevelWriter`]: a level to appenders routing table.
///
/// The table and the write loop share one mutex, so records written through
/// the same router never interleave.
///
/// # Examples
///
/// ```
/// use rust_template_logger::appenders::MemoryAppender;
/// use rust_template_logger::core::{shared, LevelWriter, LogLevel, Output};
///
/// let base = MemoryAppender::new();
/// let alerts = MemoryAppender::new();
///
/// let output = Output::new(base.clone());
/// output.set_appenders(LogLevel::Error, vec![shared(base.clone()), shared(alerts.clone())]);
///
/// output.write_with_level(b"info\n", LogLevel::Info).unwrap();
/// output.write_with_level(b"error\n", LogLevel::Error).unwrap();
///
/// assert_eq!(base.contents(), "info\nerror\n");
/// assert_eq!(alerts.contents(), "error\n");
/// ```
pub struct Output {
    routes: Mutex<HashMap<LogLevel, Vec<SharedAppender>>>,
}

impl Output {
    /// Route every level to `appender`.
    pub fn new<A: Appender + 'static>(appender: A) -> Self {
        Self::with_shared(shared(appender))
    }

    /// Route every level to an already shared appender.
    pub fn with_shared(appender: SharedAppender) -> Self {
        let routes = LogLevel::ALL
            .iter()
            .map(|level| (*level, vec![Arc::clone(&appender)]))
            .collect();

        Self {
            routes: Mutex::new(routes),
        }
    }

    /// A router with no routes; every write fails until levels are configured.
    pub fn empty() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the appenders of exactly one level.
    ///
    /// An empty list removes the route, making writes for `level` fail.
    pub fn set_appenders(&self, level: LogLevel, appenders: Vec<SharedAppender>) -> &Self {
        let mut routes = self.routes.lock();
        if appenders.is_empty() {
            routes.remove(&level);
        } else {
            routes.insert(level, appenders);
        }
        self
    }

    /// Number of appenders routed for `level`.
    pub fn appender_count(&self, level: LogLevel) -> usize {
        self.routes.lock().get(&level).map_or(0, Vec::len)
    }
}

impl LevelWriter for Output {
    /// Writes to every appender of `level` in order.
    ///
    /// Every appender is attempted even after a failure; the first failure
    /// is returned, otherwise the byte count of the last appender.
    fn write_with_level(&self, data: &[u8], level: LogLevel) -> Result<usize> {
        let routes = self.routes.lock();
        let appenders = routes
            .get(&level)
            .ok_or_else(|| LoggerError::no_appender(level))?;

        let mut written = 0;
        let mut first_error = None;
        for appender in appenders {
            match appender.lock().write(data) {
                Ok(count) => written = count,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(written),
        }
    }

    fn flush(&self) -> Result<()> {
        let routes = self.routes.lock();
        let mut first_error = None;
        let mut flushed: Vec<*const ()> = Vec::new();

        for appender in routes.values().flatten() {
            // the same appender is usually routed for several levels
            let key = Arc::as_ptr(appender) as *const ();
            if flushed.contains(&key) {
                continue;
            }
            flushed.push(key);

            if let Err(e) = appender.lock().flush() {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let routes = self.routes.lock();
        let mut map = f.debug_map();
        for level in LogLevel::ALL {
            if let Some(appenders) = routes.get(&level) {
                let names: Vec<String> = appenders
                    .iter()
                    .map(|appender| appender.lock().name().to_string())
                    .collect();
                map.entry(&level.to_str(), &names);
            }
        }
        map.finish()
    }
}
