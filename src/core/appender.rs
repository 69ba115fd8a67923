//! Appender trait for log output destinations

use super::error::Result;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// A destination for rendered log records.
///
/// Appenders receive complete, newline-terminated records as bytes.
pub trait Appender: Send {
    /// Write `data` and return the number of bytes accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Appender handle shared between routing entries and loggers.
pub type SharedAppender = Arc<Mutex<dyn Appender>>;

/// Wrap an appender so it can be registered for several levels at once.
pub fn shared<A: Appender + 'static>(appender: A) -> SharedAppender {
    Arc::new(Mutex::new(appender))
}

/// Adapts any [`std::io::Write`] into an [`Appender`].
pub struct WriterAppender<W> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            name: "writer".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.writer.write_all(data)?;
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
