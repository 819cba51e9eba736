//! Shared fixtures for unit tests

use super::appender::Appender;
use super::error::{LoggerError, Result};
use super::formatter::Formatter;
use super::log_level::LogLevel;
use std::sync::Arc;

/// Records every formatted line into a shared buffer.
pub(crate) struct RecordingAppender {
    pub level: LogLevel,
    pub formatter: Option<Formatter>,
    pub lines: Arc<crate::sync::Mutex<Vec<String>>>,
}

impl RecordingAppender {
    pub fn new(level: LogLevel) -> (Self, Arc<crate::sync::Mutex<Vec<String>>>) {
        let lines = Arc::new(crate::sync::Mutex::new(Vec::new()));
        (
            Self {
                level,
                formatter: None,
                lines: Arc::clone(&lines),
            },
            lines,
        )
    }

    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.formatter = Some(Formatter::new(pattern));
        self
    }
}

impl Appender for RecordingAppender {
    fn min_level(&self) -> LogLevel {
        self.level
    }
    fn set_min_level(&mut self, level: LogLevel) {
        self.level = level;
    }
    fn formatter(&self) -> Option<&Formatter> {
        self.formatter.as_ref()
    }
    fn set_formatter(&mut self, formatter: Formatter) {
        self.formatter = Some(formatter);
    }
    fn write(&mut self, formatted: &str) -> Result<()> {
        self.lines.lock().push(formatted.to_string());
        Ok(())
    }
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
    fn name(&self) -> &str {
        "recording"
    }
}

/// Fails or panics on every write.
pub(crate) struct BrokenAppender {
    pub panic: bool,
    pub formatter: Option<Formatter>,
}

impl Appender for BrokenAppender {
    fn min_level(&self) -> LogLevel {
        LogLevel::Unknown
    }
    fn set_min_level(&mut self, _level: LogLevel) {}
    fn formatter(&self) -> Option<&Formatter> {
        self.formatter.as_ref()
    }
    fn set_formatter(&mut self, formatter: Formatter) {
        self.formatter = Some(formatter);
    }
    fn write(&mut self, _formatted: &str) -> Result<()> {
        if self.panic {
            panic!("simulated appender panic");
        }
        Err(LoggerError::writer("simulated failure"))
    }
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
    fn name(&self) -> &str {
        "broken"
    }
}
