//! Appender trait for log output destinations

use super::{
    error::Result, formatter::Formatter, log_event::LogEvent, log_level::LogLevel,
};
use crate::sync::{Mutex, MutexGuard};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A sink for formatted log text.
///
/// Implementors provide the level/formatter storage and [`Appender::write`];
/// the filtering and rendering in [`Appender::log`] is shared.
pub trait Appender: Send {
    fn min_level(&self) -> LogLevel;
    fn set_min_level(&mut self, level: LogLevel);

    fn formatter(&self) -> Option<&Formatter>;
    fn set_formatter(&mut self, formatter: Formatter);

    /// Write one already-formatted record to the sink.
    fn write(&mut self, formatted: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Filter by level, render, write.
    ///
    /// An appender with no formatter (never attached to a logger and never
    /// given one) has nothing to render with and writes nothing.
    fn log(&mut self, logger_name: &str, level: LogLevel, event: &LogEvent) -> Result<()> {
        if level < self.min_level() {
            return Ok(());
        }
        let Some(formatter) = self.formatter() else {
            return Ok(());
        };
        let formatted = formatter.format_named(logger_name, event);
        self.write(&formatted)
    }
}

static NEXT_APPENDER_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a shared appender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppenderId(u64);

impl fmt::Display for AppenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "appender#{}", self.0)
    }
}

/// A shareable, lock-guarded appender.
///
/// Clones refer to the same appender and carry the same [`AppenderId`]. The
/// lock covers a whole render-write-flush, so records from concurrent loggers
/// never interleave within a line. The appender lives as long as its longest
/// holder.
#[derive(Clone)]
pub struct AppenderHandle {
    id: AppenderId,
    inner: Arc<Mutex<Box<dyn Appender>>>,
}

impl AppenderHandle {
    pub fn new<A: Appender + 'static>(appender: A) -> Self {
        Self::from_boxed(Box::new(appender))
    }

    pub fn from_boxed(appender: Box<dyn Appender>) -> Self {
        Self {
            id: AppenderId(NEXT_APPENDER_ID.fetch_add(1, Ordering::Relaxed)),
            inner: Arc::new(Mutex::new(appender)),
        }
    }

    pub fn id(&self) -> AppenderId {
        self.id
    }

    /// Lock the appender for direct access (configuration, flushing, tests).
    pub fn lock(&self) -> MutexGuard<'_, Box<dyn Appender>> {
        self.inner.lock()
    }

    pub fn log(&self, logger_name: &str, level: LogLevel, event: &LogEvent) -> Result<()> {
        self.inner.lock().log(logger_name, level, event)
    }

    pub fn flush(&self) -> Result<()> {
        self.inner.lock().flush()
    }

    /// Give the appender `formatter` unless it already has one.
    /// Returns whether the fallback was applied.
    pub fn adopt_formatter(&self, formatter: &Formatter) -> bool {
        let mut appender = self.inner.lock();
        if appender.formatter().is_some() {
            return false;
        }
        appender.set_formatter(formatter.clone());
        true
    }

    pub fn min_level(&self) -> LogLevel {
        self.inner.lock().min_level()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        self.inner.lock().set_min_level(level);
    }

    pub fn name(&self) -> String {
        self.inner.lock().name().to_string()
    }

    /// Number of handles (in loggers or elsewhere) sharing this appender.
    pub fn holders(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl PartialEq for AppenderHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AppenderHandle {}

impl fmt::Debug for AppenderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppenderHandle").field("id", &self.id).finish()
    }
}
