//! Log event structure

use super::log_level::LogLevel;
use super::platform::{Platform, SystemPlatform};
use std::fmt;

/// Snapshot of one log call.
///
/// Everything except the message is fixed at capture time. The message buffer
/// is filled by the call site (usually through a [`LogScope`]) and the event is
/// handed to a logger exactly once.
///
/// [`LogScope`]: super::log_scope::LogScope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    level: LogLevel,
    file: &'static str,
    line: u32,
    thread_id: u64,
    fiber_id: u32,
    time: i64,
    uptime: u64,
    message: String,
}

impl LogEvent {
    /// Capture the calling thread's context using the system platform.
    pub fn capture(level: LogLevel, file: &'static str, line: u32) -> Self {
        Self::capture_with(&SystemPlatform, level, file, line)
    }

    pub fn capture_with(
        platform: &dyn Platform,
        level: LogLevel,
        file: &'static str,
        line: u32,
    ) -> Self {
        Self {
            level,
            file,
            line,
            thread_id: platform.current_thread_id(),
            fiber_id: platform.fiber_id(),
            time: platform.unix_time(),
            uptime: platform.uptime_millis(),
            message: String::new(),
        }
    }

    /// Build an event from explicit parts. Used by tests and replay tools.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        level: LogLevel,
        file: &'static str,
        line: u32,
        thread_id: u64,
        fiber_id: u32,
        time: i64,
        uptime: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            file,
            line,
            thread_id,
            fiber_id,
            time,
            uptime,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn thread_id(&self) -> u64 {
        self.thread_id
    }

    pub fn fiber_id(&self) -> u32 {
        self.fiber_id
    }

    /// Seconds since the Unix epoch.
    pub fn time(&self) -> i64 {
        self.time
    }

    /// Milliseconds of process uptime.
    pub fn uptime(&self) -> u64 {
        self.uptime
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The accumulator the call site writes its message into.
    pub fn stream(&mut self) -> &mut String {
        &mut self.message
    }
}

impl fmt::Write for LogEvent {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.message.push_str(s);
        Ok(())
    }
}
