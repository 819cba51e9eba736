//! Main logger implementation

use super::{
    appender::AppenderHandle,
    error::Result,
    formatter::Formatter,
    log_event::LogEvent,
    log_level::LogLevel,
    log_scope::LogScope,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;

/// Name of the logger every registry starts with.
pub const ROOT_LOGGER_NAME: &str = "root";

/// A named, levelled fan-out point for log events.
///
/// Appenders are dispatched to in attachment order. A logger does not own its
/// appenders exclusively; the same [`AppenderHandle`] can be attached to any
/// number of loggers.
pub struct Logger {
    name: String,
    min_level: RwLock<LogLevel>,
    appenders: RwLock<Vec<AppenderHandle>>,
    /// Handed to appenders that arrive without a formatter of their own
    formatter: RwLock<Formatter>,
    /// Metrics for observability (dispatched events, appender failures)
    metrics: LoggerMetrics,
}

impl Logger {
    /// A logger at `Debug` with no appenders and the default pattern.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_level: RwLock::new(LogLevel::Debug),
            appenders: RwLock::new(Vec::new()),
            formatter: RwLock::new(Formatter::default()),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level()
    }

    /// The default formatter given to appenders attached without one.
    pub fn formatter(&self) -> Formatter {
        self.formatter.read().clone()
    }

    /// Replace the default formatter. Appenders that already adopted the old
    /// one keep it.
    pub fn set_formatter(&self, formatter: Formatter) {
        *self.formatter.write() = formatter;
    }

    pub fn set_pattern(&self, pattern: impl Into<String>) {
        self.formatter.write().set_pattern(pattern);
    }

    /// Attach `appender` at the end of the dispatch order.
    ///
    /// If the appender has no formatter yet it receives a copy of this
    /// logger's default formatter, once, here.
    pub fn add_appender(&self, appender: AppenderHandle) {
        appender.adopt_formatter(&self.formatter.read());
        self.appenders.write().push(appender);
    }

    /// Detach the first appender with the same id as `appender`.
    /// Returns whether anything was removed; absence is not an error.
    pub fn del_appender(&self, appender: &AppenderHandle) -> bool {
        let mut appenders = self.appenders.write();
        match appenders.iter().position(|a| a.id() == appender.id()) {
            Some(index) => {
                appenders.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear_appenders(&self) {
        self.appenders.write().clear();
    }

    /// Attached appenders in dispatch order.
    pub fn appenders(&self) -> Vec<AppenderHandle> {
        self.appenders.read().clone()
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    /// Fan `event` out to every appender, in attachment order.
    ///
    /// Below the logger level this is a no-op. Each appender is isolated: an
    /// error or panic in one is reported on stderr and the rest still run.
    pub fn log(&self, level: LogLevel, event: &LogEvent) {
        if level < self.min_level() {
            return;
        }

        let appenders = self.appenders.read().clone();
        for appender in &appenders {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.log(&self.name, level, event)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] {} failed in logger '{}': {}",
                        appender.id(),
                        self.name,
                        e
                    );
                    self.metrics.record_appender_failure();
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] {} panicked in logger '{}': {}. \
                         Other appenders continue to function.",
                        appender.id(),
                        self.name,
                        panic_msg
                    );
                    self.metrics.record_appender_failure();
                }
            }
        }

        self.metrics.record_dispatched();
    }

    /// Log `event` at its own level.
    pub fn dispatch(&self, event: &LogEvent) {
        self.log(event.level(), event);
    }

    #[inline]
    pub fn debug(&self, event: &LogEvent) {
        self.log(LogLevel::Debug, event);
    }

    #[inline]
    pub fn info(&self, event: &LogEvent) {
        self.log(LogLevel::Info, event);
    }

    #[inline]
    pub fn warn(&self, event: &LogEvent) {
        self.log(LogLevel::Warn, event);
    }

    #[inline]
    pub fn error(&self, event: &LogEvent) {
        self.log(LogLevel::Error, event);
    }

    #[inline]
    pub fn fatal(&self, event: &LogEvent) {
        self.log(LogLevel::Fatal, event);
    }

    /// Open an event scope at the given call site. The event is dispatched to
    /// this logger exactly once, when the scope ends.
    pub fn scope(&self, level: LogLevel, file: &'static str, line: u32) -> LogScope<'_> {
        LogScope::new(self, LogEvent::capture(level, file, line))
    }

    pub fn flush(&self) -> Result<()> {
        for appender in self.appenders() {
            appender.flush()?;
        }
        Ok(())
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use pattern_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("payments")
    ///     .min_level(LogLevel::Info)
    ///     .pattern("[%p] %c: %m%n")
    ///     .build();
    /// assert_eq!(logger.name(), "payments");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(ROOT_LOGGER_NAME)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("min_level", &self.min_level())
            .field("appenders", &self.appender_count())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use pattern_logger::prelude::*;
///
/// let console = AppenderHandle::new(ConsoleAppender::new());
/// let logger = Logger::builder()
///     .name("svc")
///     .min_level(LogLevel::Debug)
///     .appender(console)
///     .build();
/// assert_eq!(logger.appender_count(), 1);
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: LogLevel,
    pattern: Option<String>,
    appenders: Vec<AppenderHandle>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            name: ROOT_LOGGER_NAME.to_string(),
            min_level: LogLevel::Debug,
            pattern: None,
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the logger's default pattern, inherited by appenders without one
    #[must_use = "builder methods return a new value"]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender(mut self, appender: AppenderHandle) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let logger = Logger::new(self.name);
        logger.set_min_level(self.min_level);
        if let Some(pattern) = self.pattern {
            logger.set_pattern(pattern);
        }
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
