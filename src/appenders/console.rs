//! Console appender implementation

use crate::core::{Appender, Formatter, LogLevel, Result};
use std::borrow::Cow;
use std::io::Write;

/// Writes formatted records to standard output.
pub struct ConsoleAppender {
    min_level: LogLevel,
    formatter: Option<Formatter>,
    #[cfg(feature = "console")]
    use_colors: bool,
    #[cfg(feature = "console")]
    last_level: LogLevel,
}

impl ConsoleAppender {
    /// A console appender at `Debug` with no formatter of its own.
    pub fn new() -> Self {
        Self::with_level(LogLevel::Debug)
    }

    pub fn with_level(min_level: LogLevel) -> Self {
        Self {
            min_level,
            formatter: None,
            #[cfg(feature = "console")]
            use_colors: false,
            #[cfg(feature = "console")]
            last_level: LogLevel::Unknown,
        }
    }

    /// Use `pattern` instead of inheriting the logger's.
    ///
    /// # Example
    ///
    /// ```
    /// use pattern_logger::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::new().with_pattern("[%p] %m%n");
    /// ```
    #[must_use]
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.formatter = Some(Formatter::new(pattern));
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Colour each record by its level.
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[cfg(feature = "console")]
    fn decorate<'a>(&self, formatted: &'a str) -> Cow<'a, str> {
        if self.use_colors {
            Cow::Owned(self.colorize(formatted))
        } else {
            Cow::Borrowed(formatted)
        }
    }

    #[cfg(not(feature = "console"))]
    fn decorate<'a>(&self, formatted: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(formatted)
    }

    #[cfg(feature = "console")]
    fn colorize(&self, formatted: &str) -> String {
        use colored::Colorize;
        // Keep the trailing newline outside the escape codes.
        let (body, tail) = match formatted.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (formatted, ""),
        };
        format!("{}{}", body.color(self.last_level.color_code()), tail)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn min_level(&self) -> LogLevel {
        self.min_level
    }

    fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    fn formatter(&self) -> Option<&Formatter> {
        self.formatter.as_ref()
    }

    fn set_formatter(&mut self, formatter: Formatter) {
        self.formatter = Some(formatter);
    }

    #[cfg(feature = "console")]
    fn log(
        &mut self,
        logger_name: &str,
        level: LogLevel,
        event: &crate::core::LogEvent,
    ) -> Result<()> {
        if level < self.min_level {
            return Ok(());
        }
        let Some(formatter) = self.formatter.as_ref() else {
            return Ok(());
        };
        let formatted = formatter.format_named(logger_name, event);
        self.last_level = event.level();
        self.write(&formatted)
    }

    fn write(&mut self, formatted: &str) -> Result<()> {
        let output = self.decorate(formatted);
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
