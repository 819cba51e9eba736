//! File appender implementation

use crate::core::{Appender, Formatter, LogLevel, LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends formatted records to a file, flushing after every record.
///
/// The sink is best-effort. If the file cannot be opened, [`FileAppender::reopen`]
/// returns `false` and writes are dropped silently until a later reopen
/// succeeds. Each write against a closed handle tries one reopen first.
/// Callers that need to know must check `reopen()` or [`FileAppender::is_open`].
pub struct FileAppender {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    min_level: LogLevel,
    formatter: Option<Formatter>,
}

impl FileAppender {
    /// Best-effort construction: the file is opened in append mode, and a
    /// failure leaves the appender closed rather than returning an error.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let mut appender = Self {
            path: path.into(),
            writer: None,
            min_level: LogLevel::Debug,
            formatter: None,
        };
        appender.reopen();
        appender
    }

    /// Strict construction: fails if the file cannot be opened now.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pattern_logger::appenders::FileAppender;
    ///
    /// let appender = FileAppender::open("/var/log/app.log")?
    ///     .with_pattern("%d [%p] %m%n");
    /// # Ok::<(), pattern_logger::LoggerError>(())
    /// ```
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = Self::open_append(&path).map_err(|e| {
            LoggerError::io_operation("opening log file", path.display().to_string(), e)
        })?;
        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            min_level: LogLevel::Debug,
            formatter: None,
        })
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

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

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Close any current handle and open the path again in append mode.
    /// Returns whether the new handle is usable.
    pub fn reopen(&mut self) -> bool {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
        match Self::open_append(&self.path) {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                true
            }
            Err(_) => false,
        }
    }

    fn open_append(path: &Path) -> std::io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }
}

impl Appender for FileAppender {
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

    fn write(&mut self, formatted: &str) -> Result<()> {
        if self.writer.is_none() && !self.reopen() {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };

        let written = writer
            .write_all(formatted.as_bytes())
            .and_then(|()| writer.flush());
        if let Err(e) = written {
            // Drop the handle so the next record reopens the file.
            self.writer = None;
            return Err(LoggerError::io_operation(
                "writing log file",
                self.path.display().to_string(),
                e,
            ));
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogEvent;
    use std::fs;
    use tempfile::TempDir;

    fn event(level: LogLevel, message: &str) -> LogEvent {
        LogEvent::from_parts(level, "f.rs", 1, 1, 0, 0, 0, message)
    }

    #[test]
    fn test_writes_are_flushed_immediately() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut appender = FileAppender::new(&path).with_pattern("%p %m%n");

        appender.log("root", LogLevel::Info, &event(LogLevel::Info, "first")).unwrap();
        // No explicit flush: the record must already be on disk.
        assert_eq!(fs::read_to_string(&path).unwrap(), "INFO first\n");
    }

    #[test]
    fn test_appends_to_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "existing\n").unwrap();

        let mut appender = FileAppender::new(&path).with_pattern("%m%n");
        appender.log("root", LogLevel::Info, &event(LogLevel::Info, "new")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing\nnew\n");
    }

    #[test]
    fn test_level_filter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let mut appender = FileAppender::new(&path)
            .with_level(LogLevel::Error)
            .with_pattern("%m%n");

        appender.log("root", LogLevel::Warn, &event(LogLevel::Warn, "skip")).unwrap();
        appender.log("root", LogLevel::Error, &event(LogLevel::Error, "keep")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep\n");
    }

    #[test]
    fn test_reopen_reports_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("app.log");
        let mut appender = FileAppender::new(&path).with_pattern("%m%n");

        assert!(!appender.is_open());
        assert!(!appender.reopen());
        // Silently dropped while the path stays unusable.
        appender.log("root", LogLevel::Info, &event(LogLevel::Info, "lost")).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_write_reopens_closed_handle() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("later");
        let path = sub.join("app.log");
        let mut appender = FileAppender::new(&path).with_pattern("%m%n");
        assert!(!appender.is_open());

        fs::create_dir(&sub).unwrap();
        appender.log("root", LogLevel::Info, &event(LogLevel::Info, "recovered")).unwrap();
        assert!(appender.is_open());
        assert_eq!(fs::read_to_string(&path).unwrap(), "recovered\n");
    }

    #[test]
    fn test_reopen_after_rotation_by_rename() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let rotated = dir.path().join("app.log.1");
        let mut appender = FileAppender::new(&path).with_pattern("%m%n");

        appender.log("root", LogLevel::Info, &event(LogLevel::Info, "old")).unwrap();
        fs::rename(&path, &rotated).unwrap();
        assert!(appender.reopen());
        appender.log("root", LogLevel::Info, &event(LogLevel::Info, "new")).unwrap();

        assert_eq!(fs::read_to_string(&rotated).unwrap(), "old\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_open_is_strict() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("nope").join("app.log");
        let err = FileAppender::open(&bad).err().unwrap();
        assert!(matches!(err, LoggerError::IoOperation { .. }));

        let good = FileAppender::open(dir.path().join("ok.log")).unwrap();
        assert!(good.is_open());
        assert_eq!(good.name(), "file");
    }
}
