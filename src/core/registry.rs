//! Named logger directory

use super::appender::AppenderHandle;
use super::logger::{Logger, ROOT_LOGGER_NAME};
use super::platform::SystemPlatform;
use crate::appenders::ConsoleAppender;
use crate::sync::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Name-to-logger table with an always-present root logger.
///
/// Construct one at start-up and pass it (or an `Arc` of it) to whoever needs
/// logger lookup. Lookups from any number of threads are safe: the first
/// caller for a name creates the logger and every later caller gets the same
/// instance.
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
    root: Arc<Logger>,
}

impl LoggerRegistry {
    /// A registry whose root logger writes to the console.
    pub fn new() -> Self {
        let root = Logger::new(ROOT_LOGGER_NAME);
        root.add_appender(AppenderHandle::new(ConsoleAppender::new()));
        Self::with_root(root)
    }

    /// A registry around a caller-built root logger. Its name becomes the
    /// root's key in the table.
    pub fn with_root(root: Logger) -> Self {
        SystemPlatform::mark_start();
        let root = Arc::new(root);
        let mut loggers = HashMap::new();
        loggers.insert(root.name().to_string(), Arc::clone(&root));
        Self {
            loggers: Mutex::new(loggers),
            root,
        }
    }

    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// The logger called `name`, created at `Debug` with no appenders on
    /// first request.
    pub fn get_logger(&self, name: &str) -> Arc<Logger> {
        let mut loggers = self.loggers.lock();
        if let Some(logger) = loggers.get(name) {
            return Arc::clone(logger);
        }
        let logger = Arc::new(Logger::new(name));
        loggers.insert(name.to_string(), Arc::clone(&logger));
        logger
    }

    /// The logger called `name`, if it has been created.
    pub fn find(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.lock().contains_key(name)
    }

    /// Number of registered loggers, root included.
    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.names())
            .finish()
    }
}
