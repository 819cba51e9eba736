//! # Pattern Logger
//!
//! A small structured-logging core: named loggers with level filtering,
//! pattern-based formatting and pluggable appenders.
//!
//! ## Features
//!
//! - **Pattern formatting**: `%d{...} [%p] %m%n` style patterns compiled once
//!   and rendered per record
//! - **Shared appenders**: one console or file appender can serve many loggers,
//!   and every record reaches it as a single whole line
//! - **Scoped records**: [`LogScope`] collects a message and dispatches it
//!   when the scope ends, including on early return
//! - **Registry**: [`LoggerRegistry`] hands out one logger per name
//!
//! ## Example
//!
//! ```
//! use pattern_logger::prelude::*;
//! use pattern_logger::info;
//!
//! let registry = LoggerRegistry::new();
//! let logger = registry.get_logger("app");
//! logger.add_appender(AppenderHandle::new(
//!     ConsoleAppender::new().with_pattern("%c [%p] %m%n"),
//! ));
//!
//! info!(logger, "listening on port {}", 8080);
//! ```

pub mod appenders;
pub mod core;
pub mod macros;
pub mod sync;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender};
    pub use crate::core::{
        Appender, AppenderHandle, ConfigLookup, Formatter, LogEvent, LogLevel, LogScope, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, LoggerRegistry, LoggingConfig, Result,
    };
    pub use crate::sync::{ManagedThread, Mutex, Semaphore};
}

pub use appenders::{ConsoleAppender, FileAppender};
pub use core::{
    Appender, AppenderConfig, AppenderHandle, AppenderId, ConfigLookup, Formatter, LogEvent,
    LogLevel, LogScope, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    LoggerRegistry, LoggingConfig, Result, ROOT_LOGGER_NAME,
};
pub use sync::{ManagedThread, Semaphore};
