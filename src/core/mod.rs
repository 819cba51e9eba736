//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_event;
pub mod log_level;
pub mod log_scope;
pub mod logger;
pub mod metrics;
pub mod pattern;
pub mod platform;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use appender::{Appender, AppenderHandle, AppenderId};
pub use config::{AppenderConfig, ConfigLookup, LoggerConfig, LoggingConfig};
pub use error::{LoggerError, Result};
pub use formatter::Formatter;
pub use log_event::LogEvent;
pub use log_level::LogLevel;
pub use log_scope::LogScope;
pub use logger::{Logger, LoggerBuilder, ROOT_LOGGER_NAME};
pub use metrics::LoggerMetrics;
pub use pattern::{
    CompiledPattern, Directive, FormatStep, PatternCompiler, PatternError, DEFAULT_PATTERN,
    DEFAULT_TIME_FORMAT,
};
pub use platform::{Platform, SystemPlatform};
pub use registry::LoggerRegistry;
