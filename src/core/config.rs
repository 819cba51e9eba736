//! Declarative logger configuration
//!
//! A [`LoggingConfig`] describes loggers and their appenders. It can be
//! deserialized from JSON or assembled from any string-keyed
//! [`ConfigLookup`], then applied to a [`LoggerRegistry`].

use super::appender::AppenderHandle;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::logger::ROOT_LOGGER_NAME;
use super::registry::LoggerRegistry;
use crate::appenders::{ConsoleAppender, FileAppender};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Lookup key for the root logger level.
pub const LEVEL_KEY: &str = "log.level";
/// Lookup key for the root logger pattern.
pub const PATTERN_KEY: &str = "log.pattern";
/// Lookup key for a file the root logger should also write to.
pub const FILE_KEY: &str = "log.file";

/// String-keyed configuration source.
pub trait ConfigLookup {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl ConfigLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Dotted keys walk nested objects: `log.file` reads `{"log": {"file": ...}}`.
/// A flat `{"log.file": ...}` entry is also accepted.
impl ConfigLookup for serde_json::Value {
    fn lookup(&self, key: &str) -> Option<String> {
        let value = self
            .get(key)
            .or_else(|| key.split('.').try_fold(self, |node, part| node.get(part)))?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AppenderConfig {
    Console {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<LogLevel>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    File {
        path: PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<LogLevel>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
}

impl AppenderConfig {
    /// Construct the appender. File paths are opened strictly so a bad path
    /// is reported here rather than silently dropping records later.
    pub fn build(&self) -> Result<AppenderHandle> {
        match self {
            AppenderConfig::Console { level, pattern } => {
                let mut appender = ConsoleAppender::with_level(level.unwrap_or(LogLevel::Debug));
                if let Some(pattern) = pattern {
                    appender = appender.with_pattern(pattern);
                }
                Ok(AppenderHandle::new(appender))
            }
            AppenderConfig::File {
                path,
                level,
                pattern,
            } => {
                let mut appender = FileAppender::open(path)
                    .map_err(|e| {
                        LoggerError::config(
                            format!("file appender '{}'", path.display()),
                            e.to_string(),
                        )
                    })?
                    .with_level(level.unwrap_or(LogLevel::Debug));
                if let Some(pattern) = pattern {
                    appender = appender.with_pattern(pattern);
                }
                Ok(AppenderHandle::new(appender))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// When present, replaces the logger's current appenders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appenders: Option<Vec<AppenderConfig>>,
}

impl LoggerConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            pattern: None,
            appenders: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for the root logger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_level: Option<LogLevel>,
    /// Pattern for the root logger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default)]
    pub loggers: Vec<LoggerConfig>,
}

impl LoggingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Root logger settings from [`LEVEL_KEY`], [`PATTERN_KEY`] and
    /// [`FILE_KEY`]. The root gets a fresh console appender, plus a file
    /// appender when a file is given, so both pick up the pattern.
    pub fn from_lookup(lookup: &dyn ConfigLookup) -> Result<Self> {
        let root_level = match lookup.lookup(LEVEL_KEY) {
            Some(level) => Some(level.parse()?),
            None => None,
        };

        let mut appenders = vec![AppenderConfig::Console {
            level: None,
            pattern: None,
        }];
        if let Some(path) = lookup.lookup(FILE_KEY) {
            appenders.push(AppenderConfig::File {
                path: PathBuf::from(path),
                level: None,
                pattern: None,
            });
        }
        let mut root = LoggerConfig::named(ROOT_LOGGER_NAME);
        root.appenders = Some(appenders);

        Ok(Self {
            root_level,
            pattern: lookup.lookup(PATTERN_KEY),
            loggers: vec![root],
        })
    }

    /// Apply to `registry`.
    ///
    /// Root settings go first, so a root entry in `loggers` can override them
    /// and appenders it lists inherit the root pattern. All appenders are
    /// built before anything is changed, so a failing entry leaves the
    /// registry as it was.
    pub fn apply(&self, registry: &LoggerRegistry) -> Result<()> {
        let mut planned = Vec::with_capacity(self.loggers.len());
        for logger in &self.loggers {
            if logger.name.trim().is_empty() {
                return Err(LoggerError::config("logger", "name must not be empty"));
            }
            let appenders = match &logger.appenders {
                Some(configs) => Some(
                    configs
                        .iter()
                        .map(AppenderConfig::build)
                        .collect::<Result<Vec<_>>>()?,
                ),
                None => None,
            };
            planned.push((logger, appenders));
        }

        let root = registry.root();
        if let Some(level) = self.root_level {
            root.set_min_level(level);
        }
        if let Some(pattern) = &self.pattern {
            root.set_pattern(pattern.as_str());
        }

        for (config, appenders) in planned {
            let logger = registry.get_logger(&config.name);
            if let Some(level) = config.level {
                logger.set_min_level(level);
            }
            if let Some(pattern) = &config.pattern {
                logger.set_pattern(pattern.as_str());
            }
            if let Some(appenders) = appenders {
                logger.clear_appenders();
                for appender in appenders {
                    logger.add_appender(appender);
                }
            }
        }
        Ok(())
    }
}

impl LoggerRegistry {
    pub fn apply_config(&self, config: &LoggingConfig) -> Result<()> {
        config.apply(self)
    }
}
