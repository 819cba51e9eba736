//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Unparseable level name
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// The OS refused to start a managed thread
    #[error("Failed to spawn thread '{name}'")]
    ThreadSpawn {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A managed thread panicked before it could be joined
    #[error("Thread '{name}' panicked")]
    ThreadPanicked { name: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn thread_spawn(name: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::ThreadSpawn {
            name: name.into(),
            source,
        }
    }

    pub fn thread_panicked(name: impl Into<String>) -> Self {
        LoggerError::ThreadPanicked { name: name.into() }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }
}
