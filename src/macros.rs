//! Logging macros for ergonomic log message formatting.
//!
//! These macros capture the call site (`file!()`/`line!()`), format the
//! message like `format!` and dispatch it through a [`LogScope`](crate::LogScope).
//! Nothing is formatted when the logger's level filters the record out.
//!
//! # Examples
//!
//! ```
//! use pattern_logger::prelude::*;
//! use pattern_logger::info;
//!
//! let logger = Logger::new("app");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// `$logger` may be a `Logger`, a reference to one, or an `Arc<Logger>`.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use pattern_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.is_enabled(level) {
            let mut scope = $crate::LogScope::new(
                logger,
                $crate::LogEvent::capture(level, file!(), line!()),
            );
            let _ = ::std::fmt::Write::write_fmt(&mut scope, format_args!($($arg)+));
        }
    }};
}

/// Open a [`LogScope`](crate::LogScope) at the call site. The scope
/// dispatches when it goes out of scope.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// use pattern_logger::log_scope;
/// use std::fmt::Write;
///
/// let logger = Logger::new("app");
/// {
///     let mut scope = log_scope!(logger, LogLevel::Info);
///     write!(scope, "loaded {} rows", 12).unwrap();
///     write!(scope, " in {}ms", 3).unwrap();
/// }
/// ```
#[macro_export]
macro_rules! log_scope {
    ($logger:expr, $level:expr) => {
        $crate::LogScope::new(&$logger, $crate::LogEvent::capture($level, file!(), line!()))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use pattern_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use pattern_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use pattern_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use pattern_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use pattern_logger::prelude::*;
/// # let logger = Logger::new("app");
/// use pattern_logger::fatal;
/// fatal!(logger, "Critical system failure");
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
