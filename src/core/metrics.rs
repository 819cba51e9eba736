//! Logger metrics for observability
//!
//! Counters describing what a logger did with the events that passed its level.

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-logger dispatch counters.
///
/// # Example
///
/// ```
/// use pattern_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_appender_failure();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.appender_failures(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Events that passed the logger level and were fanned out
    dispatched: AtomicU64,

    /// Appender calls that returned an error or panicked
    appender_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            appender_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn appender_failures(&self) -> u64 {
        self.appender_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_appender_failure(&self) {
        self.appender_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.appender_failures.store(0, Ordering::Relaxed);
    }
}
