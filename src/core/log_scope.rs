//! Scoped log builder
//!
//! A [`LogScope`] owns one [`LogEvent`] and the logger it belongs to. The call
//! site writes the message into the scope; when the scope ends, by falling
//! off the end, an early `return`, `?`, or unwinding, the event is handed to
//! the logger. It is dispatched exactly once.

use super::log_event::LogEvent;
use super::logger::Logger;
use std::fmt;

#[must_use = "a scope dispatches when dropped; binding it to `_` drops it immediately"]
pub struct LogScope<'a> {
    logger: &'a Logger,
    event: Option<LogEvent>,
}

impl<'a> LogScope<'a> {
    pub fn new(logger: &'a Logger, event: LogEvent) -> Self {
        Self {
            logger,
            event: Some(event),
        }
    }

    /// The message accumulator.
    pub fn stream(&mut self) -> &mut String {
        match self.event.as_mut() {
            Some(event) => event.stream(),
            // `event` is only taken by `finish`/`drop`, which consume the scope.
            None => unreachable!("log scope used after dispatch"),
        }
    }

    /// The event being built.
    pub fn event(&self) -> &LogEvent {
        match self.event.as_ref() {
            Some(event) => event,
            None => unreachable!("log scope used after dispatch"),
        }
    }

    /// End the scope now instead of at the end of the enclosing block.
    pub fn finish(mut self) {
        self.dispatch();
    }

    fn dispatch(&mut self) {
        if let Some(event) = self.event.take() {
            self.logger.log(event.level(), &event);
        }
    }
}

impl fmt::Write for LogScope<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.stream().push_str(s);
        Ok(())
    }
}

impl Drop for LogScope<'_> {
    fn drop(&mut self) {
        self.dispatch();
    }
}
