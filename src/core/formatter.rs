//! Pattern-driven formatter

use super::log_event::LogEvent;
use super::logger::Logger;
use super::pattern::{Directive, FormatStep, PatternCompiler, DEFAULT_PATTERN};
use chrono::{Local, TimeZone};
use std::fmt::Write as _;

/// Owns a pattern and its compiled steps.
///
/// Formatting is a pure function of the logger name and the event: the same
/// inputs always render the same string. A broken pattern still formats,
/// with its error markers inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    pattern: String,
    steps: Vec<FormatStep>,
    has_error: bool,
}

impl Formatter {
    pub fn new(pattern: impl Into<String>) -> Self {
        let mut formatter = Self {
            pattern: pattern.into(),
            steps: Vec::new(),
            has_error: false,
        };
        formatter.compile();
        formatter
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Replace the pattern. The whole pattern is recompiled.
    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = pattern.into();
        self.compile();
    }

    pub fn steps(&self) -> &[FormatStep] {
        &self.steps
    }

    /// Whether the pattern contained anything that compiled to an error marker.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn format(&self, logger: &Logger, event: &LogEvent) -> String {
        self.format_named(logger.name(), event)
    }

    /// Render `event` as if it were logged through a logger called `logger_name`.
    pub fn format_named(&self, logger_name: &str, event: &LogEvent) -> String {
        let mut out = String::with_capacity(self.pattern.len() + event.message().len() + 32);
        for step in &self.steps {
            match step {
                FormatStep::Literal(text) => out.push_str(text),
                FormatStep::Directive { directive, arg } => {
                    render(*directive, arg.as_deref(), logger_name, event, &mut out)
                }
            }
        }
        out
    }

    fn compile(&mut self) {
        let compiled = PatternCompiler::new(&self.pattern).run();
        compiled.report();
        self.has_error = compiled.has_error();
        self.steps = compiled.steps;
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

/// Render one directive onto `out`. If rendering fails, whatever was
/// produced is discarded and the directive's error marker is written instead.
fn render(
    directive: Directive,
    arg: Option<&str>,
    logger_name: &str,
    event: &LogEvent,
    out: &mut String,
) {
    let mut scratch = String::new();
    let rendered = match directive {
        Directive::Message => {
            out.push_str(event.message());
            return;
        }
        Directive::Level => {
            out.push_str(event.level().to_str());
            return;
        }
        Directive::LoggerName => {
            out.push_str(logger_name);
            return;
        }
        Directive::File => {
            out.push_str(event.file());
            return;
        }
        Directive::Tab => {
            out.push('\t');
            return;
        }
        Directive::NewLine => {
            out.push('\n');
            return;
        }
        Directive::Uptime => write!(scratch, "{}", event.uptime()),
        Directive::ThreadId => write!(scratch, "{}", event.thread_id()),
        Directive::FiberId => write!(scratch, "{}", event.fiber_id()),
        Directive::Line => write!(scratch, "{}", event.line()),
        Directive::Timestamp => render_time(event.time(), arg, &mut scratch),
    };

    match rendered {
        Ok(()) => out.push_str(&scratch),
        Err(_) => match arg {
            Some(arg) => {
                let _ = write!(out, "<<error_format %{}{{{}}}>>", directive.key(), arg);
            }
            None => {
                let _ = write!(out, "<<error_format %{}>>", directive.key());
            }
        },
    }
}

fn render_time(secs: i64, format: Option<&str>, out: &mut String) -> std::fmt::Result {
    let format = format.unwrap_or(super::pattern::DEFAULT_TIME_FORMAT);
    match Local.timestamp_opt(secs, 0).earliest() {
        Some(datetime) => write!(out, "{}", datetime.format(format)),
        None => write!(out, "{}", secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;

    fn event(level: LogLevel, message: &str) -> LogEvent {
        LogEvent::from_parts(level, "src/app.rs", 42, 7, 0, 1_700_000_000, 1500, message)
    }

    #[test]
    fn test_message_and_newline() {
        let formatter = Formatter::new("%m%n");
        assert_eq!(formatter.format_named("root", &event(LogLevel::Info, "hi")), "hi\n");
    }

    #[test]
    fn test_level_names() {
        let formatter = Formatter::new("%p");
        assert_eq!(formatter.format_named("root", &event(LogLevel::Warn, "")), "WARN");
        let unknown = event(LogLevel::from_u8(200), "");
        assert_eq!(formatter.format_named("root", &unknown), "UNKNOWN");
    }

    #[test]
    fn test_all_event_fields() {
        let formatter = Formatter::new("%c|%t|%F|%r|%f:%l|%d{%s}%T%m");
        let rendered = formatter.format_named("svc", &event(LogLevel::Error, "boom"));
        assert_eq!(rendered, "svc|7|0|1500|src/app.rs:42|1700000000\tboom");
    }

    #[test]
    fn test_timestamp_matches_local_time() {
        let formatter = Formatter::new("%d");
        let expected = Local
            .timestamp_opt(1_700_000_000, 0)
            .earliest()
            .unwrap()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(formatter.format_named("root", &event(LogLevel::Info, "")), expected);
    }

    #[test]
    fn test_unknown_directive_renders_marker() {
        let formatter = Formatter::new("%X %m");
        assert!(formatter.has_error());
        let rendered = formatter.format_named("root", &event(LogLevel::Info, "still here"));
        assert_eq!(rendered, "<<error_format %X>> still here");
    }

    #[test]
    fn test_unterminated_brace_renders_marker() {
        let formatter = Formatter::new("%m %d{");
        assert!(formatter.has_error());
        assert_eq!(
            formatter.format_named("root", &event(LogLevel::Info, "x")),
            "x <<pattern_error>>"
        );
    }

    #[test]
    fn test_set_pattern_recompiles() {
        let mut formatter = Formatter::new("%X");
        assert!(formatter.has_error());

        formatter.set_pattern("[%p] %m");
        assert!(!formatter.has_error());
        assert_eq!(formatter.pattern(), "[%p] %m");
        assert_eq!(
            formatter.format_named("root", &event(LogLevel::Debug, "ok")),
            "[DEBUG] ok"
        );
    }

    #[test]
    fn test_deterministic() {
        let formatter = Formatter::default();
        let e = event(LogLevel::Fatal, "same");
        assert_eq!(formatter.format_named("a", &e), formatter.format_named("a", &e));
    }

    #[test]
    fn test_default_pattern_layout() {
        let formatter = Formatter::default();
        let rendered = formatter.format_named("root", &event(LogLevel::Info, "hello"));
        assert!(rendered.ends_with("\t7\t0\t[INFO]\t(root)\t<src/app.rs:42>\thello\n"));
    }

    #[test]
    fn test_format_with_logger() {
        let logger = Logger::new("payments");
        let formatter = Formatter::new("(%c) %m");
        assert_eq!(
            formatter.format(&logger, &event(LogLevel::Info, "paid")),
            "(payments) paid"
        );
    }

    #[test]
    fn test_failed_render_writes_marker() {
        let mut out = String::from("[");
        render(
            Directive::Timestamp,
            Some("%#z"),
            "root",
            &event(LogLevel::Info, ""),
            &mut out,
        );
        assert_eq!(out, "[<<error_format %d{%#z}>>");
    }

    #[test]
    fn test_unrenderable_time_format_is_flagged() {
        let formatter = Formatter::new("%d{%#z} %m");
        assert!(formatter.has_error());
        assert_eq!(
            formatter.format_named("root", &event(LogLevel::Info, "after")),
            "<<error_format %d{%#z}>> after"
        );
    }
}
