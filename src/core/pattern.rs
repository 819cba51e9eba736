//! Pattern compiler
//!
//! Turns a printf-style layout such as `%d{%H:%M:%S} [%p] %m%n` into an ordered
//! list of [`FormatStep`]s. Compilation never fails: unknown directives and
//! unterminated `{...}` arguments compile to visible error markers so a bad
//! pattern degrades output instead of aborting.
//!
//! | key | renders |
//! |-----|---------|
//! | `m` | message |
//! | `p` | level name |
//! | `r` | uptime in milliseconds |
//! | `c` | logger name |
//! | `t` | thread id |
//! | `F` | fiber id |
//! | `d{fmt}` | local timestamp via strftime `fmt` (default `%Y-%m-%d %H:%M:%S`) |
//! | `f` | source file |
//! | `l` | source line |
//! | `T` | tab |
//! | `n` | newline |

use chrono::format::{Item, StrftimeItems};
use chrono::{TimeZone, Utc};
use std::fmt::{self, Write as _};

/// Layout used when none is configured.
pub const DEFAULT_PATTERN: &str = "%d{%Y-%m-%d %H:%M:%S}%T%t%T%F%T[%p]%T(%c)%T<%f:%l>%T%m%n";

/// Timestamp layout for a bare `%d`.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Emitted in place of everything after an unterminated `{`.
pub const PATTERN_ERROR_MARKER: &str = "<<pattern_error>>";

/// A renderable directive. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Message,
    Level,
    Uptime,
    LoggerName,
    ThreadId,
    FiberId,
    Timestamp,
    File,
    Line,
    Tab,
    NewLine,
}

impl Directive {
    /// Directive keys as they appear after `%`.
    pub const TABLE: [(&'static str, Directive); 11] = [
        ("m", Directive::Message),
        ("p", Directive::Level),
        ("r", Directive::Uptime),
        ("c", Directive::LoggerName),
        ("t", Directive::ThreadId),
        ("F", Directive::FiberId),
        ("d", Directive::Timestamp),
        ("f", Directive::File),
        ("l", Directive::Line),
        ("T", Directive::Tab),
        ("n", Directive::NewLine),
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, directive)| *directive)
    }

    pub fn key(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, directive)| *directive == self)
            .map(|(key, _)| *key)
            .unwrap_or("")
    }
}

/// One compiled unit of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatStep {
    /// Text copied to the output verbatim.
    Literal(String),
    /// Dynamic content. `arg` is the text between `{` and `}`, if any.
    Directive {
        directive: Directive,
        arg: Option<String>,
    },
}

/// A problem found while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    UnknownDirective(String),
    Unterminated { pattern: String, rest: String },
    InvalidTimeFormat(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::UnknownDirective(key) => write!(f, "unknown directive '%{}'", key),
            PatternError::Unterminated { pattern, rest } => {
                write!(f, "pattern parse error: {} - {}", pattern, rest)
            }
            PatternError::InvalidTimeFormat(format) => {
                write!(f, "invalid timestamp format '{}'", format)
            }
        }
    }
}

/// Result of compiling a pattern: the steps plus everything that went wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledPattern {
    pub steps: Vec<FormatStep>,
    pub errors: Vec<PatternError>,
}

impl CompiledPattern {
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Write each error once to the operator error channel (stderr).
    pub fn report(&self) {
        for error in &self.errors {
            eprintln!("[LOGGER ERROR] {}", error);
        }
    }
}

/// Compile `pattern` and report any errors to stderr.
pub fn compile(pattern: &str) -> Vec<FormatStep> {
    let compiled = PatternCompiler::new(pattern).run();
    compiled.report();
    compiled.steps
}

/// Single-pass, left-to-right scanner over a pattern string.
pub struct PatternCompiler<'a> {
    pattern: &'a str,
    literal: String,
    compiled: CompiledPattern,
}

impl<'a> PatternCompiler<'a> {
    pub fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            literal: String::new(),
            compiled: CompiledPattern::default(),
        }
    }

    /// Compile without reporting. Callers decide what to do with `errors`.
    pub fn run(mut self) -> CompiledPattern {
        let pattern = self.pattern;
        let mut pos = 0;

        while pos < pattern.len() {
            let rest = &pattern[pos..];
            let Some(offset) = rest.find('%') else {
                self.literal.push_str(rest);
                break;
            };
            self.literal.push_str(&rest[..offset]);

            let percent = pos + offset;
            let key_start = percent + 1;
            let key_len = pattern[key_start..]
                .bytes()
                .take_while(u8::is_ascii_alphabetic)
                .count();
            let key = &pattern[key_start..key_start + key_len];
            let mut next = key_start + key_len;

            let mut arg = None;
            if pattern[next..].starts_with('{') {
                let arg_start = next + 1;
                match pattern[arg_start..].find('}') {
                    Some(len) => {
                        arg = Some(&pattern[arg_start..arg_start + len]);
                        next = arg_start + len + 1;
                    }
                    None => {
                        self.flush_literal();
                        self.compiled
                            .steps
                            .push(FormatStep::Literal(PATTERN_ERROR_MARKER.to_string()));
                        self.compiled.errors.push(PatternError::Unterminated {
                            pattern: pattern.to_string(),
                            rest: pattern[percent..].to_string(),
                        });
                        return self.compiled;
                    }
                }
            }

            self.flush_literal();
            self.push_directive(key, arg);
            pos = next;
        }

        self.flush_literal();
        self.compiled
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            let text = std::mem::take(&mut self.literal);
            self.compiled.steps.push(FormatStep::Literal(text));
        }
    }

    fn push_directive(&mut self, key: &str, arg: Option<&str>) {
        let Some(directive) = Directive::from_key(key) else {
            self.compiled
                .steps
                .push(FormatStep::Literal(format!("<<error_format %{}>>", key)));
            self.compiled
                .errors
                .push(PatternError::UnknownDirective(key.to_string()));
            return;
        };

        let arg = match directive {
            Directive::Timestamp => {
                let format = arg.filter(|a| !a.is_empty()).unwrap_or(DEFAULT_TIME_FORMAT);
                if !is_renderable_time_format(format) {
                    self.compiled
                        .steps
                        .push(FormatStep::Literal(format!("<<error_format %d{{{}}}>>", format)));
                    self.compiled
                        .errors
                        .push(PatternError::InvalidTimeFormat(format.to_string()));
                    return;
                }
                Some(format.to_string())
            }
            _ => arg.map(str::to_string),
        };

        self.compiled
            .steps
            .push(FormatStep::Directive { directive, arg });
    }
}

/// Whether chrono both parses `format` and can render it. Some templates
/// parse cleanly but fail at render time (`%#z`), so a sample date is
/// rendered as well.
pub fn is_renderable_time_format(format: &str) -> bool {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let Some(sample) = Utc.timestamp_opt(0, 0).single() else {
        return false;
    };
    let mut scratch = String::new();
    write!(scratch, "{}", sample.format(format)).is_ok()
}
