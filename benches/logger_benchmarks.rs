//! Criterion benchmarks for pattern_logger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pattern_logger::core::pattern::{PatternCompiler, DEFAULT_PATTERN};
use pattern_logger::prelude::*;
use std::sync::Arc;

/// Renders every record and throws the text away.
struct NullAppender {
    formatter: Option<Formatter>,
}

impl Appender for NullAppender {
    fn min_level(&self) -> LogLevel {
        LogLevel::Debug
    }

    fn set_min_level(&mut self, _level: LogLevel) {}

    fn formatter(&self) -> Option<&Formatter> {
        self.formatter.as_ref()
    }

    fn set_formatter(&mut self, formatter: Formatter) {
        self.formatter = Some(formatter);
    }

    fn write(&mut self, formatted: &str) -> Result<()> {
        black_box(formatted);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn null_logger(pattern: &str) -> Logger {
    Logger::builder()
        .name("bench")
        .pattern(pattern)
        .appender(AppenderHandle::new(NullAppender { formatter: None }))
        .build()
}

// ============================================================================
// Pattern Compilation Benchmarks
// ============================================================================

fn bench_pattern_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_compile");
    group.throughput(Throughput::Elements(1));

    for (label, pattern) in [
        ("message_only", "%m%n"),
        ("default", DEFAULT_PATTERN),
        ("literal_heavy", "request handled by worker %t in %r ms for client: %m%n"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), pattern, |b, pattern| {
            b.iter(|| black_box(PatternCompiler::new(black_box(pattern)).run()));
        });
    }

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    group.throughput(Throughput::Elements(1));

    let event = LogEvent::capture(LogLevel::Info, file!(), line!())
        .with_message("Benchmark message with some content");

    for (label, pattern) in [
        ("message_only", "%m%n"),
        ("default", DEFAULT_PATTERN),
        ("epoch_seconds", "%d{%s} [%p] %m%n"),
    ] {
        let formatter = Formatter::new(pattern);
        group.bench_function(label, |b| {
            b.iter(|| black_box(formatter.format_named("bench", black_box(&event))));
        });
    }

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let logger = null_logger("%d [%p] %c %m%n");

    group.bench_function("macro_info", |b| {
        b.iter(|| {
            pattern_logger::info!(logger, "Processing item {}", black_box(42));
        });
    });

    group.bench_function("prebuilt_event", |b| {
        let event = LogEvent::capture(LogLevel::Info, file!(), line!()).with_message("prebuilt");
        b.iter(|| logger.dispatch(black_box(&event)));
    });

    group.bench_function("event_capture", |b| {
        b.iter(|| black_box(LogEvent::capture(LogLevel::Info, file!(), line!())));
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = null_logger("%m");
    logger.set_min_level(LogLevel::Error);

    group.bench_function("filtered_out", |b| {
        b.iter(|| {
            pattern_logger::debug!(logger, "Filtered message {}", black_box(1));
        });
    });

    group.bench_function("passed_through", |b| {
        b.iter(|| {
            pattern_logger::error!(logger, "Passed message {}", black_box(1));
        });
    });

    group.finish();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let logger = Arc::new(null_logger("%t %m%n"));

    group.bench_function("multi_thread_4", |b| {
        b.iter(|| {
            let mut threads: Vec<ManagedThread> = (0..4)
                .map(|i| {
                    let logger = Arc::clone(&logger);
                    ManagedThread::spawn(format!("bench_{}", i), move || {
                        for n in 0..100 {
                            pattern_logger::info!(logger, "Concurrent message {}", n);
                        }
                    })
                    .unwrap()
                })
                .collect();

            for thread in &mut threads {
                thread.join().unwrap();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Registry Benchmarks
// ============================================================================

fn bench_registry_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    group.throughput(Throughput::Elements(1));

    let registry = LoggerRegistry::with_root(Logger::new("root"));
    for i in 0..64 {
        registry.get_logger(&format!("svc.{}", i));
    }

    group.bench_function("existing", |b| {
        b.iter(|| black_box(registry.get_logger(black_box("svc.17"))));
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_pattern_compile,
    bench_format,
    bench_logging,
    bench_level_filtering,
    bench_concurrent_logging,
    bench_registry_lookup
);

criterion_main!(benches);
