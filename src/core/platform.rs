//! Process, thread and clock identity used when capturing events
//!
//! The pipeline never queries the OS directly. Everything it needs to know
//! about "where am I running and when" goes through [`Platform`], so tests can
//! substitute a fixed source and the default stays a thin wrapper over `std`.

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Display name used for threads that were never named.
pub const UNNAMED_THREAD: &str = "UNKNOWN";

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);
static PROCESS_START: OnceLock<Instant> = OnceLock::new();

thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<u64>> = const { RefCell::new(None) };
    static THREAD_NAME: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Identity and clock queries the logging core depends on.
pub trait Platform: Send + Sync {
    /// Numeric id of the calling thread, stable for the thread's lifetime.
    fn current_thread_id(&self) -> u64;

    /// Record a display name for the calling thread.
    fn set_thread_name(&self, name: &str);

    /// Display name of the calling thread.
    fn current_thread_name(&self) -> String;

    /// Id of the cooperative execution context. There are no fibers here.
    fn fiber_id(&self) -> u32 {
        0
    }

    /// Milliseconds since the logging core was first used in this process.
    fn uptime_millis(&self) -> u64;

    /// Wall-clock seconds since the Unix epoch.
    fn unix_time(&self) -> i64;
}

/// The default [`Platform`] backed by `std`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPlatform;

impl SystemPlatform {
    /// Pin the uptime origin. Called by registry construction so `%r` counts
    /// from process start-up rather than the first log call.
    pub fn mark_start() {
        PROCESS_START.get_or_init(Instant::now);
    }
}

impl Platform for SystemPlatform {
    fn current_thread_id(&self) -> u64 {
        THREAD_ID_CACHE.with(|cache| {
            *cache
                .borrow_mut()
                .get_or_insert_with(|| NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed))
        })
    }

    fn set_thread_name(&self, name: &str) {
        let name = if name.is_empty() { UNNAMED_THREAD } else { name };
        THREAD_NAME.with(|slot| *slot.borrow_mut() = Some(name.to_string()));
    }

    fn current_thread_name(&self) -> String {
        THREAD_NAME.with(|slot| {
            slot.borrow()
                .clone()
                .or_else(|| std::thread::current().name().map(String::from))
                .unwrap_or_else(|| UNNAMED_THREAD.to_string())
        })
    }

    fn uptime_millis(&self) -> u64 {
        let start = PROCESS_START.get_or_init(Instant::now);
        u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn unix_time(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
            Err(before) => -i64::try_from(before.duration().as_secs()).unwrap_or(i64::MAX),
        }
    }
}

/// Truncate a thread name to what the OS will accept (15 bytes plus the
/// terminator on Linux), never splitting a UTF-8 character. The OS name also
/// ends at the first NUL byte.
pub fn os_thread_name(name: &str) -> &str {
    const MAX_OS_NAME: usize = 15;
    let name = name.split('\0').next().unwrap_or_default();
    if name.len() <= MAX_OS_NAME {
        return name;
    }
    let mut end = MAX_OS_NAME;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}
