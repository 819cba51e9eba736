//! Counting semaphore

use parking_lot::{Condvar, Mutex};

/// A counting semaphore.
///
/// `wait` blocks until the count is positive and then decrements it; `notify`
/// increments it and wakes one waiter. There is no timeout: a `wait` with no
/// matching `notify` blocks forever.
#[derive(Debug, Default)]
pub struct Semaphore {
    count: Mutex<u32>,
    available: Condvar,
}

impl Semaphore {
    pub const fn new(count: u32) -> Self {
        Self {
            count: Mutex::new(count),
            available: Condvar::new(),
        }
    }

    pub fn wait(&self) {
        let mut count = self.count.lock();
        while *count == 0 {
            self.available.wait(&mut count);
        }
        *count -= 1;
    }

    pub fn notify(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_add(1);
        self.available.notify_one();
    }

    /// Current count. Only meaningful as a snapshot.
    pub fn count(&self) -> u32 {
        *self.count.lock()
    }
}
