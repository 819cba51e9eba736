//! Concurrency primitives used by the logging core

pub mod mutex;
pub mod semaphore;
pub mod thread;

pub use mutex::{Mutex, MutexGuard};
pub use semaphore::Semaphore;
pub use thread::ManagedThread;
