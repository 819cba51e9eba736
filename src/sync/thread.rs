//! Named OS threads with a start-up handshake

use super::semaphore::Semaphore;
use crate::core::error::{LoggerError, Result};
use crate::core::platform::{os_thread_name, Platform, SystemPlatform, UNNAMED_THREAD};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Shared between the creator and the new thread for the start-up handshake.
struct Startup {
    id: AtomicU64,
    ready: Semaphore,
}

/// An OS thread with a display name and a known id.
///
/// Construction blocks until the new thread has recorded its own id, so
/// [`ManagedThread::id`] is valid as soon as [`ManagedThread::spawn`] returns.
/// Dropping an unjoined thread detaches it; it keeps running to completion.
pub struct ManagedThread {
    id: u64,
    name: String,
    handle: Option<JoinHandle<()>>,
}

impl ManagedThread {
    /// Start `callback` on a new thread called `name`.
    ///
    /// An empty name becomes `"UNKNOWN"`. The OS-visible name is truncated to
    /// 15 bytes; [`ManagedThread::name`] and [`ManagedThread::current_name`]
    /// keep the full display name.
    pub fn spawn<F>(name: impl Into<String>, callback: F) -> Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut name = name.into();
        if name.is_empty() {
            name = UNNAMED_THREAD.to_string();
        }

        let startup = Arc::new(Startup {
            id: AtomicU64::new(0),
            ready: Semaphore::new(0),
        });
        let thread_startup = Arc::clone(&startup);
        let display_name = name.clone();

        let handle = thread::Builder::new()
            .name(os_thread_name(&name).to_string())
            .spawn(move || {
                let platform = SystemPlatform;
                platform.set_thread_name(&display_name);
                thread_startup
                    .id
                    .store(platform.current_thread_id(), Ordering::Release);
                thread_startup.ready.notify();
                drop(thread_startup);

                callback();
            })
            .map_err(|e| LoggerError::thread_spawn(name.clone(), e))?;

        startup.ready.wait();

        Ok(Self {
            id: startup.id.load(Ordering::Acquire),
            name,
            handle: Some(handle),
        })
    }

    /// Id of the spawned thread, as [`Platform::current_thread_id`] reports it
    /// from inside that thread.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_joined(&self) -> bool {
        self.handle.is_none()
    }

    /// Block until the thread finishes. Joining twice is a no-op.
    ///
    /// Returns [`LoggerError::ThreadPanicked`] if the callback panicked.
    pub fn join(&mut self) -> Result<()> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| LoggerError::thread_panicked(self.name.clone())),
            None => Ok(()),
        }
    }

    /// Display name of the calling thread.
    pub fn current_name() -> String {
        SystemPlatform.current_thread_name()
    }

    /// Name a thread that was not started through `ManagedThread`, such as `main`.
    pub fn set_current_name(name: &str) {
        SystemPlatform.set_thread_name(name);
    }

    /// Id of the calling thread.
    pub fn current_id() -> u64 {
        SystemPlatform.current_thread_id()
    }
}

impl std::fmt::Debug for ManagedThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedThread")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("joined", &self.is_joined())
            .finish()
    }
}
