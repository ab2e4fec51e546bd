//! Output mutex
//!
//! The console is the one resource both channel controllers share. It lives
//! inside an async mutex, so the only way to write to it is through the
//! guard returned by [`OutputMutex::acquire`]. Dropping the guard releases
//! the mutex on every path out of the holder's scope.

use core::ops::{Deref, DerefMut};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};

pub struct OutputMutex<M: RawMutex, W> {
    console: Mutex<M, W>,
}

/// Exclusive access to the console, held until dropped
pub struct ConsoleGuard<'a, M: RawMutex, W> {
    guard: MutexGuard<'a, M, W>,
}

impl<M: RawMutex, W> OutputMutex<M, W> {
    pub const fn new(console: W) -> Self {
        Self {
            console: Mutex::new(console),
        }
    }

    /// Wait, without timeout, until no other task holds the console
    pub async fn acquire(&self) -> ConsoleGuard<'_, M, W> {
        ConsoleGuard {
            guard: self.console.lock().await,
        }
    }

    /// Take the console only if it is free right now
    pub fn try_acquire(&self) -> Option<ConsoleGuard<'_, M, W>> {
        self.console.try_lock().ok().map(|guard| ConsoleGuard { guard })
    }
}

impl<M: RawMutex, W> Deref for ConsoleGuard<'_, M, W> {
    type Target = W;

    fn deref(&self) -> &W {
        &self.guard
    }
}

impl<M: RawMutex, W> DerefMut for ConsoleGuard<'_, M, W> {
    fn deref_mut(&mut self) -> &mut W {
        &mut self.guard
    }
}
