// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The interface shared by every multiplexer backend.

use std::os::unix::io::RawFd;

use crate::error::Result;

/// Maps descriptors to caller contexts and reports which one is ready.
///
/// Interest is read-readiness only and level-triggered: a descriptor stays
/// reportable for as long as it has pending input. Each `wait` reports at
/// most one context; further ready descriptors show up on later calls.
///
/// Implementations are single-threaded and not reentrant. Callers
/// serialize all operations themselves.
pub trait Multiplexer<T> {
    /// Start watching `fd` and associate `context` with it.
    fn add(&mut self, fd: RawFd, context: T) -> Result<()>;

    /// Stop watching `fd` and hand its context back.
    fn remove(&mut self, fd: RawFd) -> Result<T>;

    /// Wait up to `timeout_ms` for a registered descriptor to become ready.
    ///
    /// Returns `Ok(None)` on timeout. See [`crate::timeout`] for the
    /// timeout convention.
    fn wait(&mut self, timeout_ms: i32) -> Result<Option<&T>>;

    /// Number of registered descriptors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release the multiplexer and everything it owns, contexts included.
    fn close(self)
    where
        Self: Sized,
    {
        drop(self);
    }
}

/// Close a multiplexer that may not exist. `None` is a no-op.
pub fn close<T, M: Multiplexer<T>>(mux: Option<M>) {
    if let Some(mux) = mux {
        mux.close();
    }
}
