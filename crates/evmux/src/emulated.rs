// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Emulated multiplexer over `poll(2)`.
//!
//! Used where no scalable readiness facility exists. Registrations live in
//! two dense parallel arrays (pollfds and contexts) that grow in fixed
//! steps and never shrink. Removal swaps the last entry into the hole.
//!
//! `poll(2)` examines every descriptor in one call but can report many at
//! once. `wait` hands back one context per call and resumes scanning after
//! the last reported slot, so a busy low-numbered slot can't starve the
//! others.

use std::io;
use std::os::unix::io::RawFd;

use crate::error::{Error, Result};
use crate::multiplexer::Multiplexer;

/// Slots added each time storage runs out.
pub const GROWTH_STEP: usize = 64;

/// `poll(2)`-backed multiplexer with a round-robin resumption cursor.
pub struct PollSet<T> {
    fds: Vec<libc::pollfd>,
    contexts: Vec<T>,
    /// Allocated slots. Only grows.
    capacity: usize,
    /// Where the next scan starts. Always `< len()` when non-empty.
    cursor: usize,
}

impl<T> PollSet<T> {
    /// Create an empty set. No storage is allocated until the first `add`.
    pub fn new() -> Self {
        Self {
            fds: Vec::new(),
            contexts: Vec::new(),
            capacity: 0,
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn contains(&self, fd: RawFd) -> bool {
        self.position(fd).is_some()
    }

    fn position(&self, fd: RawFd) -> Option<usize> {
        self.fds.iter().position(|p| p.fd == fd)
    }

    /// Make room for one more registration, touching nothing on failure.
    fn reserve_slot(&mut self) -> Result<()> {
        if self.fds.len() < self.capacity {
            return Ok(());
        }
        let target = self.capacity + GROWTH_STEP;
        // Reserve both arrays before recording the new capacity. If the
        // second reservation fails the first only has spare room, which
        // is not observable.
        self.fds.try_reserve_exact(target - self.fds.len())?;
        self.contexts.try_reserve_exact(target - self.contexts.len())?;
        tracing::debug!(old = self.capacity, new = target, "grew poll set");
        self.capacity = target;
        Ok(())
    }

    /// Index of the first slot with reported events, scanning from the
    /// cursor to the end and then from the start up to the cursor.
    fn next_ready(&self) -> Option<usize> {
        let n = self.fds.len();
        (self.cursor..n)
            .chain(0..self.cursor)
            .find(|&i| self.fds[i].revents != 0)
    }
}

impl<T> Default for PollSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Multiplexer<T> for PollSet<T> {
    /// Register `fd` for read-readiness.
    ///
    /// Registering a descriptor that is already present is not detected;
    /// it is then watched through two slots and `remove` drops the first.
    fn add(&mut self, fd: RawFd, context: T) -> Result<()> {
        self.reserve_slot()?;
        self.fds.push(libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        });
        self.contexts.push(context);
        tracing::trace!(fd, slot = self.fds.len() - 1, "registered");
        Ok(())
    }

    fn remove(&mut self, fd: RawFd) -> Result<T> {
        let slot = self.position(fd).ok_or(Error::NotFound(fd))?;
        self.fds.swap_remove(slot);
        let context = self.contexts.swap_remove(slot);
        if self.cursor >= self.fds.len() {
            self.cursor = 0;
        }
        tracing::trace!(fd, slot, cursor = self.cursor, "unregistered");
        Ok(context)
    }

    fn wait(&mut self, timeout_ms: i32) -> Result<Option<&T>> {
        for p in &mut self.fds {
            p.revents = 0;
        }
        let ret = unsafe {
            libc::poll(
                self.fds.as_mut_ptr(),
                self.fds.len() as libc::nfds_t,
                timeout_ms,
            )
        };
        if ret < 0 {
            return Err(Error::Poll(io::Error::last_os_error()));
        }
        if ret == 0 {
            return Ok(None);
        }

        let Some(slot) = self.next_ready() else {
            return Ok(None);
        };
        self.cursor = (slot + 1) % self.fds.len();
        tracing::trace!(fd = self.fds[slot].fd, slot, cursor = self.cursor, "ready");
        Ok(Some(&self.contexts[slot]))
    }

    fn len(&self) -> usize {
        self.fds.len()
    }
}
