// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Native multiplexer backed by epoll (Linux).
//!
//! Level-triggered, read interest only. The kernel keeps the interest set;
//! we keep the fd → context map. `epoll_wait` is asked for one event per
//! call. For level-triggered entries the kernel requeues a reported fd at
//! the tail of its ready list, so repeated waits rotate through every
//! ready descriptor.

use std::collections::HashMap;
use std::io;
use std::os::unix::io::RawFd;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::multiplexer::Multiplexer;

/// epoll-backed multiplexer.
pub struct EpollSet<T> {
    epoll_fd: RawFd,
    contexts: HashMap<RawFd, T>,
}

impl<T> EpollSet<T> {
    /// Create a new epoll instance.
    pub fn new() -> Result<Self> {
        let epoll_fd = unsafe { libc::epoll_create1(libc::EPOLL_CLOEXEC) };
        if epoll_fd < 0 {
            return Err(Error::Create(io::Error::last_os_error()));
        }
        Ok(Self {
            epoll_fd,
            contexts: HashMap::new(),
        })
    }

    pub fn contains(&self, fd: RawFd) -> bool {
        self.contexts.contains_key(&fd)
    }
}

impl<T> Multiplexer<T> for EpollSet<T> {
    /// Register `fd` for read-readiness. A descriptor that is already
    /// registered is rejected by the kernel with `EEXIST`.
    fn add(&mut self, fd: RawFd, context: T) -> Result<()> {
        self.contexts.try_reserve(1)?;

        let mut ev = libc::epoll_event {
            events: libc::EPOLLIN as u32,
            u64: fd as u64,
        };
        let ret = unsafe { libc::epoll_ctl(self.epoll_fd, libc::EPOLL_CTL_ADD, fd, &mut ev) };
        if ret < 0 {
            return Err(Error::Register {
                fd,
                source: io::Error::last_os_error(),
            });
        }

        self.contexts.insert(fd, context);
        tracing::trace!(fd, "registered");
        Ok(())
    }

    fn remove(&mut self, fd: RawFd) -> Result<T> {
        if !self.contexts.contains_key(&fd) {
            return Err(Error::NotFound(fd));
        }
        let ret = unsafe {
            libc::epoll_ctl(self.epoll_fd, libc::EPOLL_CTL_DEL, fd, std::ptr::null_mut())
        };
        if ret < 0 {
            if let Some(source) = deregister_error(io::Error::last_os_error()) {
                return Err(Error::Deregister { fd, source });
            }
        }
        let context = self.contexts.remove(&fd).ok_or(Error::NotFound(fd))?;
        tracing::trace!(fd, "unregistered");
        Ok(context)
    }

    /// Waits for one registered descriptor to become readable.
    ///
    /// The kernel can hold an entry whose fd number was closed while a
    /// duplicate kept the file open; removing such an fd fails with `EBADF`
    /// or `ENOENT` and the entry stays. Those reports are skipped. Once the
    /// timeout is used up, a full rotation of unknown reports ends the wait
    /// with `None`. A blocking wait (`-1`) keeps waiting, and spins while
    /// only such entries are ready.
    fn wait(&mut self, timeout_ms: i32) -> Result<Option<&T>> {
        let start = Instant::now();
        let mut first_unknown = None;
        loop {
            let remaining = remaining_ms(timeout_ms, start);
            let mut event = libc::epoll_event { events: 0, u64: 0 };
            let n = unsafe { libc::epoll_wait(self.epoll_fd, &mut event, 1, remaining) };
            if n < 0 {
                return Err(Error::Poll(io::Error::last_os_error()));
            }
            if n == 0 {
                return Ok(None);
            }

            let fd = event.u64 as RawFd;
            if self.contexts.contains_key(&fd) {
                tracing::trace!(fd, "ready");
                return Ok(self.contexts.get(&fd));
            }
            tracing::trace!(fd, "skipping unknown epoll entry");
            if remaining == 0 {
                match first_unknown {
                    Some(first) if first == fd => return Ok(None),
                    Some(_) => {}
                    None => first_unknown = Some(fd),
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.contexts.len()
    }
}

impl<T> Drop for EpollSet<T> {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.epoll_fd);
        }
    }
}

/// `EPOLL_CTL_DEL` failures worth reporting. `ENOENT` and `EBADF` mean
/// the kernel already dropped the entry because the fd was closed.
fn deregister_error(err: io::Error) -> Option<io::Error> {
    match err.raw_os_error() {
        Some(libc::ENOENT) | Some(libc::EBADF) => None,
        _ => Some(err),
    }
}

/// Milliseconds left of `timeout_ms` since `start`. Negative (infinite)
/// and zero timeouts pass through unchanged.
fn remaining_ms(timeout_ms: i32, start: Instant) -> i32 {
    if timeout_ms <= 0 {
        return timeout_ms;
    }
    let elapsed = start.elapsed().as_millis();
    (timeout_ms as u128).saturating_sub(elapsed) as i32
}
