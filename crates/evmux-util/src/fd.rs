// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Descriptor helpers.

use std::io;
use std::os::unix::io::RawFd;

/// Wait up to `timeout_ms` for `fd` to become readable.
///
/// Returns `Ok(true)` when `poll(2)` reports activity (input, hangup or an
/// error condition) and `Ok(false)` on timeout. Negative timeouts block.
pub fn poll_fd(fd: RawFd, timeout_ms: i32) -> io::Result<bool> {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let ret = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(ret > 0)
}

/// Set a file descriptor to non-blocking mode.
pub fn set_nonblocking(fd: RawFd) -> io::Result<()> {
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if flags < 0 {
        return Err(io::Error::last_os_error());
    }
    let ret = unsafe { libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
