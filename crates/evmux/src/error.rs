// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Multiplexer errors.

use std::collections::TryReserveError;
use std::io;
use std::os::unix::io::RawFd;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by multiplexer operations.
///
/// Every error goes straight back to the caller. Nothing is retried or
/// logged on the way out.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to grow registration storage: {0}")]
    Alloc(#[from] TryReserveError),

    #[error("descriptor {0} is not registered")]
    NotFound(RawFd),

    #[error("readiness wait failed: {0}")]
    Poll(#[source] io::Error),

    #[error("failed to register descriptor {fd}: {source}")]
    Register {
        fd: RawFd,
        #[source]
        source: io::Error,
    },

    #[error("failed to unregister descriptor {fd}: {source}")]
    Deregister {
        fd: RawFd,
        #[source]
        source: io::Error,
    },

    #[error("failed to create readiness object: {0}")]
    Create(#[source] io::Error),

    #[error("invalid backend '{0}'; valid options are 'poll' and 'epoll'")]
    InvalidBackend(String),
}

impl Error {
    /// True when the underlying wait was cut short by a signal (`EINTR`).
    ///
    /// The multiplexer never retries; callers that want retry-on-interrupt
    /// check this and call `wait` again.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Error::Poll(e) if e.kind() == io::ErrorKind::Interrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupted_only_for_poll_errors() {
        let eintr = || io::Error::from_raw_os_error(libc::EINTR);
        assert!(Error::Poll(eintr()).is_interrupted());
        assert!(!Error::Create(eintr()).is_interrupted());
        assert!(!Error::Poll(io::Error::from_raw_os_error(libc::EBADF)).is_interrupted());
        assert!(!Error::NotFound(3).is_interrupted());
    }

    #[test]
    fn messages_name_the_descriptor() {
        assert_eq!(Error::NotFound(7).to_string(), "descriptor 7 is not registered");
        let err = Error::Register {
            fd: 9,
            source: io::Error::from_raw_os_error(libc::EEXIST),
        };
        assert!(err.to_string().starts_with("failed to register descriptor 9"));
        let err = Error::Deregister {
            fd: 4,
            source: io::Error::from_raw_os_error(libc::ENOMEM),
        };
        assert!(err.to_string().starts_with("failed to unregister descriptor 4"));
        assert!(!err.is_interrupted());
    }
}
