// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Configuration-selected multiplexer.

use std::os::unix::io::RawFd;

use crate::config::{Backend, MuxConfig};
use crate::emulated::PollSet;
use crate::error::Result;
use crate::multiplexer::Multiplexer;
#[cfg(target_os = "linux")]
use crate::native::EpollSet;

/// A multiplexer whose backend was chosen when it was created.
pub enum Poller<T> {
    Emulated(PollSet<T>),
    #[cfg(target_os = "linux")]
    Native(EpollSet<T>),
}

impl<T> Poller<T> {
    /// Build the backend named by `config`.
    ///
    /// Asking for `Native` where there is no native facility falls back to
    /// the emulated backend.
    pub fn new(config: &MuxConfig) -> Result<Self> {
        let poller = match config.backend {
            Backend::Emulated => Self::Emulated(PollSet::new()),
            #[cfg(target_os = "linux")]
            Backend::Native => Self::Native(EpollSet::new()?),
            #[cfg(not(target_os = "linux"))]
            Backend::Native => {
                tracing::warn!("no native readiness facility on this target, using poll");
                Self::Emulated(PollSet::new())
            }
        };
        tracing::debug!(backend = %poller.backend(), "created multiplexer");
        Ok(poller)
    }

    /// Build the backend named by `EVMUX_BACKEND`, or the detected default.
    pub fn from_env() -> Result<Self> {
        Self::new(&MuxConfig::from_env())
    }

    pub fn backend(&self) -> Backend {
        match self {
            Self::Emulated(_) => Backend::Emulated,
            #[cfg(target_os = "linux")]
            Self::Native(_) => Backend::Native,
        }
    }
}

impl<T> Multiplexer<T> for Poller<T> {
    fn add(&mut self, fd: RawFd, context: T) -> Result<()> {
        match self {
            Self::Emulated(m) => m.add(fd, context),
            #[cfg(target_os = "linux")]
            Self::Native(m) => m.add(fd, context),
        }
    }

    fn remove(&mut self, fd: RawFd) -> Result<T> {
        match self {
            Self::Emulated(m) => m.remove(fd),
            #[cfg(target_os = "linux")]
            Self::Native(m) => m.remove(fd),
        }
    }

    fn wait(&mut self, timeout_ms: i32) -> Result<Option<&T>> {
        match self {
            Self::Emulated(m) => m.wait(timeout_ms),
            #[cfg(target_os = "linux")]
            Self::Native(m) => m.wait(timeout_ms),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Emulated(m) => m.len(),
            #[cfg(target_os = "linux")]
            Self::Native(m) => m.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emulated_on_request() {
        let poller: Poller<u8> = Poller::new(&MuxConfig::new(Backend::Emulated)).unwrap();
        assert_eq!(poller.backend(), Backend::Emulated);
    }

    #[test]
    fn native_on_request() {
        let poller: Poller<u8> = Poller::new(&MuxConfig::new(Backend::Native)).unwrap();
        if cfg!(target_os = "linux") {
            assert_eq!(poller.backend(), Backend::Native);
        } else {
            assert_eq!(poller.backend(), Backend::Emulated);
        }
    }

    #[test]
    fn dispatch_reaches_backend() {
        for backend in [Backend::Emulated, Backend::Native] {
            let mut poller: Poller<()> = Poller::new(&MuxConfig::new(backend)).unwrap();
            assert!(poller.wait(0).unwrap().is_none());
            assert!(poller.remove(99).is_err());
            assert!(poller.is_empty());
            poller.close();
        }
    }
}
