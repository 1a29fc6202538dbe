// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Descriptor readiness multiplexer.
//!
//! Maps descriptors to caller contexts and reports, one per call, which
//! registered descriptor has pending input. Two backends share the
//! [`Multiplexer`] interface and one is picked at startup:
//!
//! - `emulated`: `poll(2)` over a growable dense array, with a round-robin
//!   cursor so no descriptor starves under sustained load
//! - `native`: epoll, on Linux
//! - `config`: backend choice, from code or `EVMUX_BACKEND`
//! - `poller`: the configuration-selected `Poller`
//! - `timeout`: millisecond timeout convention for `wait`
//!
//! Single-threaded: nothing here locks. Callers serialize access.

pub mod config;
pub mod emulated;
pub mod error;
pub mod multiplexer;
#[cfg(target_os = "linux")]
pub mod native;
pub mod poller;
pub mod timeout;

pub use config::{Backend, MuxConfig};
pub use emulated::PollSet;
pub use error::{Error, Result};
pub use multiplexer::{close, Multiplexer};
#[cfg(target_os = "linux")]
pub use native::EpollSet;
pub use poller::Poller;
