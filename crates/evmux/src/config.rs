// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Backend selection.
//!
//! The backend is picked once, when the multiplexer is created:
//! - `Native`: epoll, on Linux
//! - `Emulated`: `poll(2)` with a round-robin scan, everywhere else
//!
//! `EVMUX_BACKEND=poll|epoll` overrides detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Environment variable consulted by [`Backend::from_env`].
pub const BACKEND_ENV: &str = "EVMUX_BACKEND";

/// Which readiness facility a multiplexer is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// `poll(2)` over a dense descriptor array.
    Emulated,
    /// The platform's scalable facility (epoll).
    Native,
}

impl Backend {
    /// The best backend this target supports.
    pub fn detect() -> Self {
        if cfg!(target_os = "linux") {
            Self::Native
        } else {
            Self::Emulated
        }
    }

    /// Read `EVMUX_BACKEND`, falling back to [`Backend::detect`] when it is
    /// unset or unparseable.
    pub fn from_env() -> Self {
        std::env::var(BACKEND_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Self::detect)
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emulated => write!(f, "poll"),
            Self::Native => write!(f, "epoll"),
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "poll" | "emulated" => Ok(Self::Emulated),
            "epoll" | "native" => Ok(Self::Native),
            _ => Err(Error::InvalidBackend(s.to_string())),
        }
    }
}

/// Multiplexer construction settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuxConfig {
    #[serde(default)]
    pub backend: Backend,
}

impl MuxConfig {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub fn from_env() -> Self {
        Self {
            backend: Backend::from_env(),
        }
    }
}
