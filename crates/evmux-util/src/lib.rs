// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Helpers the multiplexer's callers lean on.
//!
//! - `fd`: single-descriptor poll, non-blocking mode
//! - `time`: millisecond wall clock, timed condition wait
//! - `file`: read a small attribute file in one go
//! - `datatype`: atomic datatype sizes
//! - `caps`: capability bits and the send/recv/RMA predicates
//! - `tag`: tag-format helpers

pub mod caps;
pub mod datatype;
pub mod fd;
pub mod file;
pub mod tag;
pub mod time;

pub use caps::Caps;
pub use datatype::{datatype_size, Datatype, InvalidDatatype};
pub use fd::{poll_fd, set_nonblocking};
pub use file::read_file;
pub use time::{gettime_ms, wait_cond, WaitStatus};
