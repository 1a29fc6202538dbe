// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Buffered stream I/O for multiplexed endpoints.
//!
//! A `CommEntry` owns a connection and a ring buffer. Register the
//! connection's descriptor with an `evmux` multiplexer; when `wait`
//! reports it, call `recv` on the matching entry.
//!
//! - `ring`: power-of-two byte ring with staged writes
//! - `transport`: streams that can be peeked (TCP, Unix)
//! - `connection`: raw send/recv with disconnect tracking
//! - `entry`: buffered send/flush/recv/peek/discard

pub mod connection;
pub mod entry;
pub mod ring;
pub mod transport;

pub use connection::Connection;
pub use entry::CommEntry;
pub use ring::RingBuffer;
pub use transport::Transport;
