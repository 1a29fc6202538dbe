// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Per-transfer buffered I/O.
//!
//! Small sends are coalesced in a ring buffer and pushed out by `flush`;
//! sends larger than the cache size go straight to the socket once the
//! buffer has drained. Receives mirror that: small reads are served from a
//! buffer refilled in one socket read, large reads bypass it.

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

use crate::connection::Connection;
use crate::ring::RingBuffer;
use crate::transport::Transport;

pub struct CommEntry<S> {
    conn: Connection<S>,
    comm_buf: RingBuffer,
    cache_size: usize,
    /// Bytes still expected for the current segment; 0 when unknown.
    rem: usize,
    total_len: usize,
    done_len: usize,
}

impl<S: Transport> CommEntry<S> {
    /// `buf_size` sizes the ring (rounded up to a power of two);
    /// `cache_size` is the largest message that goes through it.
    pub fn new(conn: Connection<S>, buf_size: usize, cache_size: usize) -> Self {
        Self {
            conn,
            comm_buf: RingBuffer::new(buf_size),
            cache_size,
            rem: 0,
            total_len: 0,
            done_len: 0,
        }
    }

    pub fn connection(&self) -> &Connection<S> {
        &self.conn
    }

    /// Start a receive of `total_len` bytes.
    pub fn begin_transfer(&mut self, total_len: usize) {
        self.total_len = total_len;
        self.done_len = 0;
        self.rem = 0;
    }

    /// Record `n` bytes of the current transfer as handled.
    pub fn advance(&mut self, n: usize) {
        self.done_len = (self.done_len + n).min(self.total_len);
    }

    /// Bound the next buffered refill to `rem` bytes (0 clears the bound).
    pub fn set_remaining(&mut self, rem: usize) {
        self.rem = rem;
    }

    /// Queue `buf` for sending. Returns how many bytes were accepted,
    /// which may be 0 when the socket and buffer are both full.
    pub fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.len() > self.cache_size {
            let used = self.comm_buf.used();
            if self.flush()? == used {
                return self.conn.send_raw(buf);
            }
            return Ok(0);
        }

        if self.comm_buf.avail() < buf.len() && self.flush()? == 0 {
            return Ok(0);
        }

        let n = self.comm_buf.write(buf);
        self.comm_buf.commit();
        tracing::debug!(fd = self.conn.as_raw_fd(), n, "buffered");
        Ok(n)
    }

    /// Push buffered bytes to the socket: the contiguous tail first, then
    /// the wrapped head if the tail went out whole.
    pub fn flush(&mut self) -> io::Result<usize> {
        let (tail, head) = self.comm_buf.readable();
        let tail_len = tail.len();
        let sent = self.conn.send_raw(tail)?;
        let mut total = sent;
        if sent == tail_len && !head.is_empty() {
            total += self.conn.send_raw(head)?;
        }
        self.comm_buf.consume(total);
        Ok(total)
    }

    /// Everything queued has reached the socket.
    pub fn tx_done(&self) -> bool {
        self.comm_buf.is_empty()
    }

    /// Receive into `buf`. Returns 0 when nothing is available yet or the
    /// peer disconnected; check [`Connection::is_disconnected`].
    pub fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.comm_buf.is_empty() {
            if buf.len() > self.cache_size {
                return self.conn.recv_raw(buf);
            }
            self.refill()?;
        }

        let n = self.comm_buf.read(buf);
        tracing::debug!(fd = self.conn.as_raw_fd(), n, "read from buffer");
        Ok(n)
    }

    /// Peek at the socket, bypassing the buffer.
    pub fn peek(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.conn.peek(buf)
    }

    /// Receive and drop up to `len` bytes.
    pub fn discard(&mut self, len: usize) -> io::Result<usize> {
        let mut scratch = vec![0u8; len];
        self.recv(&mut scratch)
    }

    /// Refill the empty buffer with one socket read, never reading past
    /// the current segment or transfer.
    fn refill(&mut self) -> io::Result<()> {
        debug_assert!(self.comm_buf.is_empty());
        self.comm_buf.reset();
        let max_read = if self.rem > 0 {
            self.rem
        } else {
            self.total_len - self.done_len
        };
        let spare = self.comm_buf.spare_mut();
        let want = max_read.min(spare.len());
        let n = self.conn.recv_raw(&mut spare[..want])?;
        self.comm_buf.advance_write(n);
        self.comm_buf.commit();
        Ok(())
    }
}

impl<S: AsRawFd> AsRawFd for CommEntry<S> {
    fn as_raw_fd(&self) -> RawFd {
        self.conn.as_raw_fd()
    }
}
