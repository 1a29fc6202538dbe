// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! A connected endpoint and its raw send/recv paths.

use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, RawFd};

use crate::transport::Transport;

/// A connected stream, plus whether the peer has gone away.
pub struct Connection<S> {
    stream: S,
    disconnected: bool,
}

impl<S: Transport> Connection<S> {
    /// Wrap a connected stream. It should already be non-blocking.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            disconnected: false,
        }
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Write what the socket will take now. A full socket is 0 bytes,
    /// not an error.
    pub fn send_raw(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.stream.write(buf) {
            Ok(n) => {
                if n > 0 {
                    tracing::debug!(fd = self.fd(), n, "wrote to network");
                }
                Ok(n)
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Read what the socket has now. End of stream marks the connection
    /// disconnected and reads 0; so does an empty non-blocking socket,
    /// without the mark.
    pub fn recv_raw(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.stream.read(buf) {
            Ok(0) => {
                self.mark_disconnected();
                Ok(0)
            }
            Ok(n) => {
                tracing::debug!(fd = self.fd(), n, "read from network");
                Ok(n)
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Look at pending bytes without consuming them.
    pub fn peek(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.stream.peek(buf) {
            Ok(0) => {
                self.mark_disconnected();
                Ok(0)
            }
            Ok(n) => {
                tracing::debug!(fd = self.fd(), n, "peek from network");
                Ok(n)
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn mark_disconnected(&mut self) {
        if !self.disconnected {
            tracing::debug!(fd = self.fd(), "peer disconnected");
        }
        self.disconnected = true;
    }

    fn fd(&self) -> RawFd {
        self.stream.as_raw_fd()
    }
}

impl<S: AsRawFd> AsRawFd for Connection<S> {
    fn as_raw_fd(&self) -> RawFd {
        self.stream.as_raw_fd()
    }
}
