// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Stream endpoints a [`Connection`](crate::Connection) can run over.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::os::unix::io::AsRawFd;
use std::os::unix::net::UnixStream;

/// A connected, byte-oriented endpoint with a descriptor the multiplexer
/// can watch.
pub trait Transport: Read + Write + AsRawFd {
    /// Read without consuming.
    fn peek(&self, buf: &mut [u8]) -> io::Result<usize>;
}

impl Transport for TcpStream {
    fn peek(&self, buf: &mut [u8]) -> io::Result<usize> {
        TcpStream::peek(self, buf)
    }
}

impl Transport for UnixStream {
    fn peek(&self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe {
            libc::recv(
                self.as_raw_fd(),
                buf.as_mut_ptr() as *mut libc::c_void,
                buf.len(),
                libc::MSG_PEEK,
            )
        };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_peek_leaves_data_in_place() {
        let (mut a, mut b) = UnixStream::pair().unwrap();
        a.write_all(b"peekaboo").unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(Transport::peek(&b, &mut buf).unwrap(), 4);
        assert_eq!(&buf, b"peek");

        let mut all = [0u8; 8];
        b.read_exact(&mut all).unwrap();
        assert_eq!(&all, b"peekaboo");
    }

    #[test]
    fn tcp_peek_leaves_data_in_place() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let mut client = TcpStream::connect(listener.local_addr().unwrap()).unwrap();
        let (mut server, _) = listener.accept().unwrap();
        client.write_all(b"hello").unwrap();

        let mut buf = [0u8; 5];
        assert_eq!(Transport::peek(&server, &mut buf).unwrap(), 5);
        let mut again = [0u8; 5];
        server.read_exact(&mut again).unwrap();
        assert_eq!(buf, again);
    }
}
