// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Several buffered endpoints served from one multiplexer.

use std::io::Write;
use std::net::Shutdown;
use std::os::unix::io::AsRawFd;
use std::os::unix::net::UnixStream;

use evmux::{Backend, Multiplexer, MuxConfig, Poller};
use evmux_comm::{CommEntry, Connection};

struct Peer {
    entry: CommEntry<UnixStream>,
    remote: UnixStream,
}

fn peers(n: usize) -> Vec<Peer> {
    (0..n)
        .map(|_| {
            let (local, remote) = UnixStream::pair().unwrap();
            evmux_util::set_nonblocking(local.as_raw_fd()).unwrap();
            Peer {
                entry: CommEntry::new(Connection::new(local), 256, 64),
                remote,
            }
        })
        .collect()
}

fn serve(backend: Backend) {
    let mut peers = peers(3);
    let mut mux = Poller::new(&MuxConfig::new(backend)).unwrap();
    for (i, p) in peers.iter().enumerate() {
        mux.add(p.entry.as_raw_fd(), i).unwrap();
    }

    for (i, p) in peers.iter_mut().enumerate() {
        write!(p.remote, "msg{i}").unwrap();
        p.entry.begin_transfer(4);
    }

    let mut received = vec![String::new(); peers.len()];
    while received.iter().any(|s| s.len() < 4) {
        let Some(&i) = mux.wait(1_000).unwrap() else {
            panic!("{backend}: timed out with {received:?}");
        };
        let mut buf = [0u8; 4];
        let n = peers[i].entry.recv(&mut buf).unwrap();
        peers[i].entry.advance(n);
        received[i].push_str(std::str::from_utf8(&buf[..n]).unwrap());
    }
    assert_eq!(received, ["msg0", "msg1", "msg2"]);

    // Nothing left on any socket.
    assert!(mux.wait(0).unwrap().is_none(), "{backend}");

    // A hangup is reported as readiness and shows up as a disconnect.
    peers[1].remote.shutdown(Shutdown::Both).unwrap();
    assert_eq!(mux.wait(1_000).unwrap(), Some(&1), "{backend}");
    peers[1].entry.begin_transfer(4);
    let mut buf = [0u8; 4];
    assert_eq!(peers[1].entry.recv(&mut buf).unwrap(), 0);
    assert!(peers[1].entry.connection().is_disconnected());

    assert_eq!(mux.remove(peers[1].entry.as_raw_fd()).unwrap(), 1);
    assert!(mux.wait(0).unwrap().is_none(), "{backend}");
    mux.close();
}

#[test]
fn serve_emulated() {
    serve(Backend::Emulated);
}

#[test]
fn serve_native() {
    serve(Backend::Native);
}
