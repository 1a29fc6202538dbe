// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Endpoint capability bits and what they permit.
//!
//! Each predicate follows the same shape: the primary capability (message
//! or RMA/atomic) must be present; an explicit bit for the asked-about
//! direction allows it; a bit for only the opposite direction denies it;
//! no direction bits at all means both directions are allowed.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Caps: u64 {
        const MSG = 1 << 1;
        const RMA = 1 << 2;
        const TAGGED = 1 << 3;
        const ATOMICS = 1 << 4;
        const READ = 1 << 8;
        const WRITE = 1 << 9;
        const RECV = 1 << 10;
        const SEND = 1 << 11;
        const REMOTE_READ = 1 << 12;
        const REMOTE_WRITE = 1 << 13;
    }
}

impl Caps {
    fn directional(self, primary: Caps, this_way: Caps, other_way: Caps) -> bool {
        if !self.intersects(primary) {
            return false;
        }
        if self.intersects(this_way) {
            return true;
        }
        !self.intersects(other_way)
    }

    /// May this endpoint send messages (untagged or tagged)?
    pub fn send_allowed(self) -> bool {
        self.directional(Caps::MSG | Caps::TAGGED, Caps::SEND, Caps::RECV)
    }

    /// May this endpoint receive messages?
    pub fn recv_allowed(self) -> bool {
        self.directional(Caps::MSG | Caps::TAGGED, Caps::RECV, Caps::SEND)
    }

    /// May this endpoint initiate RMA or atomic operations?
    pub fn rma_initiate_allowed(self) -> bool {
        self.directional(
            Caps::RMA | Caps::ATOMICS,
            Caps::READ | Caps::WRITE,
            Caps::REMOTE_READ | Caps::REMOTE_WRITE,
        )
    }

    /// May this endpoint be the target of RMA or atomic operations?
    pub fn rma_target_allowed(self) -> bool {
        self.directional(
            Caps::RMA | Caps::ATOMICS,
            Caps::REMOTE_READ | Caps::REMOTE_WRITE,
            Caps::READ | Caps::WRITE,
        )
    }
}
