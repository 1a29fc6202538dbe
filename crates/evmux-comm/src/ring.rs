// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Byte ring buffer with staged writes.
//!
//! Read and write counters only ever increase; positions are the counters
//! masked by the power-of-two size. Writes land at `wpos` and become
//! visible to readers on `commit`, which publishes `wpos` as `wcnt`.

pub struct RingBuffer {
    buf: Box<[u8]>,
    mask: usize,
    /// Bytes consumed so far.
    rcnt: usize,
    /// Bytes published so far.
    wcnt: usize,
    /// Bytes written so far, published or not.
    wpos: usize,
}

impl RingBuffer {
    /// Buffer holding at least `size` bytes (rounded up to a power of two).
    pub fn new(size: usize) -> Self {
        let size = size.max(1).next_power_of_two();
        Self {
            buf: vec![0; size].into_boxed_slice(),
            mask: size - 1,
            rcnt: 0,
            wcnt: 0,
            wpos: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.buf.len()
    }

    /// Published bytes not yet read.
    pub fn used(&self) -> usize {
        self.wcnt - self.rcnt
    }

    pub fn avail(&self) -> usize {
        self.size() - self.used()
    }

    pub fn is_empty(&self) -> bool {
        self.wcnt == self.rcnt
    }

    /// Forget all content and rewind every counter.
    pub fn reset(&mut self) {
        self.rcnt = 0;
        self.wcnt = 0;
        self.wpos = 0;
    }

    /// Stage as much of `data` as fits after any earlier staged bytes and
    /// return how many bytes were taken. Unread data is never overwritten.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let free = self.size() - (self.wpos - self.rcnt);
        let data = &data[..data.len().min(free)];
        let start = self.wpos & self.mask;
        let first = data.len().min(self.size() - start);
        self.buf[start..start + first].copy_from_slice(&data[..first]);
        self.buf[..data.len() - first].copy_from_slice(&data[first..]);
        self.wpos += data.len();
        data.len()
    }

    /// Publish everything staged so far.
    pub fn commit(&mut self) {
        self.wcnt = self.wpos;
    }

    /// Contiguous free region starting at the write position.
    pub fn spare_mut(&mut self) -> &mut [u8] {
        let start = self.wpos & self.mask;
        let end = (start + self.size() - (self.wpos - self.rcnt)).min(self.size());
        &mut self.buf[start..end]
    }

    /// Mark `n` bytes of [`spare_mut`](Self::spare_mut) as staged.
    pub fn advance_write(&mut self, n: usize) {
        self.wpos += n;
    }

    /// Published bytes as (tail, wrapped head).
    pub fn readable(&self) -> (&[u8], &[u8]) {
        let start = self.rcnt & self.mask;
        let len = self.used();
        let first = len.min(self.size() - start);
        (&self.buf[start..start + first], &self.buf[..len - first])
    }

    /// Drop `n` published bytes from the front.
    pub fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.used());
        self.rcnt += n;
    }

    /// Copy up to `out.len()` published bytes out, consume them, and
    /// return how many were copied.
    pub fn read(&mut self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.used());
        let (tail, head) = self.readable();
        let first = n.min(tail.len());
        out[..first].copy_from_slice(&tail[..first]);
        out[first..n].copy_from_slice(&head[..n - first]);
        self.consume(n);
        n
    }
}
