// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Reading small attribute files (sysfs-style: one value, one line).

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read `dir/file` into `buf` with a single `read`, returning the length.
///
/// At most `buf.len()` bytes are read; longer files are truncated. One
/// trailing newline is dropped from the count.
pub fn read_file(dir: impl AsRef<Path>, file: &str, buf: &mut [u8]) -> io::Result<usize> {
    let path = dir.as_ref().join(file);
    let mut f = File::open(path)?;
    let mut len = f.read(buf)?;
    if len > 0 && buf[len - 1] == b'\n' {
        len -= 1;
    }
    Ok(len)
}
