// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Timeout conversion for `wait`.
//!
//! `wait` takes milliseconds as an `i32`: negative blocks indefinitely,
//! zero polls without blocking, positive bounds the wait.

use std::time::Duration;

/// Block until a descriptor is ready or a signal interrupts the wait.
pub const INFINITE: i32 = -1;

/// Return immediately whether or not anything is ready.
pub const NONBLOCKING: i32 = 0;

/// Convert an optional duration into a `wait` timeout.
///
/// `None` blocks forever. Durations longer than `i32::MAX` milliseconds
/// saturate. A non-zero duration below one millisecond rounds up to 1 so
/// it never turns into a non-blocking poll.
pub fn timeout_ms(timeout: Option<Duration>) -> i32 {
    let Some(d) = timeout else {
        return INFINITE;
    };
    if d.is_zero() {
        return NONBLOCKING;
    }
    let ms = d.as_millis().max(1);
    i32::try_from(ms).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_blocks_forever() {
        assert_eq!(timeout_ms(None), INFINITE);
    }

    #[test]
    fn zero_is_nonblocking() {
        assert_eq!(timeout_ms(Some(Duration::ZERO)), NONBLOCKING);
    }

    #[test]
    fn sub_millisecond_rounds_up() {
        assert_eq!(timeout_ms(Some(Duration::from_micros(10))), 1);
        assert_eq!(timeout_ms(Some(Duration::from_millis(250))), 250);
    }

    #[test]
    fn huge_durations_saturate() {
        assert_eq!(timeout_ms(Some(Duration::from_secs(u64::MAX / 2))), i32::MAX);
    }
}
