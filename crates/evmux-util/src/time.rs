// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Clock and timed waits.

use std::sync::{Condvar, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, from the wall clock.
pub fn gettime_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// How a [`wait_cond`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    /// Woken by a notification (or spuriously).
    Notified,
    TimedOut,
}

/// Wait on `cond` for at most `timeout_ms`; negative waits forever.
///
/// Spurious wakeups are passed through as `Notified`; callers re-check
/// their predicate. A poisoned mutex is recovered rather than propagated.
pub fn wait_cond<'a, T>(
    cond: &Condvar,
    guard: MutexGuard<'a, T>,
    timeout_ms: i32,
) -> (MutexGuard<'a, T>, WaitStatus) {
    if timeout_ms < 0 {
        let guard = cond.wait(guard).unwrap_or_else(|e| e.into_inner());
        return (guard, WaitStatus::Notified);
    }

    let timeout = Duration::from_millis(timeout_ms as u64);
    let (guard, res) = cond
        .wait_timeout(guard, timeout)
        .unwrap_or_else(|e| e.into_inner());
    let status = if res.timed_out() {
        WaitStatus::TimedOut
    } else {
        WaitStatus::Notified
    };
    (guard, status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    #[test]
    fn clock_is_monotone_enough() {
        let a = gettime_ms();
        std::thread::sleep(Duration::from_millis(5));
        let b = gettime_ms();
        assert!(b >= a + 4, "{a} -> {b}");
        // Somewhere after 2020.
        assert!(a > 1_577_836_800_000);
    }

    #[test]
    fn bounded_wait_times_out() {
        let pair = (Mutex::new(false), Condvar::new());
        let start = Instant::now();
        let guard = pair.0.lock().unwrap();
        let (guard, status) = wait_cond(&pair.1, guard, 20);
        assert!(!*guard);
        assert_eq!(status, WaitStatus::TimedOut);
        assert!(start.elapsed() >= Duration::from_millis(19));
    }

    #[test]
    fn notified_before_deadline() {
        let pair = Arc::new((Mutex::new(false), Condvar::new()));
        let remote = Arc::clone(&pair);
        let t = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(10));
            *remote.0.lock().unwrap() = true;
            remote.1.notify_one();
        });

        let mut guard = pair.0.lock().unwrap();
        while !*guard {
            let (g, status) = wait_cond(&pair.1, guard, 5_000);
            guard = g;
            assert_eq!(status, WaitStatus::Notified);
        }
        drop(guard);
        t.join().unwrap();
    }

    #[test]
    fn unbounded_wait_returns_on_notify() {
        let pair = Arc::new((Mutex::new(0u32), Condvar::new()));
        let remote = Arc::clone(&pair);
        let t = std::thread::spawn(move || {
            *remote.0.lock().unwrap() = 7;
            remote.1.notify_all();
        });

        let mut guard = pair.0.lock().unwrap();
        while *guard == 0 {
            guard = wait_cond(&pair.1, guard, -1).0;
        }
        assert_eq!(*guard, 7);
        drop(guard);
        t.join().unwrap();
    }
}
