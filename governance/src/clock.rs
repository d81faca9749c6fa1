//! Source of the authoritative current time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use vaultgov_types::Timestamp;

/// The authoritative "now" for stage and commit decisions.
///
/// Implementations must be monotonic non-decreasing between calls.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
///
/// Never reports a time earlier than one it already returned: if the system
/// clock steps backwards, the last reading is repeated until it catches up.
#[derive(Debug, Default)]
pub struct SystemClock {
    latest: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn observe(&self, secs: u64) -> Timestamp {
        let previous = self.latest.fetch_max(secs, Ordering::SeqCst);
        Timestamp::new(previous.max(secs))
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A system clock set before 1970 reads as the epoch.
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.observe(secs)
    }
}
