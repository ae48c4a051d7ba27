use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// An instant on the animation timeline, in (fractional) seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub f64);

impl Timestamp {
    /// Build a timestamp from seconds.
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Build a timestamp from milliseconds.
    pub fn from_ms(ms: f64) -> Self {
        Self(ms / 1000.0)
    }

    /// Seconds value of this timestamp.
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Milliseconds value of this timestamp.
    pub fn ms(self) -> f64 {
        self.0 * 1000.0
    }

    /// Shift by `ms` milliseconds (negative values move backwards).
    pub fn add_ms(self, ms: f64) -> Self {
        Self(self.0 + ms / 1000.0)
    }

    /// Signed seconds elapsed from `earlier` to `self`.
    pub fn elapsed_since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }
}

/// Source of "now" for the operations that do not take an explicit instant.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Timestamp;
}

/// Wall clock: seconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A clock set before 1970 reads as the epoch.
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Timestamp(secs)
    }
}

/// Manually driven clock. Clones share the same instant, so a test can keep one handle and
/// advance time for a value that owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// A clock starting at `t = 0`.
    pub fn new() -> Self {
        Self::starting_at(Timestamp(0.0))
    }

    /// A clock starting at `start`.
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.0.to_bits())),
        }
    }

    /// Jump to `t`. Moving backwards is allowed; reads may then fail with a time-travel error.
    pub fn set(&self, t: Timestamp) {
        self.bits.store(t.0.to_bits(), Ordering::SeqCst);
    }

    /// Move forward by `ms` milliseconds.
    pub fn advance_ms(&self, ms: f64) {
        self.set(self.now().add_ms(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(f64::from_bits(self.bits.load(Ordering::SeqCst)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
