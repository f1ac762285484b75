use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Drops responses that resolve after a newer cycle already rendered.
///
/// Each cycle carries the sequence number its tick was issued with. A
/// response is admitted only if its sequence is above every sequence
/// admitted before it. When disabled, every response is admitted and the
/// last one to arrive wins.
#[derive(Debug)]
pub struct StaleGuard {
    enabled: AtomicBool,
    applied: AtomicU64,
}

impl StaleGuard {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            applied: AtomicU64::new(0),
        }
    }

    pub fn admit(&self, seq: u64) -> bool {
        let prev = self.applied.fetch_max(seq, Ordering::AcqRel);
        !self.enabled.load(Ordering::Acquire) || seq > prev
    }

    /// Highest sequence admitted so far (0 before the first cycle).
    pub fn latest(&self) -> u64 {
        self.applied.load(Ordering::Acquire)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl Default for StaleGuard {
    fn default() -> Self {
        Self::new(true)
    }
}
