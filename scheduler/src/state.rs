//! Internal scheduler state, shared between the tick loop and its handles.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct SchedulerState {
    paused: AtomicBool,
    /// Sequence of the last tick that issued work.
    issued: AtomicU64,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Release);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Allocate the sequence for a tick that performs work. Starts at 1.
    pub fn next_seq(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Acquire)
    }
}
