//! Shared types used by the scheduler subsystem.

use std::time::Duration;

/// Cadence of the recurring ticker action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Fixed period between ticks. No backoff is ever applied; the cadence
    /// itself is the retry mechanism.
    pub interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3_000),
        }
    }
}
