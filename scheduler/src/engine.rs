//! The sync scheduler.
//!
//! On every tick it:
//!   1. Checks the pause flag. A paused tick is a no-op; the timer keeps
//!      running, so resuming needs no re-arming.
//!   2. Allocates a monotonically increasing cycle sequence.
//!   3. Spawns the action for that sequence and returns to the timer
//!      immediately. Cycles are fire-and-forget and may overlap.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use super::state::SchedulerState;
use super::types::SchedulerConfig;

/// Cloneable handle; every clone controls the same loop.
#[derive(Clone, Debug)]
pub struct SyncScheduler {
    cfg: SchedulerConfig,
    state: Arc<SchedulerState>,
}

impl SyncScheduler {
    pub fn new(cfg: SchedulerConfig) -> Self {
        Self {
            cfg,
            state: Arc::new(SchedulerState::new()),
        }
    }

    pub fn config(&self) -> SchedulerConfig {
        self.cfg
    }

    pub fn pause(&self) {
        self.state.set_paused(true);
        info!("sync scheduler paused");
    }

    pub fn resume(&self) {
        self.state.set_paused(false);
        info!("sync scheduler resumed");
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Number of ticks that issued work so far.
    pub fn cycles_issued(&self) -> u64 {
        self.state.issued()
    }

    /// Start the tick loop. The first tick fires immediately.
    ///
    /// Aborting the returned handle stops future ticks; cycles already
    /// spawned run to completion.
    pub fn spawn<F, Fut>(&self, action: F) -> JoinHandle<()>
    where
        F: Fn(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        let every = self.cfg.interval;

        tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            info!(every_ms = every.as_millis() as u64, "sync scheduler started");

            loop {
                ticker.tick().await;

                if state.is_paused() {
                    debug!("tick skipped (paused)");
                    continue;
                }

                let seq = state.next_seq();
                debug!(seq, "tick issued");
                tokio::spawn(action(seq));
            }
        })
    }
}

impl Default for SyncScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}
