//! Connectivity monitor.
//!
//! `Checking → Connected | Error`, re-entering `Checking` on every check.
//! The monitor never retries on its own; callers decide when to probe.
//! Transitions are published on a `watch` channel so the badge can follow
//! without polling.

use corelib::ConnectivityState;
use market::HealthProbe;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

pub struct ConnectivityMonitor {
    tx: watch::Sender<ConnectivityState>,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ConnectivityState::Checking);
        Self { tx }
    }

    pub fn state(&self) -> ConnectivityState {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectivityState> {
        self.tx.subscribe()
    }

    /// Probe once and settle on `Connected` or `Error`.
    #[instrument(skip_all)]
    pub async fn check(&self, probe: &dyn HealthProbe) -> ConnectivityState {
        self.tx.send_replace(ConnectivityState::Checking);

        let next = match probe.probe().await {
            Ok(()) => ConnectivityState::Connected,
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "connectivity check failed");
                ConnectivityState::Error
            }
        };

        let prev = self.tx.send_replace(next);
        info!(from = %prev, to = %next, "connectivity state settled");

        next
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}
