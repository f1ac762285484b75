//! Composition root.
//!
//! Owns one instance of every component for the lifetime of the dashboard
//! and wires the two flows:
//!
//! ```text
//! SyncScheduler tick ─▶ TickerFeed ─▶ StaleGuard ─▶ TickerStore::merge ─▶ Renderer (cards, table, last sync)
//! startup / recheck  ─▶ HealthProbe ─▶ ConnectivityMonitor ─(watch)─▶ Renderer (badge)
//! ```
//!
//! Cycles are fire-and-forget: every failure is logged and recovered inside
//! the cycle.

use std::fmt;
use std::sync::Arc;

use common::logger::{TraceId, child_span, cycle_span};
use corelib::ConnectivityState;
use market::{FeedError, HealthProbe, HttpFeedClient, StaleGuard, TickerFeed, TickerStore};
use parking_lot::Mutex;
use scheduler::{SchedulerConfig, SyncScheduler};
use tokio::task::JoinHandle;
use tracing::{Instrument, Span, debug, error, info, warn};

use crate::config::AppConfig;
use crate::connectivity::ConnectivityMonitor;
use crate::error::AppError;
use crate::render::{RenderConfig, Renderer, SurfaceSink};

/// Knobs the composition root needs from configuration.
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub render: RenderConfig,
    pub scheduler: SchedulerConfig,
    pub discard_stale_responses: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            scheduler: SchedulerConfig::default(),
            discard_stale_responses: true,
        }
    }
}

impl From<&AppConfig> for DashboardOptions {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            render: RenderConfig {
                flash: cfg.flash,
                ..RenderConfig::default()
            },
            scheduler: SchedulerConfig {
                interval: cfg.sync_interval,
            },
            discard_stale_responses: cfg.discard_stale_responses,
        }
    }
}

/// How one sync cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered,
    /// Valid but empty snapshot; current view kept.
    Empty,
    /// Body was not a sequence; warned only.
    Rejected,
    /// Transport, protocol or decode failure; placeholders got the error.
    Failed,
    /// A newer cycle already rendered.
    Stale,
}

impl CycleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleOutcome::Rendered => "rendered",
            CycleOutcome::Empty => "empty",
            CycleOutcome::Rejected => "rejected",
            CycleOutcome::Failed => "failed",
            CycleOutcome::Stale => "stale",
        }
    }
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one cycle touches. Cheap to clone into each spawned cycle.
#[derive(Clone)]
struct SyncCycle {
    feed: Arc<dyn TickerFeed>,
    store: Arc<TickerStore>,
    renderer: Arc<Renderer>,
    guard: Arc<StaleGuard>,
}

impl SyncCycle {
    async fn run(self, seq: u64) -> CycleOutcome {
        let trace_id = TraceId::new();
        let span = cycle_span(seq, &trace_id);

        async move {
            let outcome = self.execute(seq).await;
            Span::current().record("outcome", outcome.as_str());
            outcome
        }
        .instrument(span)
        .await
    }

    async fn execute(&self, seq: u64) -> CycleOutcome {
        let snapshot = match self.feed.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(FeedError::NotASequence(kind)) => {
                warn!(kind, "ticker response is not a sequence; merge skipped");
                return CycleOutcome::Rejected;
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), "ticker fetch failed");
                self.renderer
                    .show_fetch_error(&format!("failed to load data: {e}"));
                return CycleOutcome::Failed;
            }
        };

        if snapshot.is_empty() {
            warn!("empty ticker snapshot; keeping current view");
            return CycleOutcome::Empty;
        }

        if !self.guard.admit(seq) {
            debug!(latest = self.guard.latest(), "stale response discarded");
            return CycleOutcome::Stale;
        }

        let snapshot = self.store.merge(snapshot);

        self.renderer.update_cards(&snapshot);
        self.renderer.update_table(&snapshot);
        self.renderer.update_last_sync_timestamp();

        debug!(count = snapshot.len(), "cycle rendered");
        CycleOutcome::Rendered
    }
}

pub struct Dashboard {
    cycle: SyncCycle,
    probe: Arc<dyn HealthProbe>,
    monitor: Arc<ConnectivityMonitor>,
    scheduler: SyncScheduler,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Dashboard {
    pub fn new(
        feed: Arc<dyn TickerFeed>,
        probe: Arc<dyn HealthProbe>,
        sink: Arc<dyn SurfaceSink>,
        opts: DashboardOptions,
    ) -> Self {
        let cycle = SyncCycle {
            feed,
            store: Arc::new(TickerStore::new()),
            renderer: Arc::new(Renderer::new(opts.render, sink)),
            guard: Arc::new(StaleGuard::new(opts.discard_stale_responses)),
        };

        Self {
            cycle,
            probe,
            monitor: Arc::new(ConnectivityMonitor::new()),
            scheduler: SyncScheduler::new(opts.scheduler),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Dashboard backed by the HTTP ticker server described in `cfg`.
    pub fn from_config(cfg: &AppConfig, sink: Arc<dyn SurfaceSink>) -> Result<Self, AppError> {
        let client = Arc::new(HttpFeedClient::new(
            cfg.endpoints.clone(),
            cfg.http_timeout,
        )?);

        Ok(Self::new(
            client.clone(),
            client,
            sink,
            DashboardOptions::from(cfg),
        ))
    }

    /// Start the badge follower, the one-shot startup probe and the ticker
    /// loop. Must be called from within a tokio runtime. Calls after the
    /// first are ignored until `shutdown`.
    pub fn start(&self) {
        let mut tasks = self.tasks.lock();
        if !tasks.is_empty() {
            warn!("dashboard already started");
            return;
        }

        let renderer = Arc::clone(&self.cycle.renderer);
        let mut rx = self.monitor.subscribe();
        tasks.push(tokio::spawn(async move {
            renderer.update_connectivity_badge(*rx.borrow_and_update());
            while rx.changed().await.is_ok() {
                let state = *rx.borrow_and_update();
                renderer.update_connectivity_badge(state);
            }
        }));

        let monitor = Arc::clone(&self.monitor);
        let probe = Arc::clone(&self.probe);
        tasks.push(tokio::spawn(
            async move {
                monitor.check(probe.as_ref()).await;
            }
            .instrument(child_span("startup_probe")),
        ));

        let cycle = self.cycle.clone();
        tasks.push(self.scheduler.spawn(move |seq| {
            let cycle = cycle.clone();
            async move {
                cycle.run(seq).await;
            }
        }));

        info!(
            every_ms = self.scheduler.config().interval.as_millis() as u64,
            discard_stale = self.cycle.guard.is_enabled(),
            "dashboard started"
        );
    }

    /// Re-run the health probe now, re-entering `Checking`.
    pub async fn recheck_connectivity(&self) -> ConnectivityState {
        self.monitor.check(self.probe.as_ref()).await
    }

    pub fn pause(&self) {
        self.scheduler.pause();
    }

    pub fn resume(&self) {
        self.scheduler.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    /// Stop the loops. Cycles already in flight still complete.
    pub fn shutdown(&self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
        info!("dashboard stopped");
    }

    pub fn store(&self) -> &TickerStore {
        &self.cycle.store
    }

    pub fn renderer(&self) -> &Renderer {
        &self.cycle.renderer
    }

    pub fn connectivity(&self) -> ConnectivityState {
        self.monitor.state()
    }

    pub fn scheduler(&self) -> &SyncScheduler {
        &self.scheduler
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        for task in self.tasks.get_mut().drain(..) {
            task.abort();
        }
    }
}
