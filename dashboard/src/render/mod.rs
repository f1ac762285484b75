//! Renderer: turns store snapshots and connectivity state into update
//! instructions against the named slots of a `SurfaceSink`.

pub mod config;
pub mod headless;
pub mod sink;
pub mod terminal;
pub mod views;

use std::collections::HashMap;
use std::sync::Arc;

use corelib::{ConnectivityState, TickerReading};
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::format::{
    change_class, format_change_percent, format_clock_now, format_price, format_time,
    format_volume,
};

pub use config::RenderConfig;
pub use headless::HeadlessSink;
pub use sink::SurfaceSink;
pub use terminal::TerminalSink;
pub use views::{BadgeView, CardView, TableRow, Tone};

/// What a pinned card currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotContent {
    /// Initial "loading" state.
    Placeholder,
    Error,
    Data,
}

pub struct Renderer {
    cfg: RenderConfig,
    sink: Arc<dyn SurfaceSink>,
    slots: Mutex<HashMap<String, SlotContent>>,
}

impl Renderer {
    pub fn new(cfg: RenderConfig, sink: Arc<dyn SurfaceSink>) -> Self {
        let slots = cfg
            .slots()
            .into_iter()
            .map(|slot| (slot, SlotContent::Placeholder))
            .collect();

        Self {
            cfg,
            sink,
            slots: Mutex::new(slots),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    pub fn slot_content(&self, slot: &str) -> Option<SlotContent> {
        self.slots.lock().get(slot).copied()
    }

    /// Write every pinned reading of `snapshot` into its card and flash it.
    /// Readings without a card are skipped.
    #[instrument(skip_all, fields(count = snapshot.len()), level = "debug")]
    pub fn update_cards(&self, snapshot: &[TickerReading]) {
        for reading in snapshot {
            let Some(slot) = self.cfg.slot_for(&reading.identity()) else {
                continue;
            };

            let card = CardView {
                price: format_price(reading.price),
                change: format!("{}%", format_change_percent(reading.change_percent)),
                class: change_class(reading.change_percent),
            };

            self.sink.render_card(slot, &card);
            self.slots.lock().insert(slot.to_string(), SlotContent::Data);
            self.flash(slot);
        }
    }

    /// Replace the table with one row per reading, in snapshot order.
    #[instrument(skip_all, fields(count = snapshot.len()), level = "debug")]
    pub fn update_table(&self, snapshot: &[TickerReading]) {
        let rows: Vec<TableRow> = snapshot.iter().map(|r| self.table_row(r)).collect();
        self.sink.render_table(&rows);
    }

    fn table_row(&self, r: &TickerReading) -> TableRow {
        TableRow {
            exchange: r.exchange.to_uppercase(),
            exchange_tone: self.cfg.exchange_tone(&r.exchange),
            symbol: r.symbol.clone(),
            price: format_price(r.price),
            change: format!("{}%", format_change_percent(r.change_percent)),
            class: change_class(r.change_percent),
            high: format_price(r.high_price),
            low: format_price(r.low_price),
            volume: format_volume(r.volume),
            time: format_time(r.timestamp),
        }
    }

    pub fn update_connectivity_badge(&self, state: ConnectivityState) {
        self.sink.render_badge(&BadgeView::for_state(state));
    }

    /// Stamp the "last updated" label with the current wall-clock time.
    pub fn update_last_sync_timestamp(&self) {
        self.sink.render_last_sync(&format_clock_now());
    }

    /// Overlay `message` on cards still showing their placeholder. Cards with
    /// data, or already showing an error, are left alone.
    pub fn show_fetch_error(&self, message: &str) {
        let mut overlaid: Vec<String> = {
            let mut slots = self.slots.lock();
            slots
                .iter_mut()
                .filter(|(_, content)| **content == SlotContent::Placeholder)
                .map(|(slot, content)| {
                    *content = SlotContent::Error;
                    slot.clone()
                })
                .collect()
        };

        if overlaid.is_empty() {
            return;
        }

        overlaid.sort();
        debug!(slots = ?overlaid, "error overlaid on placeholder cards");
        self.sink.render_card_errors(&overlaid, message);
    }

    /// Emphasize `slot` and revert after the configured delay on a detached
    /// task. Never awaited by the caller.
    fn flash(&self, slot: &str) {
        self.sink.set_card_flash(slot, true);

        let sink = Arc::clone(&self.sink);
        let slot = slot.to_string();
        let delay = self.cfg.flash;

        match tokio::runtime::Handle::try_current() {
            Ok(rt) => {
                rt.spawn(async move {
                    tokio::time::sleep(delay).await;
                    sink.set_card_flash(&slot, false);
                });
            }
            Err(_) => sink.set_card_flash(&slot, false),
        }
    }
}
