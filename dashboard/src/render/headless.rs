use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use super::sink::SurfaceSink;
use super::views::{BadgeView, CardView, TableRow};

/// In-memory surface that records every instruction. Used by tests and by
/// embedders that inspect state instead of drawing it.
#[derive(Default)]
pub struct HeadlessSink {
    /// `None` means every card slot exists.
    card_slots: Option<HashSet<String>>,
    state: Mutex<HeadlessState>,
}

#[derive(Debug, Default, Clone)]
pub struct HeadlessState {
    pub cards: HashMap<String, CardView>,
    pub card_errors: HashMap<String, String>,
    /// Cards that received an error, counted per card.
    pub error_renders: usize,
    /// Calls to `render_card_errors`.
    pub error_batches: usize,
    pub flashing: HashSet<String>,
    pub flash_count: HashMap<String, usize>,
    pub rows: Vec<TableRow>,
    pub table_renders: usize,
    pub badges: Vec<BadgeView>,
    pub last_sync: Option<String>,
}

impl HeadlessSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host page variant that only has the given card slots.
    pub fn with_card_slots<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            card_slots: Some(slots.into_iter().map(Into::into).collect()),
            state: Mutex::default(),
        }
    }

    fn has_card(&self, slot: &str) -> bool {
        self.card_slots.as_ref().is_none_or(|s| s.contains(slot))
    }

    pub fn state(&self) -> HeadlessState {
        self.state.lock().clone()
    }

    pub fn card(&self, slot: &str) -> Option<CardView> {
        self.state.lock().cards.get(slot).cloned()
    }

    pub fn card_error(&self, slot: &str) -> Option<String> {
        self.state.lock().card_errors.get(slot).cloned()
    }

    pub fn error_renders(&self) -> usize {
        self.state.lock().error_renders
    }

    pub fn error_batches(&self) -> usize {
        self.state.lock().error_batches
    }

    pub fn is_flashing(&self, slot: &str) -> bool {
        self.state.lock().flashing.contains(slot)
    }

    pub fn flash_count(&self, slot: &str) -> usize {
        self.state.lock().flash_count.get(slot).copied().unwrap_or(0)
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.state.lock().rows.clone()
    }

    pub fn table_renders(&self) -> usize {
        self.state.lock().table_renders
    }

    pub fn badge(&self) -> Option<BadgeView> {
        self.state.lock().badges.last().copied()
    }

    pub fn badges(&self) -> Vec<BadgeView> {
        self.state.lock().badges.clone()
    }

    pub fn last_sync(&self) -> Option<String> {
        self.state.lock().last_sync.clone()
    }
}

impl SurfaceSink for HeadlessSink {
    fn render_card(&self, slot: &str, card: &CardView) {
        if !self.has_card(slot) {
            return;
        }
        let mut st = self.state.lock();
        st.card_errors.remove(slot);
        st.cards.insert(slot.to_string(), card.clone());
    }

    fn render_card_errors(&self, slots: &[String], message: &str) {
        let mut st = self.state.lock();
        st.error_batches += 1;
        for slot in slots.iter().filter(|s| self.has_card(s)) {
            st.cards.remove(slot);
            st.card_errors.insert(slot.clone(), message.to_string());
            st.error_renders += 1;
        }
    }

    fn set_card_flash(&self, slot: &str, on: bool) {
        if !self.has_card(slot) {
            return;
        }
        let mut st = self.state.lock();
        if on {
            st.flashing.insert(slot.to_string());
            *st.flash_count.entry(slot.to_string()).or_default() += 1;
        } else {
            st.flashing.remove(slot);
        }
    }

    fn render_table(&self, rows: &[TableRow]) {
        let mut st = self.state.lock();
        st.rows = rows.to_vec();
        st.table_renders += 1;
    }

    fn render_badge(&self, badge: &BadgeView) {
        self.state.lock().badges.push(*badge);
    }

    fn render_last_sync(&self, label: &str) {
        self.state.lock().last_sync = Some(label.to_string());
    }
}
