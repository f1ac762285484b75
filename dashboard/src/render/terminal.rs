//! Terminal surface: keeps the current frame in memory and redraws it to a
//! writer whenever a cycle settles (last-sync stamped, card error shown) or
//! the connectivity badge changes.

use std::collections::{BTreeMap, HashSet};
use std::io::{self, Write};

use parking_lot::Mutex;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::warn;

use super::sink::SurfaceSink;
use super::views::{BadgeView, CardView, TableRow};
use crate::format::ChangeClass;

#[derive(Debug, Clone, PartialEq, Eq)]
enum CardCell {
    Loading,
    Data(CardView),
    Error(String),
}

#[derive(Debug)]
struct Frame {
    cards: BTreeMap<String, CardCell>,
    flashing: HashSet<String>,
    rows: Vec<TableRow>,
    badge: Option<BadgeView>,
    last_sync: Option<String>,
}

#[derive(Tabled)]
struct DisplayRow {
    #[tabled(rename = "Exchange")]
    exchange: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Time")]
    time: String,
}

impl From<&TableRow> for DisplayRow {
    fn from(r: &TableRow) -> Self {
        Self {
            exchange: format!("{} ({})", r.exchange, r.exchange_tone),
            symbol: r.symbol.clone(),
            price: r.price.clone(),
            change: format!("{} {}", arrow(r.class), r.change),
            high: r.high.clone(),
            low: r.low.clone(),
            volume: r.volume.clone(),
            time: r.time.clone(),
        }
    }
}

fn arrow(class: ChangeClass) -> &'static str {
    match class {
        ChangeClass::Up => "▲",
        ChangeClass::Down => "▼",
        ChangeClass::Neutral => "-",
    }
}

pub struct TerminalSink {
    out: Mutex<Box<dyn Write + Send>>,
    frame: Mutex<Frame>,
}

impl TerminalSink {
    /// Surface with exactly the given card slots, drawing to `out`.
    pub fn new<I, S>(card_slots: I, out: Box<dyn Write + Send>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cards = card_slots
            .into_iter()
            .map(|s| (s.into(), CardCell::Loading))
            .collect();

        Self {
            out: Mutex::new(out),
            frame: Mutex::new(Frame {
                cards,
                flashing: HashSet::new(),
                rows: Vec::new(),
                badge: None,
                last_sync: None,
            }),
        }
    }

    pub fn stdout<I, S>(card_slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(card_slots, Box::new(io::stdout()))
    }

    fn update_card(&self, slot: &str, cell: CardCell) -> bool {
        update_cell(&mut self.frame.lock(), slot, cell)
    }

    fn draw(&self) {
        let text = render_frame(&self.frame.lock());

        let mut out = self.out.lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!(error = %e, "terminal redraw failed");
        }
    }
}

fn update_cell(frame: &mut Frame, slot: &str, cell: CardCell) -> bool {
    match frame.cards.get_mut(slot) {
        Some(c) => {
            *c = cell;
            true
        }
        None => false,
    }
}

fn render_frame(frame: &Frame) -> String {
    let mut s = String::new();

    let badge = frame
        .badge
        .map(|b| format!("[{}]", b.label))
        .unwrap_or_else(|| "[-]".to_string());
    let last = frame.last_sync.as_deref().unwrap_or("-");
    s.push_str(&format!("server {badge}  last update {last}\n"));

    for (slot, cell) in &frame.cards {
        let mark = if frame.flashing.contains(slot) { "*" } else { " " };
        let body = match cell {
            CardCell::Loading => "loading...".to_string(),
            CardCell::Data(c) => format!("{} {} {}", c.price, arrow(c.class), c.change),
            CardCell::Error(msg) => format!("! {msg}"),
        };
        s.push_str(&format!("{mark} {slot:<16} {body}\n"));
    }

    let rows: Vec<DisplayRow> = frame.rows.iter().map(DisplayRow::from).collect();
    s.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    s.push('\n');
    s
}

impl SurfaceSink for TerminalSink {
    fn render_card(&self, slot: &str, card: &CardView) {
        self.update_card(slot, CardCell::Data(card.clone()));
    }

    fn render_card_errors(&self, slots: &[String], message: &str) {
        let changed = {
            let mut frame = self.frame.lock();
            slots.iter().fold(false, |changed, slot| {
                update_cell(&mut frame, slot, CardCell::Error(message.to_string())) || changed
            })
        };
        if changed {
            self.draw();
        }
    }

    /// Turning emphasis on waits for the cycle's redraw; turning it off
    /// redraws so the revert reaches the screen.
    fn set_card_flash(&self, slot: &str, on: bool) {
        let reverted = {
            let mut frame = self.frame.lock();
            if !frame.cards.contains_key(slot) {
                return;
            }
            if on {
                frame.flashing.insert(slot.to_string());
                false
            } else {
                frame.flashing.remove(slot)
            }
        };
        if reverted {
            self.draw();
        }
    }

    fn render_table(&self, rows: &[TableRow]) {
        self.frame.lock().rows = rows.to_vec();
    }

    fn render_badge(&self, badge: &BadgeView) {
        self.frame.lock().badge = Some(*badge);
        self.draw();
    }

    fn render_last_sync(&self, label: &str) {
        self.frame.lock().last_sync = Some(label.to_string());
        self.draw();
    }
}
