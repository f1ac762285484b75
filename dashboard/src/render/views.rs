//! Structured update instructions handed to a `SurfaceSink`.

use std::fmt;

use corelib::ConnectivityState;

use crate::format::ChangeClass;

/// Visual tone shared by the exchange badges and the connectivity badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Primary,
    Success,
    Warning,
    Danger,
    Secondary,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Primary => "primary",
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
            Tone::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of one pinned summary card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub price: String,
    /// Signed percentage with `%`, e.g. `"+1.23%"`.
    pub change: String,
    pub class: ChangeClass,
}

/// One row of the market table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Upper-cased exchange name.
    pub exchange: String,
    pub exchange_tone: Tone,
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub class: ChangeClass,
    pub high: String,
    pub low: String,
    pub volume: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeView {
    pub label: &'static str,
    pub tone: Tone,
}

impl BadgeView {
    pub fn for_state(state: ConnectivityState) -> Self {
        let (label, tone) = match state {
            ConnectivityState::Checking => ("checking", Tone::Warning),
            ConnectivityState::Connected => ("connected", Tone::Success),
            ConnectivityState::Error => ("error", Tone::Danger),
            _ => ("unknown", Tone::Secondary),
        };
        Self { label, tone }
    }
}
