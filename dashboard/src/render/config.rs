use std::collections::HashMap;
use std::time::Duration;

use corelib::IdentityPair;

use super::views::Tone;

/// Static layout knowledge: which instruments own a summary card and how
/// exchanges are colored.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub pinned: HashMap<IdentityPair, String>,
    pub exchange_tones: HashMap<String, Tone>,
    /// How long a freshly written card stays emphasized.
    pub flash: Duration,
}

impl RenderConfig {
    pub fn slot_for(&self, id: &IdentityPair) -> Option<&str> {
        self.pinned.get(id).map(String::as_str)
    }

    /// Unknown exchanges fall back to `Secondary`.
    pub fn exchange_tone(&self, exchange: &str) -> Tone {
        self.exchange_tones
            .get(exchange)
            .copied()
            .unwrap_or(Tone::Secondary)
    }

    /// Card slot ids, sorted.
    pub fn slots(&self) -> Vec<String> {
        let mut slots: Vec<String> = self.pinned.values().cloned().collect();
        slots.sort();
        slots.dedup();
        slots
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let pinned = [
            ("coinone", "BTC/KRW", "btc-krw-price"),
            ("coinone", "ETH/KRW", "eth-krw-price"),
            ("binance", "BTCUSDT", "btc-usdt-price"),
            ("binance", "ETHUSDT", "eth-usdt-price"),
        ]
        .into_iter()
        .map(|(ex, sym, slot)| (IdentityPair::new(ex, sym), slot.to_string()))
        .collect();

        let exchange_tones = [("coinone", Tone::Primary), ("binance", Tone::Success)]
            .into_iter()
            .map(|(ex, tone)| (ex.to_string(), tone))
            .collect();

        Self {
            pinned,
            exchange_tones,
            flash: Duration::from_millis(500),
        }
    }
}
