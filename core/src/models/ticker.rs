use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::lenient;

/// `(exchange, symbol)`: the key of one tradable instrument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityPair {
    pub exchange: String,
    pub symbol: String,
}

impl IdentityPair {
    pub fn new(exchange: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            exchange: exchange.into(),
            symbol: symbol.into(),
        }
    }
}

impl fmt::Display for IdentityPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.exchange, self.symbol)
    }
}

/// Latest known reading of one instrument, as published by the ticker server.
///
/// Every numeric field is optional: a missing or `null` value means "absent".
/// Numbers are accepted either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerReading {
    pub exchange: String,
    pub symbol: String,

    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: Option<f64>,

    /// 24h change in percent. Absent means neutral.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub change_percent: Option<f64>,

    #[serde(default, deserialize_with = "lenient::decimal")]
    pub high_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub low_price: Option<f64>,

    #[serde(default, deserialize_with = "lenient::decimal")]
    pub bid_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub ask_price: Option<f64>,

    #[serde(default, deserialize_with = "lenient::decimal")]
    pub volume: Option<f64>,

    /// Producer-assigned time of the reading.
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TickerReading {
    /// Minimal reading with only identity and price set.
    pub fn new(exchange: impl Into<String>, symbol: impl Into<String>, price: f64) -> Self {
        Self {
            exchange: exchange.into(),
            symbol: symbol.into(),
            price: Some(price),
            change_percent: None,
            high_price: None,
            low_price: None,
            bid_price: None,
            ask_price: None,
            volume: None,
            timestamp: None,
        }
    }

    pub fn identity(&self) -> IdentityPair {
        IdentityPair::new(self.exchange.clone(), self.symbol.clone())
    }
}
