pub mod client;
pub mod errors;

use async_trait::async_trait;
use corelib::TickerReading;

pub use client::{FeedEndpoints, HttpFeedClient};
pub use errors::FeedError;

/// Source of ticker snapshots.
#[async_trait]
pub trait TickerFeed: Send + Sync {
    /// Fetch one snapshot, in producer order.
    async fn fetch_snapshot(&self) -> Result<Vec<TickerReading>, FeedError>;
}

/// Liveness check against the ticker server.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// `Ok(())` on any 2xx acknowledgement.
    async fn probe(&self) -> Result<(), FeedError>;
}
