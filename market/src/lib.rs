//! Market-data side of the dashboard: the ticker store, the feed/probe seams
//! and their HTTP implementation.

pub mod feed;
pub mod staleness;
pub mod store;

pub use feed::{FeedEndpoints, FeedError, HealthProbe, HttpFeedClient, TickerFeed};
pub use staleness::StaleGuard;
pub use store::TickerStore;
