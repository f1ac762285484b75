pub mod models;
pub mod snapshot;

pub use models::{ConnectivityState, IdentityPair, TickerReading};
pub use snapshot::{SnapshotError, parse_snapshot};
