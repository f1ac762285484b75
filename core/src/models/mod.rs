mod connectivity;
mod lenient;
mod ticker;

pub use connectivity::ConnectivityState;
pub use ticker::{IdentityPair, TickerReading};
