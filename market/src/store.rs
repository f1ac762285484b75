use std::collections::HashMap;
use std::sync::Arc;

use corelib::{IdentityPair, TickerReading};
use parking_lot::RwLock;
use tracing::{debug, instrument};

/// In-memory cache of the latest reading per `(exchange, symbol)`.
///
/// Guarantees:
/// - At most one reading per identity pair.
/// - Readings are replaced wholesale, never patched field by field.
/// - Nothing is ever evicted. An instrument missing from later snapshots
///   simply goes stale.
#[derive(Default)]
pub struct TickerStore {
    inner: RwLock<HashMap<IdentityPair, TickerReading>>,
}

impl TickerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the entry of every reading in `snapshot`.
    ///
    /// Duplicate identity pairs inside one snapshot resolve to the last
    /// element. Returns the snapshot itself, in producer order, as a shared
    /// pointer that stays stable while later merges mutate the store.
    #[instrument(skip_all, fields(count = snapshot.len()), level = "debug")]
    pub fn merge(&self, snapshot: Vec<TickerReading>) -> Arc<[TickerReading]> {
        {
            let mut map = self.inner.write();
            for reading in &snapshot {
                map.insert(reading.identity(), reading.clone());
            }
            debug!(stored = map.len(), "snapshot merged");
        }

        Arc::from(snapshot)
    }

    /// Returns a cloned reading if the instrument has been seen.
    pub fn get(&self, id: &IdentityPair) -> Option<TickerReading> {
        self.inner.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Copy of the whole store. Map order is unspecified.
    pub fn entries(&self) -> HashMap<IdentityPair, TickerReading> {
        self.inner.read().clone()
    }
}
