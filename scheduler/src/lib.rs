//! Fixed-cadence driver for the sync cycles.

pub mod engine;
pub mod state;
pub mod types;

pub use engine::SyncScheduler;
pub use types::SchedulerConfig;
