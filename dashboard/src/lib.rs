pub mod config;
pub mod connectivity;
pub mod error;
pub mod format;
pub mod orchestrator;
pub mod render;

pub use config::AppConfig;
pub use connectivity::ConnectivityMonitor;
pub use orchestrator::{CycleOutcome, Dashboard, DashboardOptions};
