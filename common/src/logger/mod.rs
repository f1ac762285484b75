mod init;
mod spans;
mod trace_id;

pub use init::{init_tracing, init_tracing_with_writer};
pub use spans::{child_span, cycle_span};
pub use trace_id::TraceId;
