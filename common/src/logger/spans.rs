use tracing::{Span, field};

use super::TraceId;

/// Root span for one sync cycle. `outcome` is recorded once the cycle settles.
pub fn cycle_span(seq: u64, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "sync_cycle",
        seq,
        trace_id = %trace_id,
        outcome = field::Empty
    )
}

/// Child span (inherits the parent's trace_id through the span tree).
pub fn child_span(name: &'static str) -> Span {
    tracing::info_span!("child", name = %name)
}
