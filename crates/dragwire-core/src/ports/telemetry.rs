//! Fire-and-forget metric recording.
//!
//! Telemetry never affects control flow: implementations must not fail and
//! the callers never look at a result.

/// Metric names shared between recorders and tests.
pub mod metrics {
    /// Size of each payload parked in the cache, in bytes.
    pub const PAYLOAD_SIZE_BYTES: &str = "dragdrop.payload.size_bytes";
    /// Interval between consecutive handle creations.
    pub const HANDLE_CREATION_INTERVAL_MS: &str = "dragdrop.payload.handle_interval_ms";
    /// First successful payload open, relative to the drag-end timestamp.
    pub const FIRST_OPEN_AFTER_DRAG_END_MS: &str = "dragdrop.payload.first_open_after_end_ms";
    /// Drag start to drop-in-view.
    pub const DROP_IN_VIEW_MS: &str = "dragdrop.drop.in_view_ms";
    /// Total drag duration when the drop was accepted somewhere.
    pub const DRAG_DURATION_DROPPED_MS: &str = "dragdrop.drag.duration_dropped_ms";
    /// Total drag duration when the drag was cancelled or rejected.
    pub const DRAG_DURATION_CANCELED_MS: &str = "dragdrop.drag.duration_canceled_ms";
    /// Distribution of dragged target kinds.
    pub const DRAG_TARGET_KIND: &str = "dragdrop.drag.target_kind";
}

pub trait TelemetryPort: Send + Sync {
    fn record_size(&self, metric: &'static str, bytes: usize);

    fn record_duration_ms(&self, metric: &'static str, ms: i64);

    /// Records one sample of an enumerated distribution.
    fn record_tag(&self, metric: &'static str, tag: &'static str);
}
