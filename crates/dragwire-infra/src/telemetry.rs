//! Tracing-backed telemetry sink.
//!
//! Metrics become structured `tracing` events; recording can never fail and
//! never feeds back into control flow.

use tracing::debug;

use dragwire_core::ports::TelemetryPort;

pub struct TracingTelemetry;

impl TelemetryPort for TracingTelemetry {
    fn record_size(&self, metric: &'static str, bytes: usize) {
        debug!(metric, bytes, "metric sample");
    }

    fn record_duration_ms(&self, metric: &'static str, ms: i64) {
        debug!(metric, ms, "metric sample");
    }

    fn record_tag(&self, metric: &'static str, tag: &'static str) {
        debug!(metric, tag, "metric sample");
    }
}
