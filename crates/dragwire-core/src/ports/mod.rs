//! Port interfaces for the application layer.
//!
//! Ports define the contract between the drag lifecycle logic and the
//! platform/embedding environment. The OS drag primitive, telemetry
//! recording, wall clock and the cross-process byte transport are all
//! collaborators behind these traits; the application crate never talks to a
//! platform API directly.

mod clock;
mod drag_host;
pub mod errors;
mod host_policy;
mod payload_channel;
mod payload_sink;
pub mod telemetry;

pub use clock::ClockPort;
pub use drag_host::{DragHostPort, DropAction, DropPermissionGrant, ExternalDropEvent};
pub use errors::{CacheReadError, CacheStoreError, DragStartError, SessionError};
pub use host_policy::HostPolicyPort;
pub use payload_channel::PayloadChannelPort;
pub use payload_sink::PayloadSinkPort;
pub use telemetry::TelemetryPort;
