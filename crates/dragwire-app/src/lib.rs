//! Drag lifecycle orchestration layer.
//!
//! This crate wires the dragwire domain model to the platform ports: the
//! single-slot payload cache served to external readers, the token-guarded
//! session registry, and the coordinator driving a drag from start to end.

pub mod coordinator;
pub mod payload_cache;
pub mod session;

pub use coordinator::DragLifecycleCoordinator;
pub use payload_cache::{PayloadCacheService, PayloadReader, DEFAULT_EVICTION_GRACE};
pub use session::{DragSession, DragSessionRegistry};
