//! # dragwire-core
//!
//! Core domain models and business logic for the dragwire drag-and-drop
//! subsystem.
//!
//! This crate contains pure domain logic without any infrastructure
//! dependencies: content classification, the transferable clip model, the
//! drag lifecycle state machine, shadow geometry, and the port traits the
//! application layer is wired against.

pub mod drag;
pub mod geometry;
pub mod ids;
pub mod ports;
pub mod shadow;

// Re-export commonly used types at the crate root
pub use drag::{classify, ClipData, DragDescriptor, DragPhase, DragTargetKind, MimeType, TransferFlags};
pub use geometry::{Point, Rect, Size};
pub use ids::{PayloadHandle, SessionToken, ShadowId, SourceId};
pub use shadow::{ShadowAnimator, ShadowConfig, ShadowLayout, ShadowSpec};
