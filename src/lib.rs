//! # dragwire
//!
//! Drag-and-drop transfer subsystem for a windowed application:
//!
//! - a single-slot payload cache serving pull reads to an external process,
//!   with grace-delayed eviction ([`PayloadCacheService`]);
//! - a token-guarded, process-wide drag session ([`DragSessionRegistry`]);
//! - the drag lifecycle coordinator orchestrating classification, clip
//!   building, shadow construction and the OS drag primitive
//!   ([`DragLifecycleCoordinator`]);
//! - a shadow geometry engine animating the drag affordance between its
//!   picked-up and under-finger layouts ([`ShadowLayout`], [`ShadowAnimator`]).
//!
//! The platform drag primitive, embedding-environment policy and telemetry
//! recording are ports implemented by the host application; see
//! [`dragwire_core::ports`].

pub use dragwire_app::{
    DragLifecycleCoordinator, DragSession, DragSessionRegistry, PayloadCacheService, PayloadReader,
};
pub use dragwire_core::drag::{
    classify, ClipData, DragDescriptor, DragPhase, DragTargetKind, ImageData, LinkData, MimeType,
    OpaqueContent, TransferFlags,
};
pub use dragwire_core::geometry::{Point, Rect, Size};
pub use dragwire_core::ids::{PayloadHandle, SessionToken, ShadowId, SourceId};
pub use dragwire_core::ports;
pub use dragwire_core::shadow::{ShadowAnimator, ShadowConfig, ShadowFrame, ShadowLayout, ShadowSpec};
pub use dragwire_infra::{PipeSink, StaticChannel, SystemClock, TracingTelemetry};
