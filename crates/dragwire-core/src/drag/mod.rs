//! Dragged-content domain model: descriptor, classification, transferable
//! clip representation and the drag lifecycle state machine.

mod classification;
mod clip;
mod descriptor;
mod mime;
mod phase;

pub use classification::{classify, DragTargetKind};
pub use clip::{ActivationIntent, ClipData, TransferFlags};
pub use descriptor::{DragDescriptor, ImageData, LinkData, OpaqueContent};
pub use mime::MimeType;
pub use phase::{DragEvent, DragPhase, PhaseError};
