//! Embedding-environment policy hooks.

use crate::drag::{ActivationIntent, ClipData, OpaqueContent, TransferFlags};

/// Injected policy surface of the embedding environment.
///
/// These are cheap, synchronous queries; the coordinator consults them on
/// every drag start.
pub trait HostPolicyPort: Send + Sync {
    /// Whether this application accepts drops originating in other processes.
    fn external_drop_enabled(&self) -> bool;

    fn animated_shadow_enabled(&self) -> bool;

    /// An accessibility or alternate-input mode that conflicts with drag
    /// gestures is active.
    fn drag_gesture_blocked(&self) -> bool;

    /// The designated environment (e.g. a specific device class) that always
    /// permits dragging, even while gestures are blocked.
    fn gesture_block_exempt(&self) -> bool;

    /// A rich activation payload for a dragged link, when the environment can
    /// provide one. `None` makes the coordinator fall back to plain text.
    fn link_activation_intent(&self, url: &str) -> Option<ActivationIntent>;

    /// Serializes opaque application content into a clip. Failing here aborts
    /// the drag start cleanly.
    fn opaque_clip(&self, content: &OpaqueContent) -> anyhow::Result<ClipData>;

    /// Environment override for the transfer flags of opaque content.
    fn adjust_opaque_flags(&self, flags: TransferFlags) -> TransferFlags;
}
