//! Transferable clip representation and transfer flags.
//!
//! The clip is what actually crosses the process boundary: the OS drag
//! primitive receives it together with the transfer flags and forwards it to
//! whichever window accepts the drop. Large payloads never travel inside the
//! clip; the clip carries a cache handle the receiver resolves through the
//! payload cache instead.

use serde::{Deserialize, Serialize};

use super::classification::DragTargetKind;
use super::descriptor::OpaqueContent;
use super::mime::MimeType;
use crate::ids::PayloadHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum ClipData {
    Text {
        text: String,
    },
    /// Binary payload parked in the cache; the receiver pulls the bytes.
    CachedPayload {
        handle: PayloadHandle,
        mime: MimeType,
        display_name: String,
    },
    Link {
        url: String,
        display: String,
        intent: Option<ActivationIntent>,
    },
    Opaque {
        content: OpaqueContent,
    },
}

/// Host-built activation payload for a dragged link (e.g. an intent the
/// receiving side can fire to open the URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationIntent {
    pub action: String,
    pub uri: String,
}

/// Platform-level bits controlling cross-process visibility and permission
/// grants for the dragged content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFlags {
    /// Content is visible to windows of other processes.
    pub cross_process: bool,
    /// Propagate a read grant for the payload to the receiving process.
    pub grant_read: bool,
    /// Full global visibility, beyond ordinary cross-process drags.
    pub global: bool,
    /// In-process overlays must not interrupt this drag.
    pub exclusive: bool,
}

impl TransferFlags {
    pub fn for_kind(kind: DragTargetKind) -> Self {
        match kind {
            DragTargetKind::Text | DragTargetKind::Link => Self {
                cross_process: true,
                ..Self::default()
            },
            DragTargetKind::Image => Self {
                cross_process: true,
                grant_read: true,
                ..Self::default()
            },
            DragTargetKind::OpaqueApplicationContent => Self {
                cross_process: true,
                global: true,
                exclusive: true,
                ..Self::default()
            },
            DragTargetKind::Invalid => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_flags_request_read_grant() {
        let flags = TransferFlags::for_kind(DragTargetKind::Image);
        assert!(flags.cross_process);
        assert!(flags.grant_read);
        assert!(!flags.exclusive);
    }

    #[test]
    fn opaque_flags_request_exclusive_global_visibility() {
        let flags = TransferFlags::for_kind(DragTargetKind::OpaqueApplicationContent);
        assert!(flags.global);
        assert!(flags.exclusive);
    }

    #[test]
    fn invalid_requests_nothing() {
        assert_eq!(
            TransferFlags::for_kind(DragTargetKind::Invalid),
            TransferFlags::default()
        );
    }
}
