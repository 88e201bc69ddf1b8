//! The platform's native drag-and-drop primitive, treated as an opaque OS
//! service.

use async_trait::async_trait;

use crate::drag::{ClipData, MimeType, TransferFlags};
use crate::shadow::ShadowSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    Enter,
    Location,
    Drop,
    Exit,
}

/// A drag event arriving from outside this process.
#[derive(Debug, Clone)]
pub struct ExternalDropEvent {
    pub action: DropAction,
    pub mime: Option<MimeType>,
}

impl ExternalDropEvent {
    pub fn is_drop(&self) -> bool {
        self.action == DropAction::Drop
    }
}

/// Transient permission handle for reading externally dropped content.
/// Acquired on drop, released immediately after; never retried, never kept.
#[derive(Debug)]
pub struct DropPermissionGrant {
    pub token: String,
}

#[async_trait]
pub trait DragHostPort: Send + Sync {
    /// Hands the clip, shadow and transfer flags to the OS drag primitive.
    /// An error means the drag never started; the caller owns the cleanup of
    /// anything it prepared for the drag.
    async fn start_drag(
        &self,
        clip: &ClipData,
        shadow: &ShadowSpec,
        flags: TransferFlags,
    ) -> anyhow::Result<()>;

    async fn acquire_drop_permissions(
        &self,
        event: &ExternalDropEvent,
    ) -> anyhow::Result<DropPermissionGrant>;

    async fn release_drop_permissions(&self, grant: DropPermissionGrant) -> anyhow::Result<()>;
}
