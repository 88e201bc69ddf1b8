//! Opaque identifiers and the drag-session capability token.

mod id_macro;
mod session_token;

use serde::{Deserialize, Serialize};

pub use session_token::SessionToken;

/// Names a specific payload-cache entry.
///
/// Handles are minted per `store` and are never reused across entries; a
/// handle that stops resolving has expired, it will not come back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayloadHandle(String);

/// Identifies the window or embedder instance a drag originated from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(String);

/// Opaque reference to an active shadow renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShadowId(String);

id_macro::impl_id!(PayloadHandle, SourceId, ShadowId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_unique_per_mint() {
        assert_ne!(PayloadHandle::new(), PayloadHandle::new());
    }

    #[test]
    fn handle_display_round_trips() {
        let handle = PayloadHandle::new();
        assert_eq!(PayloadHandle::from_string(handle.to_string()), handle);
    }
}
