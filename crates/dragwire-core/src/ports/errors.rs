use thiserror::Error;

/// Reading against an unknown or already-evicted handle. Expected and
/// non-fatal: a drop racing an eviction timer lands here by design. Whether
/// the handle once existed is logged for diagnostics but never changes the
/// error kind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheReadError {
    #[error("payload not found")]
    NotFound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheStoreError {
    /// No cross-process transport is available for the payload.
    #[error("payload transport unavailable")]
    TransportUnavailable,
}

/// Misuse of the session capability. Logged and surfaced, never silently
/// swallowed; the stored session is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session token does not match the active session")]
    TokenMismatch,

    #[error("no active drag session")]
    NoActiveSession,
}

/// Why a drag start was aborted. A failed start is silent from the user's
/// perspective: no session exists, no OS drag was requested, nothing leaks.
#[derive(Debug, Error)]
pub enum DragStartError {
    #[error("drag gestures are blocked by the active input mode")]
    GestureBlocked,

    #[error("descriptor carries nothing draggable")]
    NothingToDrag,

    #[error("a drag is already in progress")]
    DragInProgress,

    #[error(transparent)]
    Store(#[from] CacheStoreError),

    #[error("embedding environment could not build a clip: {0}")]
    ClipUnavailable(String),

    #[error("drag host rejected the drag: {0}")]
    HostRejected(String),
}
