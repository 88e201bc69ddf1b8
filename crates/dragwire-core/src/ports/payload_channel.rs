/// Readiness of the cross-process byte transport.
///
/// The payload cache refuses to park an image payload while no transport is
/// available: a handle nobody can ever read would only leak memory.
pub trait PayloadChannelPort: Send + Sync {
    fn is_ready(&self) -> bool;
}
