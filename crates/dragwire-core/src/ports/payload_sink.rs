use async_trait::async_trait;

/// File-descriptor-like sink the cache writes payload bytes into on demand.
///
/// The pipe mechanics belong to the platform; this side only supplies bytes.
#[async_trait]
pub trait PayloadSinkPort: Send {
    async fn write_chunk(&mut self, chunk: &[u8]) -> anyhow::Result<()>;

    /// Signals end-of-payload to the reader.
    async fn finish(&mut self) -> anyhow::Result<()>;
}
