//! In-process stand-ins for the platform byte stream.
//!
//! On a real platform the receiving process reads the payload through a pipe
//! the OS hands it; [`PipeSink`] provides the same shape over a tokio duplex
//! stream so the pull-read path can be exercised end to end.

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, DuplexStream};
use tracing::debug;

use dragwire_core::ports::{PayloadChannelPort, PayloadSinkPort};

/// Write end of an in-process payload pipe.
pub struct PipeSink {
    inner: DuplexStream,
}

impl PipeSink {
    /// Creates a connected pipe; the returned [`DuplexStream`] is the reader
    /// the "remote" side consumes.
    pub fn pair(capacity: usize) -> (Self, DuplexStream) {
        let (writer, reader) = tokio::io::duplex(capacity);
        (Self { inner: writer }, reader)
    }
}

#[async_trait]
impl PayloadSinkPort for PipeSink {
    async fn write_chunk(&mut self, chunk: &[u8]) -> anyhow::Result<()> {
        self.inner.write_all(chunk).await?;
        Ok(())
    }

    async fn finish(&mut self) -> anyhow::Result<()> {
        self.inner.shutdown().await?;
        debug!("payload pipe finished");
        Ok(())
    }
}

/// Fixed transport readiness, for embedders whose transport is configured
/// once at startup (and for tests).
pub struct StaticChannel {
    ready: bool,
}

impl StaticChannel {
    pub fn ready() -> Self {
        Self { ready: true }
    }

    pub fn unavailable() -> Self {
        Self { ready: false }
    }
}

impl PayloadChannelPort for StaticChannel {
    fn is_ready(&self) -> bool {
        self.ready
    }
}
