//! Single-slot payload cache.
//!
//! Holds at most one binary payload process-wide and serves it to an
//! external reader through a pull-based read interface. The reader is
//! untrusted and asynchronous: it may open the payload late, twice, or never,
//! so eviction after a drag end is delayed by a grace interval instead of
//! blocking on the reader's progress.
//!
//! One lock guards the slot metadata and the scheduled-eviction handle; the
//! lock is never held across byte I/O. Payload bytes live in a [`Bytes`]
//! buffer, so concurrent reads share one allocation.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use dragwire_core::drag::MimeType;
use dragwire_core::ids::PayloadHandle;
use dragwire_core::ports::telemetry::metrics;
use dragwire_core::ports::{
    CacheReadError, CacheStoreError, ClockPort, PayloadChannelPort, PayloadSinkPort, TelemetryPort,
};

/// How long an evicted-on-drag-end payload stays readable for a slow remote
/// reader. Trades bounded memory pressure against data loss for legitimate
/// late reads.
pub const DEFAULT_EVICTION_GRACE: Duration = Duration::from_secs(60);

const COPY_CHUNK_BYTES: usize = 64 * 1024;

pub struct PayloadCacheService {
    state: Arc<Mutex<CacheState>>,
    channel: Arc<dyn PayloadChannelPort>,
    clock: Arc<dyn ClockPort>,
    telemetry: Arc<dyn TelemetryPort>,
    grace: Duration,
}

#[derive(Default)]
struct CacheState {
    entry: Option<CacheEntry>,
    pending_eviction: Option<AbortHandle>,
    last_cleared: Option<ClearedEntry>,
    drag_ended_at_ms: Option<i64>,
}

struct CacheEntry {
    handle: PayloadHandle,
    bytes: Bytes,
    mime: MimeType,
    display_name: String,
    created_at_ms: i64,
    last_read_at_ms: Option<i64>,
}

/// Remembered so a late read on a stale handle can be reported as "expired"
/// rather than "never existed". Diagnostics only; the returned error kind is
/// the same either way.
struct ClearedEntry {
    handle: PayloadHandle,
    cleared_at_ms: i64,
}

impl PayloadCacheService {
    pub fn new(
        channel: Arc<dyn PayloadChannelPort>,
        clock: Arc<dyn ClockPort>,
        telemetry: Arc<dyn TelemetryPort>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(CacheState::default())),
            channel,
            clock,
            telemetry,
            grace: DEFAULT_EVICTION_GRACE,
        }
    }

    pub fn with_eviction_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Parks a payload, replacing and evicting any current entry, and returns
    /// a fresh unguessable handle for it.
    pub fn store(
        &self,
        bytes: Bytes,
        mime_extension: &str,
        display_name: &str,
    ) -> Result<PayloadHandle, CacheStoreError> {
        if !self.channel.is_ready() {
            warn!("refusing to cache payload: no transport for remote reads");
            return Err(CacheStoreError::TransportUnavailable);
        }

        let now = self.clock.now_ms();
        let handle = PayloadHandle::new();
        let size = bytes.len();
        let replaced_after_ms = {
            let mut state = self.state.lock().expect("payload cache lock");
            if let Some(pending) = state.pending_eviction.take() {
                pending.abort();
            }
            let replaced_after_ms = state.entry.take().map(|old| {
                debug!(old_handle = %old.handle, "replacing cached payload");
                let interval = now - old.created_at_ms;
                state.last_cleared = Some(ClearedEntry {
                    handle: old.handle,
                    cleared_at_ms: now,
                });
                interval
            });
            state.drag_ended_at_ms = None;
            state.entry = Some(CacheEntry {
                handle: handle.clone(),
                bytes,
                mime: MimeType::from_extension(mime_extension),
                display_name: display_name.to_string(),
                created_at_ms: now,
                last_read_at_ms: None,
            });
            replaced_after_ms
        };
        if let Some(interval) = replaced_after_ms {
            self.telemetry
                .record_duration_ms(metrics::HANDLE_CREATION_INTERVAL_MS, interval);
        }
        self.telemetry.record_size(metrics::PAYLOAD_SIZE_BYTES, size);
        debug!(handle = %handle, size_bytes = size, "payload cached");
        Ok(handle)
    }

    /// Opens the current payload for reading.
    ///
    /// Safe to call from any reader thread. A miss is an expected race, not a
    /// fault: the caller gets [`CacheReadError::NotFound`] whether the handle
    /// expired or never existed.
    pub fn open_for_read(&self, handle: &PayloadHandle) -> Result<PayloadReader, CacheReadError> {
        let now = self.clock.now_ms();
        let (bytes, mime, display_name, first_open_latency_ms) = {
            let mut state = self.state.lock().expect("payload cache lock");
            let drag_ended_at_ms = state.drag_ended_at_ms;
            match state.entry.as_mut() {
                Some(entry) if entry.handle == *handle => {
                    let first_open = entry.last_read_at_ms.is_none();
                    entry.last_read_at_ms = Some(now);
                    let latency = if first_open {
                        drag_ended_at_ms.map(|ended| now - ended)
                    } else {
                        None
                    };
                    (
                        entry.bytes.clone(),
                        entry.mime.clone(),
                        entry.display_name.clone(),
                        latency,
                    )
                }
                _ => {
                    match &state.last_cleared {
                        Some(cleared) if cleared.handle == *handle => {
                            debug!(
                                handle = %handle,
                                cleared_at_ms = cleared.cleared_at_ms,
                                "read against expired payload handle"
                            );
                        }
                        _ => debug!(handle = %handle, "read against unknown payload handle"),
                    }
                    return Err(CacheReadError::NotFound);
                }
            }
        };
        if let Some(ms) = first_open_latency_ms {
            self.telemetry
                .record_duration_ms(metrics::FIRST_OPEN_AFTER_DRAG_END_MS, ms);
        }
        Ok(PayloadReader {
            bytes,
            mime,
            display_name,
        })
    }

    /// Called when the local drag ends. Evicts immediately unless the remote
    /// side may still need the payload, in which case eviction is scheduled
    /// after the grace interval.
    ///
    /// Timer failures are swallowed: without a running tokio runtime the
    /// payload is evicted immediately instead of being kept for the grace
    /// interval.
    pub fn on_drag_ended(&self, payload_still_needed: bool) {
        let now = self.clock.now_ms();
        let mut state = self.state.lock().expect("payload cache lock");
        state.drag_ended_at_ms = Some(now);

        if !payload_still_needed {
            Self::evict_locked(&mut state, now);
            return;
        }
        let Some(entry) = state.entry.as_ref() else {
            return;
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime for deferred eviction; evicting now");
            Self::evict_locked(&mut state, now);
            return;
        };

        // Bind the timer to this handle so a stale timer can never evict a
        // newer entry, even if aborting it raced.
        let bound_handle = entry.handle.clone();
        if let Some(pending) = state.pending_eviction.take() {
            pending.abort();
        }
        let shared = Arc::clone(&self.state);
        let clock = Arc::clone(&self.clock);
        let grace = self.grace;
        let task = runtime.spawn(async move {
            tokio::time::sleep(grace).await;
            let mut state = shared.lock().expect("payload cache lock");
            let still_current = state
                .entry
                .as_ref()
                .is_some_and(|entry| entry.handle == bound_handle);
            if still_current {
                debug!(handle = %bound_handle, "eviction grace expired");
                Self::evict_locked(&mut state, clock.now_ms());
            }
        });
        state.pending_eviction = Some(task.abort_handle());
        debug!(grace_ms = grace.as_millis() as u64, "payload eviction scheduled");
    }

    /// Clears the slot and cancels any scheduled eviction. Idempotent.
    pub fn evict_now(&self) {
        let now = self.clock.now_ms();
        let mut state = self.state.lock().expect("payload cache lock");
        if Self::evict_locked(&mut state, now) {
            debug!("payload evicted");
        }
    }

    pub fn has_entry(&self) -> bool {
        self.state
            .lock()
            .expect("payload cache lock")
            .entry
            .is_some()
    }

    fn evict_locked(state: &mut CacheState, now_ms: i64) -> bool {
        if let Some(pending) = state.pending_eviction.take() {
            pending.abort();
        }
        match state.entry.take() {
            Some(entry) => {
                state.last_cleared = Some(ClearedEntry {
                    handle: entry.handle,
                    cleared_at_ms: now_ms,
                });
                true
            }
            None => false,
        }
    }
}

/// A read of the cached payload. Holds a shared reference to the payload
/// buffer; dropping the reader costs nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadReader {
    bytes: Bytes,
    mime: MimeType,
    display_name: String,
}

impl PayloadReader {
    pub fn bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    pub fn mime(&self) -> &MimeType {
        &self.mime
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Streams the full payload into `sink`, chunk-wise, then finishes the
    /// stream. No cache lock is held while writing.
    pub async fn copy_into(&self, sink: &mut (dyn PayloadSinkPort + Send)) -> anyhow::Result<()> {
        for chunk in self.bytes.chunks(COPY_CHUNK_BYTES) {
            sink.write_chunk(chunk).await?;
        }
        sink.finish().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicI64, Ordering};
    use tokio::time::{advance, Duration};

    struct FixedClock(AtomicI64);

    impl FixedClock {
        fn at(ms: i64) -> Arc<Self> {
            Arc::new(Self(AtomicI64::new(ms)))
        }

        fn set(&self, ms: i64) {
            self.0.store(ms, Ordering::SeqCst);
        }
    }

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[derive(Default)]
    struct RecordingTelemetry {
        durations: Mutex<Vec<(&'static str, i64)>>,
        sizes: Mutex<Vec<(&'static str, usize)>>,
    }

    impl TelemetryPort for RecordingTelemetry {
        fn record_size(&self, metric: &'static str, bytes: usize) {
            self.sizes.lock().unwrap().push((metric, bytes));
        }

        fn record_duration_ms(&self, metric: &'static str, ms: i64) {
            self.durations.lock().unwrap().push((metric, ms));
        }

        fn record_tag(&self, _metric: &'static str, _tag: &'static str) {}
    }

    struct StaticChannel(bool);

    impl PayloadChannelPort for StaticChannel {
        fn is_ready(&self) -> bool {
            self.0
        }
    }

    struct VecSink(Vec<u8>);

    #[async_trait]
    impl PayloadSinkPort for VecSink {
        async fn write_chunk(&mut self, chunk: &[u8]) -> anyhow::Result<()> {
            self.0.extend_from_slice(chunk);
            Ok(())
        }

        async fn finish(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn cache() -> (Arc<PayloadCacheService>, Arc<FixedClock>, Arc<RecordingTelemetry>) {
        let clock = FixedClock::at(1_000);
        let telemetry = Arc::new(RecordingTelemetry::default());
        let cache = Arc::new(PayloadCacheService::new(
            Arc::new(StaticChannel(true)),
            clock.clone(),
            telemetry.clone(),
        ));
        (cache, clock, telemetry)
    }

    #[tokio::test]
    async fn store_replaces_the_previous_entry() -> anyhow::Result<()> {
        let (cache, _, _) = cache();
        let h1 = cache.store(Bytes::from_static(&[1, 2, 3]), "png", "a.png")?;
        assert_eq!(cache.open_for_read(&h1)?.bytes().as_ref(), &[1, 2, 3]);

        let h2 = cache.store(Bytes::from_static(&[4, 5]), "png", "b.png")?;
        assert_eq!(cache.open_for_read(&h1), Err(CacheReadError::NotFound));
        assert_eq!(cache.open_for_read(&h2)?.bytes().as_ref(), &[4, 5]);
        Ok(())
    }

    #[tokio::test]
    async fn expired_and_unknown_handles_return_the_same_error() -> anyhow::Result<()> {
        let (cache, _, _) = cache();
        let h1 = cache.store(Bytes::from_static(&[1]), "png", "a.png")?;
        cache.evict_now();
        assert_eq!(cache.open_for_read(&h1), Err(CacheReadError::NotFound));
        assert_eq!(
            cache.open_for_read(&PayloadHandle::new()),
            Err(CacheReadError::NotFound)
        );
        Ok(())
    }

    #[tokio::test]
    async fn evict_now_is_idempotent() -> anyhow::Result<()> {
        let (cache, _, _) = cache();
        cache.evict_now();
        assert!(!cache.has_entry());
        let h = cache.store(Bytes::from_static(&[1]), "png", "a.png")?;
        cache.evict_now();
        cache.evict_now();
        assert!(!cache.has_entry());
        assert_eq!(cache.open_for_read(&h), Err(CacheReadError::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn store_fails_without_transport() {
        let clock = FixedClock::at(0);
        let cache = PayloadCacheService::new(
            Arc::new(StaticChannel(false)),
            clock,
            Arc::new(RecordingTelemetry::default()),
        );
        assert_eq!(
            cache.store(Bytes::from_static(&[1]), "png", "a.png"),
            Err(CacheStoreError::TransportUnavailable)
        );
        assert!(!cache.has_entry());
    }

    #[tokio::test]
    async fn empty_payload_is_cached_like_any_other() -> anyhow::Result<()> {
        let (cache, _, _) = cache();
        let h = cache.store(Bytes::new(), "png", "a.png")?;
        assert!(cache.open_for_read(&h)?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn drag_end_with_remote_reader_evicts_after_the_grace_interval() -> anyhow::Result<()> {
        tokio::time::pause();
        let (cache, _, _) = cache();
        let h = cache.store(Bytes::from_static(&[1, 2]), "png", "a.png")?;
        cache.on_drag_ended(true);
        // Let the eviction task register its sleep before time moves.
        tokio::task::yield_now().await;

        advance(Duration::from_secs(59)).await;
        tokio::task::yield_now().await;
        assert!(cache.open_for_read(&h).is_ok());

        advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(cache.open_for_read(&h), Err(CacheReadError::NotFound));
        Ok(())
    }

    #[test]
    fn drag_end_without_a_runtime_evicts_immediately() {
        let clock = FixedClock::at(0);
        let cache = PayloadCacheService::new(
            Arc::new(StaticChannel(true)),
            clock,
            Arc::new(RecordingTelemetry::default()),
        );
        let h = cache
            .store(Bytes::from_static(&[1]), "png", "a.png")
            .unwrap();
        // A sync platform callback may land on a non-runtime thread; the
        // grace timer cannot be scheduled there.
        cache.on_drag_ended(true);
        assert!(!cache.has_entry());
        assert_eq!(cache.open_for_read(&h), Err(CacheReadError::NotFound));
    }

    #[tokio::test]
    async fn drag_end_without_remote_reader_evicts_immediately() -> anyhow::Result<()> {
        let (cache, _, _) = cache();
        let h = cache.store(Bytes::from_static(&[1]), "png", "a.png")?;
        cache.on_drag_ended(false);
        assert_eq!(cache.open_for_read(&h), Err(CacheReadError::NotFound));
        Ok(())
    }

    #[tokio::test]
    async fn new_store_cancels_a_scheduled_eviction() -> anyhow::Result<()> {
        tokio::time::pause();
        let (cache, _, _) = cache();
        cache.store(Bytes::from_static(&[1]), "png", "a.png")?;
        cache.on_drag_ended(true);
        tokio::task::yield_now().await;

        let h2 = cache.store(Bytes::from_static(&[2]), "png", "b.png")?;
        advance(Duration::from_secs(120)).await;
        tokio::task::yield_now().await;
        // The stale timer must not evict the newer entry.
        assert!(cache.open_for_read(&h2).is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn evict_now_cancels_a_scheduled_eviction() -> anyhow::Result<()> {
        tokio::time::pause();
        let (cache, _, _) = cache();
        cache.store(Bytes::from_static(&[1]), "png", "a.png")?;
        cache.on_drag_ended(true);
        tokio::task::yield_now().await;
        cache.evict_now();
        advance(Duration::from_secs(120)).await;
        tokio::task::yield_now().await;
        assert!(!cache.has_entry());
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_opens_share_the_payload_buffer() -> anyhow::Result<()> {
        let (cache, _, _) = cache();
        let h = cache.store(Bytes::from(vec![7; 1024]), "png", "a.png")?;
        let a = cache.open_for_read(&h)?;
        let b = cache.open_for_read(&h)?;
        assert_eq!(a.bytes().as_ptr(), b.bytes().as_ptr());
        Ok(())
    }

    #[tokio::test]
    async fn copy_into_streams_the_exact_payload() -> anyhow::Result<()> {
        let (cache, _, _) = cache();
        let payload: Vec<u8> = (0..200_000).map(|i| (i % 251) as u8).collect();
        let h = cache.store(Bytes::from(payload.clone()), "png", "big.png")?;
        let reader = cache.open_for_read(&h)?;
        let mut sink = VecSink(Vec::new());
        reader.copy_into(&mut sink).await?;
        assert_eq!(sink.0, payload);
        Ok(())
    }

    #[tokio::test]
    async fn first_open_latency_is_recorded_against_drag_end() -> anyhow::Result<()> {
        let (cache, clock, telemetry) = cache();
        let h = cache.store(Bytes::from_static(&[1]), "png", "a.png")?;
        clock.set(2_000);
        cache.on_drag_ended(true);
        clock.set(5_000);
        cache.open_for_read(&h)?;
        // A second open is not a first open.
        cache.open_for_read(&h)?;

        let durations = telemetry.durations.lock().unwrap();
        let recorded: Vec<_> = durations
            .iter()
            .filter(|(metric, _)| *metric == metrics::FIRST_OPEN_AFTER_DRAG_END_MS)
            .collect();
        assert_eq!(recorded, vec![&(metrics::FIRST_OPEN_AFTER_DRAG_END_MS, 3_000)]);
        Ok(())
    }

    #[tokio::test]
    async fn payload_size_and_handle_interval_are_recorded() -> anyhow::Result<()> {
        let (cache, clock, telemetry) = cache();
        cache.store(Bytes::from_static(&[1, 2, 3]), "png", "a.png")?;
        clock.set(1_500);
        cache.store(Bytes::from_static(&[4]), "png", "b.png")?;

        let sizes = telemetry.sizes.lock().unwrap();
        assert_eq!(
            *sizes,
            vec![
                (metrics::PAYLOAD_SIZE_BYTES, 3),
                (metrics::PAYLOAD_SIZE_BYTES, 1)
            ]
        );
        let durations = telemetry.durations.lock().unwrap();
        assert_eq!(
            *durations,
            vec![(metrics::HANDLE_CREATION_INTERVAL_MS, 500)]
        );
        Ok(())
    }
}
