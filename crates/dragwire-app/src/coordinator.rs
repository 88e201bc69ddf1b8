//! Drag lifecycle coordination.
//!
//! Single entry point for starting a drag, plus the lifecycle callbacks the
//! OS drag primitive feeds back. The coordinator classifies the dragged
//! content, builds the transferable clip, parks large payloads in the cache,
//! computes the shadow, and keeps the session registry and telemetry honest
//! through drop and drag-end. It is not re-entrant across drags: one drag per
//! process, enforced by the phase machine and the session registry.

use std::sync::{Arc, Mutex};

use tracing::{debug, info_span, warn, Instrument};

use dragwire_core::drag::{
    classify, ClipData, DragDescriptor, DragEvent, DragPhase, DragTargetKind, MimeType,
    TransferFlags,
};
use dragwire_core::geometry::{Point, Size};
use dragwire_core::ids::{PayloadHandle, SessionToken, ShadowId, SourceId};
use dragwire_core::ports::telemetry::metrics;
use dragwire_core::ports::{
    ClockPort, DragHostPort, DragStartError, ExternalDropEvent, HostPolicyPort, TelemetryPort,
};
use dragwire_core::shadow::{ShadowConfig, ShadowLayout, ShadowSpec};

use crate::payload_cache::PayloadCacheService;
use crate::session::{DragSession, DragSessionRegistry};

pub struct DragLifecycleCoordinator {
    cache: Arc<PayloadCacheService>,
    sessions: Arc<DragSessionRegistry>,
    host: Arc<dyn DragHostPort>,
    policy: Arc<dyn HostPolicyPort>,
    telemetry: Arc<dyn TelemetryPort>,
    clock: Arc<dyn ClockPort>,
    shadow_config: ShadowConfig,
    active: Mutex<ActiveDrag>,
}

/// Per-drag bookkeeping. Reset to defaults unconditionally at drag end.
#[derive(Default)]
struct ActiveDrag {
    phase: DragPhase,
    token: Option<SessionToken>,
    kind: Option<DragTargetKind>,
    started_at_ms: Option<i64>,
    drop_occurred: bool,
    dropped_in_own_view: bool,
}

impl DragLifecycleCoordinator {
    pub fn new(
        cache: Arc<PayloadCacheService>,
        sessions: Arc<DragSessionRegistry>,
        host: Arc<dyn DragHostPort>,
        policy: Arc<dyn HostPolicyPort>,
        telemetry: Arc<dyn TelemetryPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            cache,
            sessions,
            host,
            policy,
            telemetry,
            clock,
            shadow_config: ShadowConfig::default(),
            active: Mutex::new(ActiveDrag::default()),
        }
    }

    pub fn with_shadow_config(mut self, shadow_config: ShadowConfig) -> Self {
        self.shadow_config = shadow_config;
        self
    }

    /// Starts a drag for `descriptor`, grabbed at `touch_offset` inside a
    /// source of `native_size`, in a window of `window_size`.
    ///
    /// On failure nothing visible happens: no session exists, the OS
    /// primitive was not invoked (or rejected the drag), and any cache entry
    /// created along the way has been evicted again.
    pub async fn begin_drag(
        &self,
        descriptor: &DragDescriptor,
        source: SourceId,
        touch_offset: Point,
        native_size: Size,
        window_size: Size,
    ) -> Result<(), DragStartError> {
        let kind = classify(descriptor);
        let span = info_span!(
            "dragwire.begin_drag",
            source = %source,
            kind = kind.label(),
        );
        self.begin_drag_inner(descriptor, source, kind, touch_offset, native_size, window_size)
            .instrument(span)
            .await
    }

    async fn begin_drag_inner(
        &self,
        descriptor: &DragDescriptor,
        source: SourceId,
        kind: DragTargetKind,
        touch_offset: Point,
        native_size: Size,
        window_size: Size,
    ) -> Result<(), DragStartError> {
        if self.policy.drag_gesture_blocked() && !self.policy.gesture_block_exempt() {
            debug!("drag rejected: conflicting input mode is active");
            return Err(DragStartError::GestureBlocked);
        }
        if kind == DragTargetKind::Invalid {
            debug!("drag rejected: descriptor classifies as invalid");
            return Err(DragStartError::NothingToDrag);
        }

        self.arm()?;

        let (clip, payload_handle) = match self.build_clip(descriptor, kind) {
            Ok(built) => built,
            Err(err) => {
                self.disarm();
                return Err(err);
            }
        };

        let mut flags = TransferFlags::for_kind(kind);
        if kind == DragTargetKind::OpaqueApplicationContent {
            flags = self.policy.adjust_opaque_flags(flags);
        }

        let layout = ShadowLayout::compute(native_size, touch_offset, window_size, &self.shadow_config);
        let shadow = ShadowSpec {
            id: ShadowId::new(),
            layout,
            animated: self.policy.animated_shadow_enabled(),
        };

        if let Err(err) = self.host.start_drag(&clip, &shadow, flags).await {
            // No partial state survives a rejected start.
            if payload_handle.is_some() {
                self.cache.evict_now();
            }
            self.disarm();
            warn!(error = %err, "drag host rejected drag start");
            return Err(DragStartError::HostRejected(err.to_string()));
        }

        let token = self.sessions.store(DragSession {
            source,
            kind,
            clip,
            payload_handle,
            shadow: Some(shadow.id),
        });

        let mut active = self.active.lock().expect("active drag lock");
        Self::advance(&mut active, DragEvent::HostAccepted);
        active.token = Some(token);
        active.kind = Some(kind);
        active.started_at_ms = Some(self.clock.now_ms());
        debug!("drag started");
        Ok(())
    }

    /// Platform "drop" callback for drops landing in this application.
    /// Returns the session for the receiving side, which may resolve the
    /// payload handle against the cache while the drop is being dispatched.
    pub fn on_drop(&self, inside_own_view: bool) -> Option<DragSession> {
        let now = self.clock.now_ms();
        {
            let mut active = self.active.lock().expect("active drag lock");
            if !active.phase.is_dragging() {
                debug!("drop ignored: no drag in progress");
                return None;
            }
            Self::advance(&mut active, DragEvent::DropReceived);
            active.drop_occurred = true;
            active.dropped_in_own_view = inside_own_view;
            if let Some(started) = active.started_at_ms {
                self.telemetry
                    .record_duration_ms(metrics::DROP_IN_VIEW_MS, now - started);
            }
        }
        self.sessions.get_for_active_drop()
    }

    /// Platform "drag ended" callback. `drop_accepted` is the host's verdict
    /// on whether any target took the payload.
    ///
    /// Every per-drag resource is released here, and the per-drag fields are
    /// reset unconditionally, even when an earlier step of the drag failed.
    pub fn on_drag_ended(&self, drop_accepted: bool) {
        self.finish_drag(drop_accepted);
        self.reset();
    }

    /// A drop arriving from another process while no local drag is active:
    /// acquire whatever access grant the platform requires and release it
    /// straight away. No retry, no long-lived handle.
    pub async fn on_external_drop(&self, event: &ExternalDropEvent) -> anyhow::Result<()> {
        if self.sessions.has_active() {
            // A local drag owns this drop; nothing external to do.
            return Ok(());
        }
        if !self.policy.external_drop_enabled() {
            debug!("external drop ignored: embedder does not accept them");
            return Ok(());
        }
        if !event.is_drop() {
            return Ok(());
        }
        let grant = self.host.acquire_drop_permissions(event).await?;
        debug!("external drop permission acquired");
        self.host.release_drop_permissions(grant).await
    }

    pub fn is_dragging(&self) -> bool {
        self.active
            .lock()
            .expect("active drag lock")
            .phase
            .is_dragging()
    }

    fn build_clip(
        &self,
        descriptor: &DragDescriptor,
        kind: DragTargetKind,
    ) -> Result<(ClipData, Option<PayloadHandle>), DragStartError> {
        match kind {
            DragTargetKind::Text => {
                let text = descriptor
                    .text
                    .clone()
                    .ok_or(DragStartError::NothingToDrag)?;
                Ok((ClipData::Text { text }, None))
            }
            DragTargetKind::Image => {
                let image = descriptor
                    .image
                    .as_ref()
                    .ok_or(DragStartError::NothingToDrag)?;
                let handle = self.cache.store(
                    image.get_content(),
                    &image.extension,
                    &image.display_name,
                )?;
                let clip = ClipData::CachedPayload {
                    handle: handle.clone(),
                    mime: MimeType::from_extension(&image.extension),
                    display_name: image.display_name.clone(),
                };
                Ok((clip, Some(handle)))
            }
            DragTargetKind::Link => {
                let link = descriptor
                    .link
                    .as_ref()
                    .ok_or(DragStartError::NothingToDrag)?;
                let accompanying = descriptor.text.as_deref().filter(|text| !text.is_empty());
                let clip = match self.policy.link_activation_intent(&link.url) {
                    Some(intent) => ClipData::Link {
                        url: link.url.clone(),
                        display: link
                            .title
                            .clone()
                            .or_else(|| accompanying.map(str::to_string))
                            .unwrap_or_else(|| link.url.clone()),
                        intent: Some(intent),
                    },
                    // No rich representation available; fall back to text.
                    None => ClipData::Text {
                        text: match accompanying {
                            Some(text) => format!("{text}\n{}", link.url),
                            None => link.url.clone(),
                        },
                    },
                };
                Ok((clip, None))
            }
            DragTargetKind::OpaqueApplicationContent => {
                let content = descriptor
                    .app_content
                    .as_ref()
                    .ok_or(DragStartError::NothingToDrag)?;
                let clip = self
                    .policy
                    .opaque_clip(content)
                    .map_err(|err| DragStartError::ClipUnavailable(err.to_string()))?;
                Ok((clip, None))
            }
            DragTargetKind::Invalid => Err(DragStartError::NothingToDrag),
        }
    }

    fn finish_drag(&self, drop_accepted: bool) {
        let now = self.clock.now_ms();
        let (token, kind, started_at_ms, drop_occurred, dropped_in_own_view) = {
            let mut active = self.active.lock().expect("active drag lock");
            Self::advance(&mut active, DragEvent::DragEnded);
            (
                active.token.clone(),
                active.kind,
                active.started_at_ms,
                active.drop_occurred,
                active.dropped_in_own_view,
            )
        };

        if !dropped_in_own_view {
            if let Some(started) = started_at_ms {
                // A drop observed locally counts as a drop even if the host
                // reports the payload as unclaimed.
                let metric = if drop_accepted || drop_occurred {
                    metrics::DRAG_DURATION_DROPPED_MS
                } else {
                    metrics::DRAG_DURATION_CANCELED_MS
                };
                self.telemetry.record_duration_ms(metric, now - started);
            }
            if let Some(kind) = kind {
                self.telemetry.record_tag(metrics::DRAG_TARGET_KIND, kind.label());
            }
        }

        self.cache.on_drag_ended(drop_accepted);

        if let Some(token) = token {
            if let Err(err) = self.sessions.clear(&token) {
                warn!(error = %err, "failed to clear drag session at drag end");
            }
        }
    }

    fn arm(&self) -> Result<(), DragStartError> {
        let mut active = self.active.lock().expect("active drag lock");
        match active.phase.apply(DragEvent::DragRequested) {
            Ok(next) => {
                active.phase = next;
                Ok(())
            }
            Err(_) => Err(DragStartError::DragInProgress),
        }
    }

    fn disarm(&self) {
        let mut active = self.active.lock().expect("active drag lock");
        Self::advance(&mut active, DragEvent::HostRejected);
    }

    fn advance(active: &mut ActiveDrag, event: DragEvent) {
        match active.phase.apply(event) {
            Ok(next) => active.phase = next,
            Err(err) => warn!(error = %err, "drag phase transition refused"),
        }
    }

    fn reset(&self) {
        let mut active = self.active.lock().expect("active drag lock");
        *active = ActiveDrag::default();
    }
}
