//! Process-wide drag session, guarded by a capability token.
//!
//! At most one drag session exists per process. The registry is an explicit,
//! constructor-injected shared handle (wrap it in an [`std::sync::Arc`]), not
//! a process-global, so ownership stays visible and tests stay isolated.

use std::sync::Mutex;

use tracing::warn;

use dragwire_core::drag::{ClipData, DragTargetKind};
use dragwire_core::ids::{PayloadHandle, SessionToken, ShadowId, SourceId};
use dragwire_core::ports::SessionError;

/// The state describing the active drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub source: SourceId,
    pub kind: DragTargetKind,
    pub clip: ClipData,
    /// Cache handle when the drag carries a large binary payload.
    pub payload_handle: Option<PayloadHandle>,
    pub shadow: Option<ShadowId>,
}

struct ActiveSession {
    token: SessionToken,
    session: DragSession,
}

/// Single-slot session store. `Empty -> Active` on [`store`](Self::store),
/// `Active -> Empty` on [`clear`](Self::clear) with the matching token.
#[derive(Default)]
pub struct DragSessionRegistry {
    inner: Mutex<Option<ActiveSession>>,
}

impl DragSessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the session and mints the token that owns it.
    ///
    /// Storing while a session is active is a caller bug: the coordinator
    /// refuses to start a second drag, so this path is unreachable through
    /// normal use. If it happens anyway the old session is overwritten and a
    /// warning is logged; `store` stays infallible.
    pub fn store(&self, session: DragSession) -> SessionToken {
        let token = SessionToken::mint();
        let mut slot = self.inner.lock().expect("drag session lock");
        if let Some(active) = slot.as_ref() {
            warn!(
                source = %active.session.source,
                kind = active.session.kind.label(),
                "drag session already active; overwriting"
            );
        }
        *slot = Some(ActiveSession {
            token: token.clone(),
            session,
        });
        token
    }

    /// The session, if `token` is the one minted for it.
    pub fn get(&self, token: &SessionToken) -> Option<DragSession> {
        self.inner
            .lock()
            .expect("drag session lock")
            .as_ref()
            .filter(|active| active.token == *token)
            .map(|active| active.session.clone())
    }

    /// Read path for a party that does not hold the token, e.g. the window
    /// receiving the drop.
    ///
    /// Precondition: only call while dispatching a platform "drop" signal.
    /// That assertion is the caller's; the registry cannot verify it.
    pub fn get_for_active_drop(&self) -> Option<DragSession> {
        self.inner
            .lock()
            .expect("drag session lock")
            .as_ref()
            .map(|active| active.session.clone())
    }

    /// Removes the session. A mismatched token is a logic error: it is
    /// flagged and the active session stays untouched.
    pub fn clear(&self, token: &SessionToken) -> Result<(), SessionError> {
        let mut slot = self.inner.lock().expect("drag session lock");
        match slot.as_ref() {
            None => {
                warn!("session clear requested but no session is active");
                Err(SessionError::NoActiveSession)
            }
            Some(active) if active.token != *token => {
                warn!("session clear requested with a mismatched token");
                Err(SessionError::TokenMismatch)
            }
            Some(_) => {
                *slot = None;
                Ok(())
            }
        }
    }

    pub fn has_active(&self) -> bool {
        self.inner.lock().expect("drag session lock").is_some()
    }
}
