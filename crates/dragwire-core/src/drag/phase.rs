//! Drag lifecycle state machine.
//!
//! The OS drag primitive reports its lifecycle through discrete callbacks;
//! rather than tracking those with scattered booleans, the coordinator drives
//! this explicit machine so the allowed transition set is visible and
//! testable. Transitions are pure: `(phase, event) -> Result<phase>`.
//!
//! ```text
//! Idle --DragRequested--> Armed --HostAccepted--> Dragging --DragEnded--> Ended
//!                           |                        |
//!                      HostRejected             DropReceived (stays Dragging)
//!                           v
//!                         Idle
//! ```
//!
//! `Reset` is accepted from every phase: per-drag cleanup must be able to run
//! unconditionally, even after a failed step.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    #[default]
    Idle,
    /// A drag was requested; the OS primitive has not accepted it yet.
    Armed,
    Dragging,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    DragRequested,
    HostAccepted,
    HostRejected,
    DropReceived,
    DragEnded,
    Reset,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhaseError {
    #[error("invalid drag transition: {from:?} does not accept {event:?}")]
    InvalidTransition { from: DragPhase, event: DragEvent },
}

impl DragPhase {
    pub fn apply(self, event: DragEvent) -> Result<DragPhase, PhaseError> {
        use DragEvent::*;
        use DragPhase::*;

        match (self, event) {
            (Idle, DragRequested) => Ok(Armed),
            (Armed, HostAccepted) => Ok(Dragging),
            (Armed, HostRejected) => Ok(Idle),
            (Dragging, DropReceived) => Ok(Dragging),
            (Dragging, DragEnded) => Ok(Ended),
            (_, Reset) => Ok(Idle),
            (from, event) => Err(PhaseError::InvalidTransition { from, event }),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragPhase::Dragging)
    }
}
