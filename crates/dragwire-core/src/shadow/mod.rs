//! Shadow geometry engine.
//!
//! Computes the visual drag affordance: the layout of the shadow between its
//! "picked up" bounds (the untransformed source) and its "centered under the
//! finger" bounds, and the per-frame interpolation between the two.

mod animation;
mod config;
mod layout;

use serde::{Deserialize, Serialize};

pub use animation::{ShadowAnimator, ShadowFrame};
pub use config::ShadowConfig;
pub use layout::{Axis, ShadowLayout};

use crate::ids::ShadowId;

/// Everything the OS drag primitive needs to render the shadow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowSpec {
    pub id: ShadowId,
    pub layout: ShadowLayout,
    /// When false the host renders the end-state frame statically.
    pub animated: bool,
}
