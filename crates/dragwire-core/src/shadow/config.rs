use serde::{Deserialize, Serialize};

/// Tuning knobs for shadow sizing and animation.
///
/// All lengths are in device-independent pixels, in the same coordinate space
/// as the window size handed to [`super::ShadowLayout::compute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowConfig {
    /// Uniform scale applied to the source's native size first.
    pub resize_ratio: f32,
    /// Neither target dimension may exceed this fraction of the window.
    pub max_window_fraction: f32,
    /// Short side of the target is scaled up to at least this.
    pub min_size: f32,
    /// Border stroke width; also the canvas inflation amount.
    pub border_width: f32,
    /// Corner radius at the end of the animation. The start radius is derived
    /// from this, corrected for the start/end size ratio.
    pub end_corner_radius: f32,
    /// Opacity the shadow settles at (start is fully opaque).
    pub min_opacity: f32,
    /// Linear animation duration, no easing.
    pub animation_duration_ms: u64,
    /// Side length of the placeholder glyph substituted for degenerate
    /// sources.
    pub placeholder_size: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            resize_ratio: 0.6,
            max_window_fraction: 0.35,
            min_size: 48.0,
            border_width: 2.0,
            end_corner_radius: 8.0,
            min_opacity: 0.6,
            animation_duration_ms: 300,
            placeholder_size: 48.0,
        }
    }
}
