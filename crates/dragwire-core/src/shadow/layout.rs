//! Shadow sizing and layout.

use serde::{Deserialize, Serialize};

use super::config::ShadowConfig;
use crate::geometry::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The computed geometry for one drag shadow.
///
/// All rectangles share the canvas coordinate space; the canvas origin is
/// `(0, 0)` and every coordinate is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowLayout {
    /// The untransformed source rectangle ("picked up" state).
    pub start_bounds: Rect,
    /// The resized rectangle, centered at the touch point, or anchored so the
    /// finger hits [`Self::touch_in_shadow`] when the target was truncated.
    pub end_bounds: Rect,
    /// Union of start and end, inflated by the border width.
    pub canvas_bounds: Rect,
    /// Touch position mapped into end-bounds space, rescaled and clamped when
    /// the target was truncated.
    pub touch_in_shadow: Point,
    pub truncated_axis: Option<Axis>,
    /// A degenerate source was replaced by the placeholder glyph.
    pub placeholder: bool,
}

impl ShadowLayout {
    /// Computes the shadow layout for a source of `native` size, grabbed at
    /// `touch_offset` (in source coordinates), inside a window of `window`
    /// size.
    ///
    /// Sizing: native × resize ratio, uniformly clamped so neither dimension
    /// exceeds the window cap, uniformly scaled up if the short side falls
    /// under the minimum, and finally truncated on the long axis alone if the
    /// scale-up pushed it back over the cap. Truncation on both axes at once
    /// cannot be produced by this rule and is a precondition violation.
    pub fn compute(
        native: Size,
        touch_offset: Point,
        window: Size,
        cfg: &ShadowConfig,
    ) -> ShadowLayout {
        if native.is_degenerate() {
            return Self::placeholder_layout(touch_offset, cfg);
        }

        let cap_w = window.width * cfg.max_window_fraction;
        let cap_h = window.height * cfg.max_window_fraction;

        let mut width = native.width * cfg.resize_ratio;
        let mut height = native.height * cfg.resize_ratio;

        // Uniform downscale preserving aspect ratio.
        let downscale = (cap_w / width).min(cap_h / height).min(1.0);
        width *= downscale;
        height *= downscale;

        // Uniform scale-up of undersized shadows; only the long axis can end
        // up over its cap afterwards.
        let mut truncated_axis = None;
        let (mut full_width, mut full_height) = (width, height);
        let short_side = width.min(height);
        if short_side < cfg.min_size {
            let upscale = cfg.min_size / short_side;
            width *= upscale;
            height *= upscale;
            full_width = width;
            full_height = height;

            debug_assert!(
                !(width > cap_w && height > cap_h),
                "shadow truncation on both axes is a precondition violation"
            );
            if width > cap_w {
                truncated_axis = Some(Axis::Horizontal);
                width = cap_w;
            } else if height > cap_h {
                truncated_axis = Some(Axis::Vertical);
                height = cap_h;
            }
        }

        let target = Size::new(width, height);

        // Touch offset mapped into the (possibly truncated) target space.
        let touch_in_shadow = Point::new(
            (touch_offset.x * full_width / native.width).clamp(0.0, width),
            (touch_offset.y * full_height / native.height).clamp(0.0, height),
        );

        let start_bounds = Rect::from_size(native);
        // A truncated target is anchored so the finger lands on the rescaled
        // touch point; centering would put the finger off the visible part.
        let end_bounds = if truncated_axis.is_some() {
            Rect::new(
                touch_offset.x - touch_in_shadow.x,
                touch_offset.y - touch_in_shadow.y,
                target.width,
                target.height,
            )
        } else {
            Rect::centered_at(touch_offset, target)
        };
        Self::normalized(
            start_bounds,
            end_bounds,
            touch_in_shadow,
            truncated_axis,
            false,
            cfg,
        )
    }

    /// A 1x1 (or otherwise degenerate) source is not a usable shadow image;
    /// a fixed-size glyph stands in and is never scaled.
    fn placeholder_layout(touch_offset: Point, cfg: &ShadowConfig) -> ShadowLayout {
        let size = Size::square(cfg.placeholder_size);
        let start_bounds = Rect::centered_at(touch_offset, size);
        let end_bounds = start_bounds;
        let touch_in_shadow = Point::new(size.width / 2.0, size.height / 2.0);
        Self::normalized(start_bounds, end_bounds, touch_in_shadow, None, true, cfg)
    }

    fn normalized(
        start_bounds: Rect,
        end_bounds: Rect,
        touch_in_shadow: Point,
        truncated_axis: Option<Axis>,
        placeholder: bool,
        cfg: &ShadowConfig,
    ) -> ShadowLayout {
        let canvas = start_bounds.union(&end_bounds).inflate(cfg.border_width);
        let (dx, dy) = (-canvas.x, -canvas.y);
        ShadowLayout {
            start_bounds: start_bounds.translate(dx, dy),
            end_bounds: end_bounds.translate(dx, dy),
            canvas_bounds: canvas.translate(dx, dy),
            touch_in_shadow,
            truncated_axis,
            placeholder,
        }
    }
}
