//! Per-frame shadow interpolation.

use super::config::ShadowConfig;
use super::layout::ShadowLayout;
use crate::geometry::{lerp, Rect};

/// Interpolates the shadow between its start and end layout.
///
/// Progress runs linearly from 0 to 1 over the configured duration, no
/// easing. `frame(0.0)` reproduces the start bounds exactly and `frame(1.0)`
/// the end bounds.
#[derive(Debug, Clone)]
pub struct ShadowAnimator {
    layout: ShadowLayout,
    start_corner_radius: f32,
    end_corner_radius: f32,
    min_opacity: f32,
    border_width: f32,
    duration_ms: u64,
}

/// One rendered animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowFrame {
    pub bounds: Rect,
    pub corner_radius: f32,
    pub opacity: f32,
    /// Stroke rect, outset from the bounds by half the border width. Drawn
    /// every frame with the same interpolated corner radius.
    pub border_stroke: Rect,
    pub border_width: f32,
}

impl ShadowAnimator {
    pub fn new(layout: ShadowLayout, cfg: &ShadowConfig) -> Self {
        // Size-corrected start radius: scaled by the start/end width ratio so
        // the radius tracks the shrinking bounds instead of jumping.
        let width_ratio = if layout.end_bounds.width > 0.0 {
            layout.start_bounds.width / layout.end_bounds.width
        } else {
            1.0
        };
        Self {
            start_corner_radius: cfg.end_corner_radius * width_ratio,
            end_corner_radius: cfg.end_corner_radius,
            min_opacity: cfg.min_opacity,
            border_width: cfg.border_width,
            duration_ms: cfg.animation_duration_ms,
            layout,
        }
    }

    pub fn layout(&self) -> &ShadowLayout {
        &self.layout
    }

    /// Linear progress for a tick `elapsed_ms` after the animation started.
    pub fn progress_at(&self, elapsed_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (elapsed_ms as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn frame(&self, progress: f32) -> ShadowFrame {
        let t = progress.clamp(0.0, 1.0);
        let bounds = Rect::lerp(&self.layout.start_bounds, &self.layout.end_bounds, t);
        ShadowFrame {
            corner_radius: lerp(self.start_corner_radius, self.end_corner_radius, t),
            opacity: lerp(1.0, self.min_opacity, t),
            border_stroke: bounds.inflate(self.border_width / 2.0),
            border_width: self.border_width,
            bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    fn animator() -> ShadowAnimator {
        let cfg = ShadowConfig {
            resize_ratio: 0.5,
            max_window_fraction: 0.5,
            min_size: 50.0,
            ..ShadowConfig::default()
        };
        let layout = ShadowLayout::compute(
            Size::new(200.0, 100.0),
            Point::new(100.0, 50.0),
            Size::new(1000.0, 1000.0),
            &cfg,
        );
        ShadowAnimator::new(layout, &cfg)
    }

    #[test]
    fn endpoints_reproduce_start_and_end_exactly() {
        let animator = animator();
        assert_eq!(animator.frame(0.0).bounds, animator.layout().start_bounds);
        assert_eq!(animator.frame(1.0).bounds, animator.layout().end_bounds);
    }

    #[test]
    fn interpolation_is_monotonic_without_overshoot() {
        let animator = animator();
        let start = animator.layout().start_bounds;
        let end = animator.layout().end_bounds;
        let mut previous = animator.frame(0.0);
        for step in 1..=10 {
            let frame = animator.frame(step as f32 / 10.0);
            // Width shrinks toward the end size, never below it.
            assert!(frame.bounds.width <= previous.bounds.width);
            assert!(frame.bounds.width >= end.width.min(start.width));
            assert!(frame.opacity <= previous.opacity);
            previous = frame;
        }
    }

    #[test]
    fn progress_clamps_out_of_range_input() {
        let animator = animator();
        assert_eq!(animator.frame(-1.0), animator.frame(0.0));
        assert_eq!(animator.frame(2.0), animator.frame(1.0));
    }

    #[test]
    fn progress_at_is_linear_over_the_duration() {
        let animator = animator();
        assert_eq!(animator.progress_at(0), 0.0);
        assert_eq!(animator.progress_at(150), 0.5);
        assert_eq!(animator.progress_at(300), 1.0);
        assert_eq!(animator.progress_at(1000), 1.0);
    }

    #[test]
    fn opacity_runs_from_opaque_to_min() {
        let animator = animator();
        assert_eq!(animator.frame(0.0).opacity, 1.0);
        assert_eq!(animator.frame(1.0).opacity, ShadowConfig::default().min_opacity);
    }

    #[test]
    fn border_stroke_sits_outside_the_bounds() {
        let animator = animator();
        let frame = animator.frame(0.5);
        let half = frame.border_width / 2.0;
        assert_eq!(frame.border_stroke, frame.bounds.inflate(half));
    }
}
