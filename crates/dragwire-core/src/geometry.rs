//! Minimal 2D geometry used by the shadow engine.
//!
//! All rectangles live in one shared coordinate space; the shadow layout
//! translates everything into non-negative canvas coordinates before handing
//! it to a renderer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    pub fn short_side(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn long_side(&self) -> f32 {
        self.width.max(self.height)
    }

    /// A source this small cannot produce a usable shadow image.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 1.0 || self.height <= 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn centered_at(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Grows the rectangle by `amount` on all four sides. A negative amount
    /// shrinks it.
    pub fn inflate(&self, amount: f32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Component-wise linear interpolation between two rectangles.
    pub fn lerp(from: &Rect, to: &Rect, t: f32) -> Rect {
        Rect::new(
            lerp(from.x, to.x, t),
            lerp(from.y, to.y, t),
            lerp(from.width, to.width, t),
            lerp(from.height, to.height, t),
        )
    }
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_covers_both_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -5.0, 10.0, 10.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(0.0, -5.0, 15.0, 15.0));
    }

    #[test]
    fn inflate_grows_all_sides() {
        let r = Rect::new(2.0, 2.0, 4.0, 4.0).inflate(1.0);
        assert_eq!(r, Rect::new(1.0, 1.0, 6.0, 6.0));
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Rect::new(0.0, 0.0, 100.0, 40.0);
        let b = Rect::new(30.0, 10.0, 50.0, 20.0);
        assert_eq!(Rect::lerp(&a, &b, 0.0), a);
        assert_eq!(Rect::lerp(&a, &b, 1.0), b);
    }

    #[test]
    fn centered_at_centers_the_size() {
        let r = Rect::centered_at(Point::new(10.0, 10.0), Size::new(4.0, 8.0));
        assert_eq!(r, Rect::new(8.0, 6.0, 4.0, 8.0));
    }
}
