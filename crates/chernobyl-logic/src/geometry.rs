//! Axis-aligned rectangle math.
//!
//! Everything in the game is a rectangle in canvas space: origin top-left,
//! y grows downward. Square entities (player, enemies) go through
//! [`Rect::square`] so collision code never cares which shape it has.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn square(x: f32, y: f32, size: f32) -> Self {
        Self {
            x,
            y,
            w: size,
            h: size,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict half-open overlap on both axes. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Move the rectangle so it lies fully inside `[0, width] × [0, height]`.
    pub fn clamped_to(&self, width: f32, height: f32) -> Self {
        let (x, y) = clamp_position(self.x, self.y, self.w, self.h, width, height);
        Self { x, y, ..*self }
    }

    /// Whether the rectangle lies fully inside `[0, width] × [0, height]`.
    pub fn inside(&self, width: f32, height: f32) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= width && self.bottom() <= height
    }
}

/// A position in canvas space (top-left of whatever sits there).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Free-function form of [`Rect::overlaps`].
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Clamp a top-left position so a `w × h` box stays inside the canvas.
pub fn clamp_position(x: f32, y: f32, w: f32, h: f32, width: f32, height: f32) -> (f32, f32) {
    (
        x.max(0.0).min((width - w).max(0.0)),
        y.max(0.0).min((height - h).max(0.0)),
    )
}

/// Sign that is zero at zero. `f32::signum` returns 1.0 for +0.0.
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn overlap_is_symmetric() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(9.9, 0.0, 5.0, 5.0),
            Rect::new(-3.0, -3.0, 3.0, 3.0),
            Rect::new(2.0, 2.0, 1.0, 1.0),
            Rect::square(50.0, 50.0, 24.0),
            Rect::new(0.0, 0.0, 600.0, 400.0),
            Rect::new(10.0, 5.0, 0.0, 0.0),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(overlaps(a, b), overlaps(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn containment_counts_as_overlap() {
        let outer = Rect::new(0.0, 0.0, 600.0, 400.0);
        let inner = Rect::square(300.0, 200.0, 24.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn clamp_keeps_box_inside() {
        let r = Rect::square(590.0, -5.0, 24.0).clamped_to(600.0, 400.0);
        assert_eq!(r.x, 576.0);
        assert_eq!(r.y, 0.0);
        assert!(r.inside(600.0, 400.0));
    }

    #[test]
    fn sign_is_zero_at_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }
}
