//! Axis-aligned rectangle geometry for sprites and hitboxes
//!
//! A rectangle is defined by its top-left corner and its size, in screen
//! space (y grows downward).

use glam::Vec2;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Check if `other` lies entirely inside this rectangle (edges may touch)
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Check if the two rectangles share interior area
    ///
    /// Rectangles that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Grow (positive) or shrink (negative) the rectangle around its center.
    ///
    /// `dw` and `dh` are totals, so each side moves by half of them. Sizes are
    /// clamped at zero.
    pub fn inflate(&self, dw: f32, dh: f32) -> Rect {
        let size = (self.size + Vec2::new(dw, dh)).max(Vec2::ZERO);
        let pos = self.center() - size * 0.5;
        Rect { pos, size }
    }

    /// Same rectangle moved to a new top-left corner
    pub fn at(&self, pos: Vec2) -> Rect {
        Rect { pos, size: self.size }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inner_and_edges() {
        let screen = Rect::new(0.0, 0.0, 640.0, 480.0);
        assert!(screen.contains(&Rect::new(10.0, 10.0, 32.0, 32.0)));
        // Flush with the bottom-right corner is still inside
        assert!(screen.contains(&Rect::new(608.0, 448.0, 32.0, 32.0)));
        assert!(!screen.contains(&Rect::new(609.0, 10.0, 32.0, 32.0)));
        assert!(!screen.contains(&Rect::new(-0.5, 10.0, 32.0, 32.0)));
    }

    #[test]
    fn test_intersects_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Sharing an edge is not an overlap
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_inflate_shrinks_around_center() {
        let r = Rect::new(100.0, 100.0, 32.0, 32.0).inflate(-14.0, -14.0);
        assert_eq!(r, Rect::new(107.0, 107.0, 18.0, 18.0));
        assert_eq!(r.center(), Vec2::new(116.0, 116.0));
    }

    #[test]
    fn test_inflate_never_negative() {
        let r = Rect::new(0.0, 0.0, 4.0, 4.0).inflate(-10.0, -10.0);
        assert_eq!(r.size, Vec2::ZERO);
    }
}
