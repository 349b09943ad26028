//! Axis-aligned rectangle geometry for hitboxes
//!
//! A rect is its top-left corner plus a size, in window pixels with y
//! growing downward.

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

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Non-empty intersection test. Rects that only share an edge do not overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Move by an offset
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }
}

/// Anything with a hitbox
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_containment_intersects() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_translate() {
        let mut r = Rect::new(10.0, 20.0, 5.0, 5.0);
        r.translate(Vec2::new(-4.0, 1.0));
        assert_eq!(r.left(), 6.0);
        assert_eq!(r.top(), 21.0);
        assert_eq!(r.right(), 11.0);
        assert_eq!(r.bottom(), 26.0);
    }
}
