//! Collision resolution between entity collections
//!
//! Resolution never mutates anything: it returns index sets describing what
//! should be removed or transitioned, and the caller applies them afterwards.

use super::rect::{Bounded, Rect};
use crate::consts::{BOUNDARY_OFFSET, BOUNDARY_THICKNESS, WINDOW_HEIGHT, WINDOW_WIDTH};

/// All overlapping pairs `(index in a, index in b)`, ordered by `a` then `b`
pub fn overlaps<A: Bounded, B: Bounded>(a: &[A], b: &[B]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, ea) in a.iter().enumerate() {
        let ra = ea.bounds();
        for (j, eb) in b.iter().enumerate() {
            if ra.intersects(&eb.bounds()) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Indices of `group` members overlapping `target`
pub fn colliding_with<T: Bounded, G: Bounded>(target: &T, group: &[G]) -> Vec<usize> {
    let rect = target.bounds();
    group
        .iter()
        .enumerate()
        .filter(|(_, e)| rect.intersects(&e.bounds()))
        .map(|(i, _)| i)
        .collect()
}

/// Outcome of meteoroid-vs-bullet resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletHits {
    /// Each hit meteoroid once, ascending
    pub meteoroids: Vec<usize>,
    /// Every bullet that touched any meteoroid, ascending
    pub bullets: Vec<usize>,
}

impl BulletHits {
    pub fn is_empty(&self) -> bool {
        self.meteoroids.is_empty()
    }
}

/// A meteoroid touched by any number of bullets is hit once; every bullet
/// that touched a meteoroid is consumed.
pub fn resolve_bullet_hits<M: Bounded, B: Bounded>(meteoroids: &[M], bullets: &[B]) -> BulletHits {
    let mut hits = BulletHits::default();
    for (m, b) in overlaps(meteoroids, bullets) {
        if hits.meteoroids.last() != Some(&m) {
            hits.meteoroids.push(m);
        }
        hits.bullets.push(b);
    }
    hits.bullets.sort_unstable();
    hits.bullets.dedup();
    hits
}

/// Off-screen sentinel strip that prunes entities crossing it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub rect: Rect,
    side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Boundary {
    /// Sentinel past the left edge, for meteoroids
    pub fn left() -> Self {
        Self {
            rect: Rect::new(-BOUNDARY_OFFSET, 0.0, BOUNDARY_THICKNESS, WINDOW_HEIGHT),
            side: Side::Left,
        }
    }

    /// Sentinel past the right edge, for bullets
    pub fn right() -> Self {
        Self {
            rect: Rect::new(WINDOW_WIDTH + BOUNDARY_OFFSET, 0.0, BOUNDARY_THICKNESS, WINDOW_HEIGHT),
            side: Side::Right,
        }
    }

    /// Whether `rect` touches the sentinel or has already moved past it.
    /// Fast entities can skip over the thin strip in one tick; they still
    /// count.
    pub fn has_crossed(&self, rect: &Rect) -> bool {
        match self.side {
            Side::Left => rect.left() < self.rect.right(),
            Side::Right => rect.right() > self.rect.left(),
        }
    }

    /// Indices of `group` members this sentinel removes
    pub fn crossed<T: Bounded>(&self, group: &[T]) -> Vec<usize> {
        group
            .iter()
            .enumerate()
            .filter(|(_, e)| self.has_crossed(&e.bounds()))
            .map(|(i, _)| i)
            .collect()
    }
}
