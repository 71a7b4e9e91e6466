//! Axis-aligned rectangles and the overlap test
//!
//! All collision in this game reduces to AABB overlap: the bird is a square
//! centered on its position, each pipe is two solid rectangles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` centered at `center`
    pub fn centered_square(center: Vec2, size: f32) -> Self {
        let half = size / 2.0;
        Self {
            x: center.x - half,
            y: center.y - half,
            w: size,
            h: size,
        }
    }

    /// Strict open-interior overlap test.
    ///
    /// Touching edges (zero-area intersection) do not count as overlap, so a
    /// bird grazing a pipe face exactly is still alive.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(10.0, 10.0, 10.0, 10.0);
        // Shares the x=20 edge only
        let b = Rect::new(20.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        // One pixel of actual overlap
        let c = Rect::new(19.0, 10.0, 10.0, 10.0);
        assert!(a.overlaps(&c));
        // Shared corner point only
        let d = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_disjoint() {
        let a = Rect::new(0.0, 0.0, 5.0, 5.0);
        let b = Rect::new(100.0, 100.0, 5.0, 5.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_centered_square() {
        let r = Rect::centered_square(Vec2::new(50.0, 30.0), 20.0);
        assert_eq!(r, Rect::new(40.0, 20.0, 20.0, 20.0));
    }
}
