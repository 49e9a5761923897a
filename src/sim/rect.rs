//! Axis-aligned rectangle geometry
//!
//! The simulation's spatial primitive: agents, obstacles and the arena all
//! collide through axis-aligned rects. Agent rects follow an integer-center
//! convention (center equals the rounded continuous position) so collision
//! results are stable under sub-pixel drift.

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

    /// Build a rect of the given size centered on the rounded position
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        let cx = center.x.round();
        let cy = center.y.round();
        Self::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    /// Square rect for a circular agent of the given radius
    pub fn from_agent(center: Vec2, radius: f32) -> Self {
        Self::from_center(center, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Recenter on the rounded position, keeping size
    pub fn set_center(&mut self, center: Vec2) {
        let cx = center.x.round();
        let cy = center.y.round();
        self.x = cx - self.w / 2.0;
        self.y = cy - self.h / 2.0;
    }

    /// Grow (or shrink, when negative) by `dx`/`dy` total, keeping center
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.x - dx / 2.0,
            self.y - dy / 2.0,
            self.w + dx,
            self.h + dy,
        )
    }

    /// True iff `other` lies fully inside this rect
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// True iff this rect overlaps `other` (shared edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Overlap region with `other`, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.left().max(other.left());
        let y = self.top().max(other.top());
        let r = self.right().min(other.right());
        let b = self.bottom().min(other.bottom());
        if x < r && y < b {
            Some(Rect::new(x, y, r - x, b - y))
        } else {
            None
        }
    }

    /// Smallest translation of this rect that fits inside `outer`.
    ///
    /// Matches clamp semantics: a rect larger than `outer` ends up centered
    /// on the violated axis.
    pub fn clamp_within(&self, outer: &Rect) -> Self {
        let mut out = *self;
        if out.w >= outer.w {
            out.x = outer.x + (outer.w - out.w) / 2.0;
        } else if out.left() < outer.left() {
            out.x = outer.left();
        } else if out.right() > outer.right() {
            out.x = outer.right() - out.w;
        }
        if out.h >= outer.h {
            out.y = outer.y + (outer.h - out.h) / 2.0;
        } else if out.top() < outer.top() {
            out.y = outer.top();
        } else if out.bottom() > outer.bottom() {
            out.y = outer.bottom() - out.h;
        }
        out
    }

    /// Euclidean gap between the nearest edges of two rects.
    ///
    /// The per-axis gap is zero when the rects overlap on that axis, so
    /// rects that overlap on both axes have distance zero.
    pub fn gap_distance(&self, other: &Rect) -> f32 {
        let gap_x = if self.right() < other.left() {
            other.left() - self.right()
        } else if other.right() < self.left() {
            self.left() - other.right()
        } else {
            0.0
        };
        let gap_y = if self.bottom() < other.top() {
            other.top() - self.bottom()
        } else if other.bottom() < self.top() {
            self.top() - other.bottom()
        } else {
            0.0
        };
        (gap_x * gap_x + gap_y * gap_y).sqrt()
    }

    /// True iff the closed segment `a -> b` passes through this rect.
    ///
    /// Liang-Barsky clipping; cheaper than closest-point-of-approach and
    /// exact for axis-aligned rects.
    pub fn clips_segment(&self, a: Vec2, b: Vec2) -> bool {
        let d = b - a;
        let mut t0 = 0.0_f32;
        let mut t1 = 1.0_f32;

        // (p, q) per clip edge: p is the direction component against the
        // edge, q the distance from a to the edge
        let edges = [
            (-d.x, a.x - self.left()),
            (d.x, self.right() - a.x),
            (-d.y, a.y - self.top()),
            (d.y, self.bottom() - a.y),
        ];

        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return false; // parallel and outside
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    if r > t1 {
                        return false;
                    }
                    if r > t0 {
                        t0 = r;
                    }
                } else {
                    if r < t0 {
                        return false;
                    }
                    if r < t1 {
                        t1 = r;
                    }
                }
            }
        }
        t0 <= t1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_center_rounds_position() {
        let r = Rect::from_agent(Vec2::new(100.4, 50.6), 15.0);
        assert_eq!(r.center(), Vec2::new(100.0, 51.0));
        assert_eq!(r.w, 30.0);
    }

    #[test]
    fn test_intersects_and_containment() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(2.0, 2.0, 4.0, 4.0);
        assert!(a.intersects(&b));
        assert!(a.contains_rect(&c));
        assert!(!a.contains_rect(&b));
        // Edge contact is not an overlap
        let d = Rect::new(10.0, 0.0, 5.0, 5.0);
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_intersection_extents() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(6.0, 2.0, 10.0, 4.0);
        let clip = a.intersection(&b).unwrap();
        assert_eq!(clip, Rect::new(6.0, 2.0, 4.0, 4.0));
        assert!(a.intersection(&Rect::new(20.0, 20.0, 5.0, 5.0)).is_none());
    }

    #[test]
    fn test_clamp_within_translates_minimally() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let r = Rect::new(-5.0, 40.0, 10.0, 10.0);
        let clamped = r.clamp_within(&outer);
        assert_eq!(clamped.left(), 0.0);
        assert_eq!(clamped.top(), 40.0);
        // Already inside: untouched
        let inside = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert_eq!(inside.clamp_within(&outer), inside);
    }

    #[test]
    fn test_gap_distance_axis_and_diagonal() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Pure horizontal gap
        let b = Rect::new(15.0, 0.0, 10.0, 10.0);
        assert!((a.gap_distance(&b) - 5.0).abs() < 1e-6);
        // Diagonal gap: 3-4-5 triangle
        let c = Rect::new(13.0, 14.0, 10.0, 10.0);
        assert!((a.gap_distance(&c) - 5.0).abs() < 1e-6);
        // Overlap on both axes
        let d = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.gap_distance(&d), 0.0);
    }

    #[test]
    fn test_clips_segment() {
        let r = Rect::new(10.0, 10.0, 10.0, 10.0);
        // Straight through
        assert!(r.clips_segment(Vec2::new(0.0, 15.0), Vec2::new(30.0, 15.0)));
        // Misses above
        assert!(!r.clips_segment(Vec2::new(0.0, 5.0), Vec2::new(30.0, 5.0)));
        // Diagonal corner graze
        assert!(r.clips_segment(Vec2::new(5.0, 15.0), Vec2::new(15.0, 25.0)));
        // Fully inside
        assert!(r.clips_segment(Vec2::new(12.0, 12.0), Vec2::new(18.0, 18.0)));
        // Ends before the rect
        assert!(!r.clips_segment(Vec2::new(0.0, 15.0), Vec2::new(5.0, 15.0)));
    }

    proptest! {
        #[test]
        fn prop_clamp_result_is_contained(
            x in -200.0_f32..200.0,
            y in -200.0_f32..200.0,
            w in 1.0_f32..50.0,
            h in 1.0_f32..50.0,
        ) {
            let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
            let clamped = Rect::new(x, y, w, h).clamp_within(&outer);
            prop_assert!(outer.contains_rect(&clamped));
        }
    }
}
