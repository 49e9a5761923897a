//! Arena bounds and wall containment
//!
//! The arena is a static rectangle with a wall margin. Everything that moves
//! must stay inside the inner (wall-adjusted) bounds; the arena only answers
//! containment and clamping queries.

use super::rect::Rect;
use crate::consts::WALL_THICKNESS;

/// Bounded rectangular play area. One instance per level, immutable.
#[derive(Debug, Clone)]
pub struct Arena {
    bounds: Rect,
    wall_thickness: f32,
}

impl Arena {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            wall_thickness: WALL_THICKNESS,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn wall_thickness(&self) -> f32 {
        self.wall_thickness
    }

    /// Playable area: bounds shrunk by the wall thickness on each side
    pub fn inner_bounds(&self) -> Rect {
        self.bounds
            .inflate(-self.wall_thickness * 2.0, -self.wall_thickness * 2.0)
    }

    /// True iff `rect` lies fully inside the inner bounds
    pub fn contains(&self, rect: &Rect) -> bool {
        self.inner_bounds().contains_rect(rect)
    }

    /// Smallest translation of `rect` that satisfies containment
    pub fn clamp(&self, rect: &Rect) -> Rect {
        rect.clamp_within(&self.inner_bounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn test_arena() -> Arena {
        Arena::new(Rect::new(50.0, 50.0, 700.0, 500.0))
    }

    #[test]
    fn test_inner_bounds_shrunk_by_walls() {
        let arena = test_arena();
        let inner = arena.inner_bounds();
        assert_eq!(inner, Rect::new(60.0, 60.0, 680.0, 480.0));
    }

    #[test]
    fn test_contains_respects_walls() {
        let arena = test_arena();
        // Touching the outer bounds but inside the wall band: rejected
        let hugging_wall = Rect::new(52.0, 52.0, 30.0, 30.0);
        assert!(!arena.contains(&hugging_wall));
        let inside = Rect::from_agent(Vec2::new(400.0, 300.0), 15.0);
        assert!(arena.contains(&inside));
    }

    #[test]
    fn test_clamp_pushes_inside() {
        let arena = test_arena();
        let outside = Rect::new(0.0, 0.0, 30.0, 30.0);
        let clamped = arena.clamp(&outside);
        assert!(arena.contains(&clamped));
        assert_eq!(clamped.left(), 60.0);
        assert_eq!(clamped.top(), 60.0);
    }
}
