//! Static and time-limited obstacles
//!
//! The obstacle field owns every blocker in the arena. Static obstacles come
//! from rejection-sampled level generation; dynamic ones (solidified brick
//! bombs) carry a lifespan and expire. Collision queries and line-of-sight
//! both go through the field so expired entries drop out of play atomically.

use glam::Vec2;
use rand::Rng;
use std::ops::RangeInclusive;

use super::arena::Arena;
use super::rect::Rect;

/// Placement retry ceiling for rejection sampling
const MAX_PLACE_ATTEMPTS: u32 = 1000;
/// Margin (total, per axis) between the arena bounds and the spawn area
const PLACEMENT_MARGIN: f32 = 40.0;

/// Presentation color tag. Ignored by all simulation logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    Stone,
    Brick,
}

/// Handle to an obstacle in the field. Exists purely for symmetry between
/// static and dynamic insertion; it carries no special behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleId(u32);

/// A rectangular blocker, optionally time-limited
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub rect: Rect,
    pub color: ColorTag,
    /// Remaining lifetime in seconds; `None` means permanent
    pub lifespan: Option<f32>,
    expired: bool,
}

impl Obstacle {
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.expired
    }
}

/// Owning collection of all obstacles in a level
#[derive(Debug, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a permanent obstacle
    pub fn add_static(&mut self, rect: Rect) -> ObstacleId {
        let id = self.alloc_id();
        self.obstacles.push(Obstacle {
            id,
            rect,
            color: ColorTag::Stone,
            lifespan: None,
            expired: false,
        });
        id
    }

    /// Insert a time-limited obstacle
    pub fn add_dynamic(&mut self, rect: Rect, lifespan: f32) -> ObstacleId {
        let id = self.alloc_id();
        self.obstacles.push(Obstacle {
            id,
            rect,
            color: ColorTag::Brick,
            lifespan: Some(lifespan),
            expired: false,
        });
        id
    }

    /// Rejection-sampling placement of `count` static obstacles.
    ///
    /// A candidate is accepted iff it fits the margin-reduced spawn area,
    /// clears the exclusion zone by `min_gap`, and clears every accepted
    /// obstacle by `min_gap` on each axis independently (box clearance, not
    /// Euclidean - consistent with axis-aligned agent collision). Hitting
    /// the retry ceiling short of `count` is a lower-density level, not an
    /// error.
    ///
    /// Returns the number of obstacles actually placed.
    pub fn place_random<R: Rng>(
        &mut self,
        rng: &mut R,
        arena: &Arena,
        exclusion_zone: Rect,
        count: usize,
        size_range: RangeInclusive<f32>,
        min_gap: f32,
    ) -> usize {
        let spawn_area = arena
            .bounds()
            .inflate(-PLACEMENT_MARGIN, -PLACEMENT_MARGIN);
        let keep_out = exclusion_zone.inflate(min_gap, min_gap);

        let mut placed = Vec::with_capacity(count);
        let mut attempts = 0;

        while placed.len() < count && attempts < MAX_PLACE_ATTEMPTS {
            attempts += 1;

            let w = rng.random_range(size_range.clone());
            let h = rng.random_range(size_range.clone());
            if spawn_area.w <= w || spawn_area.h <= h {
                continue;
            }

            let x = rng.random_range(spawn_area.left()..spawn_area.right() - w);
            let y = rng.random_range(spawn_area.top()..spawn_area.bottom() - h);
            let candidate = Rect::new(x, y, w, h);

            if candidate.intersects(&keep_out) {
                continue;
            }
            if placed
                .iter()
                .any(|r: &Rect| candidate.intersects(&r.inflate(min_gap, min_gap)))
            {
                continue;
            }

            placed.push(candidate);
        }

        if placed.len() < count {
            log::warn!(
                "obstacle placement fell short: {}/{} after {} attempts",
                placed.len(),
                count,
                attempts
            );
        }

        let n = placed.len();
        for rect in placed {
            self.add_static(rect);
        }
        n
    }

    /// Age dynamic obstacles; entries at or below zero become expired and
    /// vanish from all queries this tick (removal happens in `sweep_expired`)
    pub fn advance(&mut self, dt: f32) {
        for obs in &mut self.obstacles {
            if let Some(life) = &mut obs.lifespan {
                *life -= dt;
                if *life <= 0.0 {
                    obs.expired = true;
                }
            }
        }
    }

    /// Drop expired entries from the collection
    pub fn sweep_expired(&mut self) {
        self.obstacles.retain(|o| !o.expired);
    }

    /// Active (non-expired) obstacles
    pub fn active(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(|o| o.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// First active obstacle overlapping `rect`, if any
    pub fn query_colliding(&self, rect: &Rect) -> Option<&Obstacle> {
        self.active().find(|o| o.rect.intersects(rect))
    }

    /// True iff `rect` overlaps any active obstacle
    pub fn collides(&self, rect: &Rect) -> bool {
        self.query_colliding(rect).is_some()
    }

    /// True iff the closed segment `from -> to` crosses no active obstacle.
    ///
    /// Linear scan over the field; fine at arena scale (tens of obstacles).
    pub fn line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        !self.active().any(|o| o.rect.clips_segment(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn test_arena() -> Arena {
        Arena::new(Rect::new(50.0, 50.0, 700.0, 500.0))
    }

    #[test]
    fn test_place_random_respects_gaps_and_exclusion() {
        let arena = test_arena();
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(7);
        let exclusion = Rect::new(300.0, 200.0, 200.0, 200.0);
        let min_gap = 45.0;

        let placed = field.place_random(&mut rng, &arena, exclusion, 10, 30.0..=80.0, min_gap);
        assert!(placed > 0);

        let rects: Vec<Rect> = field.active().map(|o| o.rect).collect();
        let keep_out = exclusion.inflate(min_gap, min_gap);
        for (i, a) in rects.iter().enumerate() {
            assert!(!a.intersects(&keep_out), "obstacle in exclusion zone");
            for b in rects.iter().skip(i + 1) {
                assert!(
                    !a.intersects(&b.inflate(min_gap, min_gap)),
                    "obstacles closer than min gap"
                );
            }
        }
    }

    #[test]
    fn test_place_random_shortfall_is_accepted() {
        // Arena too small to fit 50 obstacles with a huge gap
        let arena = Arena::new(Rect::new(0.0, 0.0, 300.0, 300.0));
        let mut field = ObstacleField::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let placed = field.place_random(
            &mut rng,
            &arena,
            Rect::new(0.0, 0.0, 1.0, 1.0),
            50,
            30.0..=80.0,
            100.0,
        );
        assert!(placed < 50);
        assert_eq!(field.active_count(), placed);
    }

    #[test]
    fn test_dynamic_expiry_leaves_queries_first() {
        let mut field = ObstacleField::new();
        let rect = Rect::new(100.0, 100.0, 40.0, 40.0);
        field.add_dynamic(rect, 1.0);

        field.advance(0.5);
        assert!(field.collides(&rect));

        // Crosses zero: expired, invisible to queries before the sweep
        field.advance(0.6);
        assert!(!field.collides(&rect));
        assert_eq!(field.active_count(), 0);

        field.sweep_expired();
        assert_eq!(field.obstacles.len(), 0);
    }

    #[test]
    fn test_line_of_sight_blocked_by_active_only() {
        let mut field = ObstacleField::new();
        field.add_static(Rect::new(200.0, 100.0, 40.0, 40.0));

        let a = Vec2::new(100.0, 120.0);
        let b = Vec2::new(400.0, 120.0);
        assert!(!field.line_of_sight(a, b));

        // Segment passing below the obstacle
        let c = Vec2::new(100.0, 200.0);
        let d = Vec2::new(400.0, 200.0);
        assert!(field.line_of_sight(c, d));
    }

    #[test]
    fn test_query_colliding_returns_first_active() {
        let mut field = ObstacleField::new();
        let id = field.add_dynamic(Rect::new(0.0, 0.0, 20.0, 20.0), 0.1);
        field.add_static(Rect::new(10.0, 10.0, 20.0, 20.0));

        let probe = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(field.query_colliding(&probe).unwrap().id, id);

        field.advance(0.2);
        // Expired dynamic obstacle no longer shadows the static one
        assert_ne!(field.query_colliding(&probe).unwrap().id, id);
    }
}
