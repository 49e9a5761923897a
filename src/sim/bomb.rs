//! Thrown bombs
//!
//! Two throwables share the roster: the roar bomb, a sliding area source
//! that pulses a radial push until its timer runs out, and the brick bomb, a
//! bouncing projectile that solidifies into a temporary obstacle once its
//! fuse expires *and* it sits clear of every wall and obstacle. A brick that
//! never finds clearance keeps bouncing indefinitely - deliberate, there is
//! no timeout.

use glam::Vec2;

use super::arena::Arena;
use super::collision::{bounce_off_rect, placement_clear};
use super::combat::AreaSource;
use super::obstacle::ObstacleField;
use super::rect::Rect;
use crate::move_towards;
use crate::normalize_or_fixed;
use crate::tuning::{BrickBombTuning, RoarBombTuning};

/// Minimum squared speed below which a roar bomb stops sliding
const ROAR_BOMB_REST_SPEED_SQ: f32 = 10.0;
/// Friction is applied at this rate times the tuned friction factor
const ROAR_BOMB_DECEL_RATE: f32 = 200.0;

/// A thrown, sliding area-push source
#[derive(Debug)]
pub struct RoarBomb {
    pub pos: Vec2,
    velocity: Vec2,
    friction: f32,
    life_timer: f32,
    radius: f32,
    push_force: f32,
}

impl RoarBomb {
    pub fn new(pos: Vec2, dir: Vec2, tuning: &RoarBombTuning) -> Self {
        Self {
            pos,
            velocity: normalize_or_fixed(dir) * tuning.throw_speed,
            friction: tuning.friction,
            life_timer: tuning.duration,
            radius: tuning.radius,
            push_force: tuning.push_force,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.life_timer > 0.0
    }

    /// Slide with friction until at rest or against a wall
    pub fn update(&mut self, dt: f32, arena: &Arena) {
        self.life_timer -= dt;
        if !self.is_active() {
            return;
        }

        if self.velocity.length_squared() > ROAR_BOMB_REST_SPEED_SQ {
            self.pos += self.velocity * dt;
            self.velocity = move_towards(
                self.velocity,
                Vec2::ZERO,
                self.friction * ROAR_BOMB_DECEL_RATE * dt,
            );

            // Walls stop the slide outright
            let rect = Rect::from_center(self.pos, 10.0, 10.0);
            let clamped = arena.clamp(&rect);
            if clamped != rect {
                self.pos = clamped.center();
                self.velocity = Vec2::ZERO;
            }
        }
    }
}

impl AreaSource for RoarBomb {
    fn is_active(&self) -> bool {
        self.is_active()
    }

    /// Radial push, linear falloff to zero at the edge of the radius
    fn push_at(&self, target: Vec2) -> Vec2 {
        let diff = target - self.pos;
        let dist = diff.length();
        if dist >= self.radius {
            return Vec2::ZERO;
        }
        let strength = self.push_force * (1.0 - dist / self.radius);
        normalize_or_fixed(diff) * strength
    }
}

/// A bouncing projectile that arms into a brick obstacle
#[derive(Debug)]
pub struct BrickBomb {
    pub pos: Vec2,
    dir: Vec2,
    speed: f32,
    fuse_timer: f32,
    required_clearance: f32,
    lifespan: f32,
    pub rect: Rect,
    solidified: bool,
}

impl BrickBomb {
    pub fn new(pos: Vec2, dir: Vec2, tuning: &BrickBombTuning, agent_diameter: f32) -> Self {
        Self {
            pos,
            dir: normalize_or_fixed(dir),
            speed: tuning.throw_speed,
            fuse_timer: tuning.fuse_time,
            required_clearance: tuning.clearance_factor * agent_diameter,
            lifespan: tuning.lifespan,
            rect: Rect::from_center(pos, tuning.size, tuning.size),
            solidified: false,
        }
    }

    /// True once the bomb has armed into a placeable brick
    #[inline]
    pub fn is_solidified(&self) -> bool {
        self.solidified
    }

    /// Lifetime the solidified brick obstacle should get
    #[inline]
    pub fn brick_lifespan(&self) -> f32 {
        self.lifespan
    }

    /// Fly, bounce, and try to arm once the fuse runs out.
    ///
    /// `agent_rects` are live agent bounds the bomb also bounces off
    /// (reflection applies to the bomb's heading, not to knockback).
    pub fn update(
        &mut self,
        dt: f32,
        arena: &Arena,
        field: &ObstacleField,
        agent_rects: &[Rect],
    ) {
        if self.solidified {
            return;
        }

        self.pos += self.dir * self.speed * dt;
        self.rect.set_center(self.pos);

        self.bounce_walls(arena);
        self.bounce_blockers(field, agent_rects);

        self.fuse_timer -= dt;
        if self.fuse_timer <= 0.0
            && placement_clear(&self.rect, arena, field, self.required_clearance)
        {
            self.solidified = true;
            log::debug!("brick bomb solidified at {}", self.pos);
        }
        // Fuse spent but no clearance: keep bouncing until a valid spot
        // shows up. Arming is gated on placement, never on time alone.
    }

    fn bounce_walls(&mut self, arena: &Arena) {
        let bounds = arena.bounds();
        if self.rect.left() < bounds.left() {
            self.pos.x = bounds.left() + self.rect.w / 2.0;
            self.dir.x = -self.dir.x;
        } else if self.rect.right() > bounds.right() {
            self.pos.x = bounds.right() - self.rect.w / 2.0;
            self.dir.x = -self.dir.x;
        }
        if self.rect.top() < bounds.top() {
            self.pos.y = bounds.top() + self.rect.h / 2.0;
            self.dir.y = -self.dir.y;
        } else if self.rect.bottom() > bounds.bottom() {
            self.pos.y = bounds.bottom() - self.rect.h / 2.0;
            self.dir.y = -self.dir.y;
        }
        self.rect.set_center(self.pos);
    }

    /// Axis-aligned reflection off obstacles and agents, one hit per tick
    fn bounce_blockers(&mut self, field: &ObstacleField, agent_rects: &[Rect]) {
        let blockers = field
            .active()
            .map(|o| o.rect)
            .chain(agent_rects.iter().copied());

        for blocker in blockers {
            if self.rect.intersects(&blocker) {
                let (pos, dir) = bounce_off_rect(self.pos, self.dir, &self.rect, &blocker);
                self.pos = pos;
                self.dir = dir;
                self.rect.set_center(self.pos);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    const AGENT_DIAMETER: f32 = 30.0;

    fn test_arena() -> Arena {
        Arena::new(Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    #[test]
    fn test_clearance_boundary_is_exact() {
        let arena = test_arena();
        let mut field = ObstacleField::new();
        field.add_static(Rect::new(300.0, 100.0, 40.0, 40.0));
        // 1.5 x agent diameter
        let required = 45.0;

        // 45px from the obstacle's right edge and well clear of all walls
        let valid = Rect::new(385.0, 100.0, 40.0, 40.0);
        assert!(placement_clear(&valid, &arena, &field, required));

        // One pixel closer on that edge
        let too_close = Rect::new(384.0, 100.0, 40.0, 40.0);
        assert!(!placement_clear(&too_close, &arena, &field, required));

        // One pixel short against a wall instead
        let near_wall = Rect::new(44.0, 300.0, 40.0, 40.0);
        assert!(!placement_clear(&near_wall, &arena, &field, required));
        let wall_ok = Rect::new(45.0, 300.0, 40.0, 40.0);
        assert!(placement_clear(&wall_ok, &arena, &field, required));
    }

    #[test]
    fn test_brick_bounces_off_walls() {
        let arena = test_arena();
        let field = ObstacleField::new();
        let tuning = Tuning::default();
        let mut bomb = BrickBomb::new(
            Vec2::new(50.0, 300.0),
            Vec2::new(-1.0, 0.0),
            &tuning.brick_bomb,
            AGENT_DIAMETER,
        );

        // Enough ticks to cross the remaining 30px to the wall
        for _ in 0..10 {
            bomb.update(1.0 / 60.0, &arena, &field, &[]);
        }
        assert!(bomb.dir.x > 0.0, "heading should have reflected off the wall");
        assert!(bomb.rect.left() >= 0.0);
    }

    #[test]
    fn test_brick_bounces_off_obstacles() {
        let arena = test_arena();
        let mut field = ObstacleField::new();
        field.add_static(Rect::new(400.0, 250.0, 40.0, 100.0));
        let tuning = Tuning::default();
        let mut bomb = BrickBomb::new(
            Vec2::new(350.0, 300.0),
            Vec2::new(1.0, 0.0),
            &tuning.brick_bomb,
            AGENT_DIAMETER,
        );

        for _ in 0..20 {
            bomb.update(1.0 / 60.0, &arena, &field, &[]);
            if bomb.dir.x < 0.0 {
                break;
            }
        }
        assert!(bomb.dir.x < 0.0);
        assert!(!bomb.rect.intersects(&Rect::new(400.0, 250.0, 40.0, 100.0)));
    }

    #[test]
    fn test_fuse_expiry_without_clearance_keeps_flying() {
        let arena = test_arena();
        let field = ObstacleField::new();
        let mut tuning = Tuning::default().brick_bomb;
        tuning.fuse_time = 0.05;

        // Hugging the left wall, heading right into open space
        let mut bomb = BrickBomb::new(
            Vec2::new(30.0, 300.0),
            Vec2::new(1.0, 0.0),
            &tuning,
            AGENT_DIAMETER,
        );

        // Fuse expires immediately but the wall is too close
        bomb.update(0.06, &arena, &field, &[]);
        assert!(!bomb.is_solidified());

        // Keeps moving; solidifies once clearance is reached
        let mut solidified_at = None;
        for i in 0..120 {
            bomb.update(1.0 / 60.0, &arena, &field, &[]);
            if bomb.is_solidified() {
                solidified_at = Some(i);
                break;
            }
        }
        assert!(solidified_at.is_some(), "bomb never armed in open space");
        assert!(placement_clear(&bomb.rect, &arena, &field, 45.0));
    }

    #[test]
    fn test_roar_bomb_push_falloff() {
        let tuning = Tuning::default().roar_bomb;
        let bomb = RoarBomb::new(Vec2::new(400.0, 300.0), Vec2::X, &tuning);

        // At the center the direction degenerates to the fixed fallback
        let at_center = bomb.push_at(Vec2::new(400.0, 300.0));
        assert_eq!(at_center, Vec2::new(tuning.push_force, 0.0));

        // Halfway out: half strength, pointing away
        let halfway = bomb.push_at(Vec2::new(400.0 + tuning.radius / 2.0, 300.0));
        assert!((halfway.x - tuning.push_force / 2.0).abs() < 1e-3);
        assert!(halfway.x > 0.0);

        // Outside the radius: nothing
        let outside = bomb.push_at(Vec2::new(400.0 + tuning.radius + 1.0, 300.0));
        assert_eq!(outside, Vec2::ZERO);
    }

    #[test]
    fn test_roar_bomb_stops_at_wall_and_expires() {
        let arena = test_arena();
        let tuning = Tuning::default().roar_bomb;
        let mut bomb = RoarBomb::new(Vec2::new(100.0, 300.0), Vec2::new(-1.0, 0.0), &tuning);

        for _ in 0..60 {
            bomb.update(1.0 / 60.0, &arena);
        }
        // Parked against the inner wall
        assert!(bomb.pos.x >= arena.inner_bounds().left());
        assert!(bomb.is_active());

        // Runs out after its duration
        for _ in 0..((tuning.duration / (1.0 / 60.0)) as u32 + 10) {
            bomb.update(1.0 / 60.0, &arena);
        }
        assert!(!bomb.is_active());
    }
}
