//! Shared agent body and combat capability trait
//!
//! Player and enemies share one physical shape: a continuous position, a
//! circle radius for agent-agent contact, and a synced bounding rect for
//! everything axis-aligned. Code that only needs "something that can be hit"
//! goes through the `Combatant` trait instead of downcasting.

use glam::Vec2;

use super::knockback::Knockback;
use super::rect::Rect;

/// Physical state shared by every agent
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    pub radius: f32,
    /// Bounding rect; center always equals the rounded position
    pub rect: Rect,
    /// Clamped at zero; zero means dead/defeated
    pub health: i32,
    pub knockback: Knockback,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32, health: i32, knockback_friction: f32) -> Self {
        Self {
            pos,
            radius,
            rect: Rect::from_agent(pos, radius),
            health,
            knockback: Knockback::new(knockback_friction),
        }
    }

    /// Re-center the bounding rect on the (rounded) position
    pub fn sync_rect(&mut self) {
        self.rect.set_center(self.pos);
    }

    /// Move to a new position and keep the rect in sync
    pub fn move_to(&mut self, pos: Vec2) {
        self.pos = pos;
        self.sync_rect();
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    /// Heal up to the given cap
    pub fn heal(&mut self, amount: i32, cap: i32) {
        self.health = (self.health + amount).min(cap);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn apply_knockback(&mut self, impulse: Vec2) {
        self.knockback.apply(impulse);
    }
}

/// Capability surface for anything that takes part in combat or pickups.
///
/// Resolved once at the type level - replaces runtime "is this the player?"
/// shape checks.
pub trait Combatant {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    fn max_health(&self) -> i32;
    fn is_player(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut body = Body::new(Vec2::ZERO, 15.0, 50, 3.0);
        body.take_damage(70);
        assert_eq!(body.health, 0);
        assert!(body.is_dead());
    }

    #[test]
    fn test_heal_respects_cap() {
        let mut body = Body::new(Vec2::ZERO, 15.0, 40, 3.0);
        body.heal(50, 50);
        assert_eq!(body.health, 50);
    }

    #[test]
    fn test_rect_follows_rounded_position() {
        let mut body = Body::new(Vec2::new(10.0, 10.0), 15.0, 100, 5.0);
        body.move_to(Vec2::new(100.7, 50.2));
        assert_eq!(body.rect.center(), Vec2::new(101.0, 50.0));
    }
}
