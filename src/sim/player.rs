//! Player agent: movement, abilities, progression
//!
//! The player moves from an input intent vector with wall sliding, carries
//! the same knockback model as enemies, and owns three cooldown-gated
//! abilities: a dash with a short invulnerability window, a radial roar
//! push, and bomb throws (resolved by the tick driver). Kills feed a small
//! XP/level curve that shortens cooldowns.

use glam::Vec2;

use super::arena::Arena;
use super::body::{Body, Combatant};
use super::collision;
use super::obstacle::ObstacleField;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Which throwable the player currently has selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityKind {
    RoarBomb,
    BrickBomb,
}

/// The player-controlled agent
#[derive(Debug)]
pub struct Player {
    pub body: Body,
    pub speed: f32,
    pub look_dir: Vec2,

    dash_cooldown_max: f32,
    dash_distance: f32,
    dash_duration: f32,
    dash_timer: f32,
    dash_active_timer: f32,

    roar_cooldown_max: f32,
    roar_radius: f32,
    roar_force: f32,
    roar_timer: f32,

    bomb_cooldown_max: f32,
    bomb_timer: f32,
    pub selected_ability: AbilityKind,

    pub xp: u32,
    pub level: u32,
    pub xp_to_next_level: u32,
    pub deaths: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        let diameter = PLAYER_RADIUS * 2.0;
        Self {
            body: Body::new(pos, PLAYER_RADIUS, PLAYER_MAX_HEALTH, PLAYER_KNOCKBACK_FRICTION),
            speed: PLAYER_SPEED,
            look_dir: Vec2::X,
            dash_cooldown_max: tuning.dash.cooldown,
            dash_distance: tuning.dash.distance_multiplier * diameter,
            dash_duration: tuning.dash.duration,
            dash_timer: 0.0,
            dash_active_timer: 0.0,
            roar_cooldown_max: tuning.roar.cooldown,
            roar_radius: tuning.roar.push_distance_multiplier * diameter,
            roar_force: tuning.roar.force,
            roar_timer: 0.0,
            bomb_cooldown_max: tuning.roar_bomb.cooldown,
            bomb_timer: 0.0,
            selected_ability: AbilityKind::RoarBomb,
            xp: 0,
            level: 1,
            xp_to_next_level: 100,
            deaths: 0,
        }
    }

    /// Tick cooldowns, decay knockback, and move with wall sliding
    pub fn update(
        &mut self,
        dt: f32,
        move_dir: Vec2,
        aim_dir: Vec2,
        arena: &Arena,
        field: &ObstacleField,
    ) {
        self.dash_timer = (self.dash_timer - dt).max(0.0);
        self.dash_active_timer = (self.dash_active_timer - dt).max(0.0);
        self.roar_timer = (self.roar_timer - dt).max(0.0);
        self.bomb_timer = (self.bomb_timer - dt).max(0.0);

        self.body.knockback.decay(dt);

        if aim_dir.length_squared() > 0.1 {
            self.look_dir = aim_dir.normalize();
        }

        let velocity = move_dir * self.speed + self.body.knockback.velocity();
        collision::slide_move(&mut self.body, velocity, dt, arena, field);
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.dash_active_timer > 0.0
    }

    /// Dash along the look direction, granting a short invulnerability
    /// window. The teleport shortens rather than land inside geometry.
    pub fn try_dash(&mut self, arena: &Arena, field: &ObstacleField) -> bool {
        if self.dash_timer > 0.0 {
            return false;
        }

        let dash_vector = self.look_dir.normalize_or_zero() * self.dash_distance;
        for fraction in [1.0, 0.75, 0.5, 0.25] {
            let destination = self.body.pos + dash_vector * fraction;
            let rect = Rect::from_agent(destination, self.body.radius);
            if arena.contains(&rect) && !field.collides(&rect) {
                self.body.move_to(destination);
                break;
            }
        }

        self.dash_timer = self.dash_cooldown_max;
        self.dash_active_timer = self.dash_duration;
        log::debug!("player dashed");
        true
    }

    /// Trigger the radial roar push. The tick driver applies the impulse to
    /// enemies in range.
    pub fn try_roar(&mut self) -> bool {
        if self.roar_timer > 0.0 {
            return false;
        }
        self.roar_timer = self.roar_cooldown_max;
        log::debug!("player roared");
        true
    }

    /// Start the bomb cooldown; the tick driver spawns the projectile
    pub fn try_throw_bomb(&mut self) -> bool {
        if self.bomb_timer > 0.0 {
            return false;
        }
        self.bomb_timer = self.bomb_cooldown_max;
        true
    }

    #[inline]
    pub fn roar_radius(&self) -> f32 {
        self.roar_radius
    }

    #[inline]
    pub fn roar_force(&self) -> f32 {
        self.roar_force
    }

    /// Damage gated by dash invulnerability
    pub fn take_damage(&mut self, amount: i32) {
        if self.is_invulnerable() {
            return;
        }
        self.body.take_damage(amount);
    }

    pub fn gain_xp(&mut self, amount: u32) {
        self.xp += amount;
        if self.xp >= self.xp_to_next_level {
            self.level_up();
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.xp -= self.xp_to_next_level;
        self.xp_to_next_level = (self.xp_to_next_level as f32 * 1.2) as u32;

        // Cooldowns shorten 10% per level; full heal
        self.dash_cooldown_max *= 0.9;
        self.roar_cooldown_max *= 0.9;
        self.bomb_cooldown_max *= 0.9;
        self.body.health = PLAYER_MAX_HEALTH;

        log::info!("player reached level {}", self.level);
    }

    /// Reset health and recenter after defeat
    pub fn respawn(&mut self, pos: Vec2) {
        self.deaths += 1;
        self.body.health = PLAYER_MAX_HEALTH;
        self.body.move_to(pos);
        self.body.knockback.apply(Vec2::ZERO);
        log::info!("player defeated ({} deaths), respawning", self.deaths);
    }
}

impl Combatant for Player {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
    fn max_health(&self) -> i32 {
        PLAYER_MAX_HEALTH
    }
    fn is_player(&self) -> bool {
        true
    }
}
