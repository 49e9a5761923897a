//! Maze Melee - a top-down arena combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (enemy AI, physics, collisions, combat)
//! - `tuning`: Data-driven ability/game balance
//!
//! Rendering, input polling and audio live outside this crate; the
//! simulation is driven through `sim::tick` with a `TickInput` per frame.

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Per-tick delta time ceiling (bounds integration error on hitches)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Arena wall thickness
    pub const WALL_THICKNESS: f32 = 10.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_KNOCKBACK_FRICTION: f32 = 5.0;

    /// Enemy defaults - slower than the player
    pub const ENEMY_RADIUS: f32 = 15.0;
    pub const ENEMY_SPEED: f32 = 100.0;
    pub const ENEMY_MAX_HEALTH: i32 = 50;
    pub const ENEMY_KNOCKBACK_FRICTION: f32 = 3.0;

    /// Knockback decays at friction * this rate (pixels/s per second)
    pub const KNOCKBACK_DECAY_RATE: f32 = 200.0;
    /// Squared speed below which knockback snaps to exactly zero
    pub const KNOCKBACK_STOP_THRESHOLD_SQ: f32 = 100.0;

    /// Pathfinding grid cell size (enemy diameter plus a little buffer)
    pub const PATH_CELL_SIZE: f32 = 40.0;
    /// Extra clearance when testing a cell footprint against obstacles
    pub const PATH_CELL_CLEARANCE: f32 = 4.0;

    /// Patrol heading retarget interval bounds (seconds)
    pub const PATROL_RETARGET_MIN: f32 = 1.0;
    pub const PATROL_RETARGET_MAX: f32 = 3.0;
    /// Distance at which a target point counts as reached
    pub const ARRIVE_TOLERANCE: f32 = 10.0;
    /// Distance at which a path waypoint counts as reached
    pub const WAYPOINT_TOLERANCE: f32 = 10.0;

    /// Stuck detection: checkpoint interval and minimum displacement
    pub const STUCK_CHECK_INTERVAL: f32 = 1.0;
    pub const STUCK_MIN_PROGRESS: f32 = 15.0;
    /// Backoff duration bounds (seconds)
    pub const BACKOFF_MIN: f32 = 0.3;
    pub const BACKOFF_MAX: f32 = 0.8;
    /// Repath cadence while in the pathfinding state
    pub const REPATH_INTERVAL: f32 = 1.5;

    /// Bounce-loop detection: same-spot radius and repeat limit
    pub const BOUNCE_LOOP_RADIUS: f32 = 5.0;
    pub const BOUNCE_LOOP_LIMIT: u32 = 2;
    /// Impulse applied to an enemy whose move was physically blocked
    pub const BLOCKED_BOUNCE_IMPULSE: f32 = 150.0;

    /// Combat defaults
    pub const CONTACT_DAMAGE: i32 = 10;
    /// Knockback force per point of damage
    pub const KNOCKBACK_PER_DAMAGE: f32 = 50.0;
    /// Outward impulse when two enemies overlap
    pub const ENEMY_SEPARATION_IMPULSE: f32 = 200.0;
    /// Experience granted per enemy kill
    pub const KILL_XP: u32 = 50;
}

/// Unit vector for a heading angle (radians)
#[inline]
pub fn heading_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Normalize a vector, falling back to +X for degenerate input.
///
/// Collision normals and combat push directions must never be zero; the
/// fixed fallback keeps coincident entities resolvable.
#[inline]
pub fn normalize_or_fixed(v: Vec2) -> Vec2 {
    let n = v.normalize_or_zero();
    if n == Vec2::ZERO { Vec2::X } else { n }
}

/// Move `v` toward `target` by at most `max_delta`
#[inline]
pub fn move_towards(v: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let diff = target - v;
    let dist = diff.length();
    if dist <= max_delta || dist <= f32::EPSILON {
        target
    } else {
        v + diff / dist * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_or_fixed_degenerate() {
        assert_eq!(normalize_or_fixed(Vec2::ZERO), Vec2::X);
        let n = normalize_or_fixed(Vec2::new(3.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_towards_clamps_step() {
        let v = move_towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 4.0);
        assert!((v.x - 4.0).abs() < 1e-6);
        // Within reach: lands exactly on target
        let v = move_towards(Vec2::ZERO, Vec2::new(2.0, 0.0), 4.0);
        assert_eq!(v, Vec2::new(2.0, 0.0));
    }
}
