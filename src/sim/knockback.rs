//! Impulse knockback with linear decay
//!
//! Knockback is a velocity component independent of intentional movement:
//! impulses overwrite it, friction bleeds it toward zero, and once the
//! residual speed drops below a threshold it snaps to exactly zero so it can
//! never creep asymptotically.

use glam::Vec2;

use crate::consts::{KNOCKBACK_DECAY_RATE, KNOCKBACK_STOP_THRESHOLD_SQ};
use crate::move_towards;

/// Decaying impulse velocity attached to an agent or projectile
#[derive(Debug, Clone, Copy)]
pub struct Knockback {
    velocity: Vec2,
    friction: f32,
}

impl Knockback {
    pub fn new(friction: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            friction,
        }
    }

    /// Current knockback velocity contribution
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Replace the knockback with a fresh impulse
    pub fn apply(&mut self, impulse: Vec2) {
        self.velocity = impulse;
    }

    /// Decay one tick; snaps to zero below the stop threshold
    pub fn decay(&mut self, dt: f32) {
        if self.velocity.length_squared() > KNOCKBACK_STOP_THRESHOLD_SQ {
            self.velocity = move_towards(
                self.velocity,
                Vec2::ZERO,
                self.friction * KNOCKBACK_DECAY_RATE * dt,
            );
        } else {
            self.velocity = Vec2::ZERO;
        }
    }
}
