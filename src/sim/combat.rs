//! Pairwise combat and area-push resolution
//!
//! Contact combat is symmetric: an overlapping player/enemy pair both take
//! the fixed damage and fly apart along the connecting normal. The player's
//! dash invulnerability is the only gate - there is no per-pair hit
//! cooldown; physical separation does that job. Enemy-enemy contact is
//! separation only, never damage.

use glam::Vec2;

use super::arena::Arena;
use super::collision::separate_circles;
use super::enemy::Enemy;
use super::obstacle::ObstacleField;
use super::player::Player;
use crate::consts::{CONTACT_DAMAGE, ENEMY_SEPARATION_IMPULSE, KNOCKBACK_PER_DAMAGE};
use crate::normalize_or_fixed;

/// Anything that radiates a non-damaging radial push each tick
pub trait AreaSource {
    fn is_active(&self) -> bool;
    /// Push vector for a target position; zero outside the source's radius
    fn push_at(&self, target: Vec2) -> Vec2;
}

/// Resolves combat interactions between the rosters each tick
#[derive(Debug)]
pub struct CombatSystem {
    damage: i32,
    knockback_multiplier: f32,
}

impl Default for CombatSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatSystem {
    pub fn new() -> Self {
        Self {
            damage: CONTACT_DAMAGE,
            knockback_multiplier: KNOCKBACK_PER_DAMAGE,
        }
    }

    /// Player-vs-enemy contact: mutual damage plus opposing knockback
    pub fn resolve(&self, player: &mut Player, enemies: &mut [Enemy]) {
        for enemy in enemies.iter_mut() {
            if player.body.rect.intersects(&enemy.body.rect) {
                self.apply_contact(player, enemy);
            }
        }
    }

    fn apply_contact(&self, player: &mut Player, enemy: &mut Enemy) {
        if player.is_invulnerable() {
            return;
        }

        // Coincident centers fall back to the fixed +X push
        let to_player = normalize_or_fixed(player.body.pos - enemy.body.pos);

        player.take_damage(self.damage);
        enemy.body.take_damage(self.damage);
        log::debug!(
            "contact: player hp {}, enemy hp {}",
            player.body.health,
            enemy.body.health
        );

        let force = self.damage as f32 * self.knockback_multiplier;
        player.body.apply_knockback(to_player * force);
        enemy.body.apply_knockback(-to_player * force);
    }

    /// Enemy-vs-enemy separation: push apart, no damage.
    ///
    /// O(n^2) over the roster - fine for tens of enemies; a spatial index
    /// would be the move at higher counts.
    pub fn resolve_enemy_pairs(
        &self,
        enemies: &mut [Enemy],
        arena: &Arena,
        field: &ObstacleField,
    ) {
        let count = enemies.len();
        if count < 2 {
            return;
        }
        for i in 0..count {
            let (head, tail) = enemies.split_at_mut(i + 1);
            let first = &mut head[i];
            for second in tail {
                separate_circles(
                    &mut first.body,
                    &mut second.body,
                    ENEMY_SEPARATION_IMPULSE,
                    arena,
                    field,
                );
            }
        }
    }

    /// Accumulate every active area source's push into each enemy's
    /// knockback. No damage is attached to this interaction.
    pub fn resolve_area_sources<S: AreaSource>(&self, sources: &[S], enemies: &mut [Enemy]) {
        if sources.is_empty() {
            return;
        }
        for enemy in enemies.iter_mut() {
            let total: Vec2 = sources
                .iter()
                .filter(|s| s.is_active())
                .map(|s| s.push_at(enemy.body.pos))
                .sum();
            if total != Vec2::ZERO {
                enemy.body.apply_knockback(total);
            }
        }
    }
}
