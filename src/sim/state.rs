//! Game state and per-tick input
//!
//! All rosters are owned here and handed to the tick driver by reference -
//! no globals. One `GameState` is one level in progress.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::bomb::{BrickBomb, RoarBomb};
use super::combat::CombatSystem;
use super::enemy::Enemy;
use super::obstacle::ObstacleField;
use super::pickup::PickupSpawner;
use super::player::{AbilityKind, Player};
use super::rect::Rect;
use crate::tuning::Tuning;

/// Safe zone edge length around the player during obstacle generation
const PLAYER_SAFE_ZONE: f32 = 200.0;
/// Enemy spawn inset from the arena bounds
const ENEMY_SPAWN_INSET: f32 = 100.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent (unit-ish vector from the input layer)
    pub move_dir: Vec2,
    /// Aim direction
    pub aim_dir: Vec2,
    pub dash: bool,
    pub roar: bool,
    /// Throw the currently selected bomb
    pub throw_bomb: bool,
    /// Switch the selected throwable
    pub select_ability: Option<AbilityKind>,
}

/// Complete simulation state for one level
pub struct GameState {
    pub seed: u64,
    pub arena: Arena,
    pub field: ObstacleField,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub roar_bombs: Vec<RoarBomb>,
    pub brick_bombs: Vec<BrickBomb>,
    pub pickups: PickupSpawner,
    pub combat: CombatSystem,
    pub tuning: Tuning,
    pub time_ticks: u64,
    pub(super) rng: Pcg32,
    enemy_counter: u64,
}

impl GameState {
    /// Build a level: generate obstacles around the player's safe zone and
    /// spawn the starting enemies in opposite corners.
    pub fn new(seed: u64, bounds: Rect, tuning: Tuning) -> Self {
        let arena = Arena::new(bounds);
        let center = bounds.center();
        let mut rng = Pcg32::seed_from_u64(seed);

        let player = Player::new(center, &tuning);
        let mut field = ObstacleField::new();
        let safe_zone = Rect::from_center(center, PLAYER_SAFE_ZONE, PLAYER_SAFE_ZONE);
        field.place_random(
            &mut rng,
            &arena,
            safe_zone,
            tuning.obstacles.count,
            tuning.obstacles.size_min..=tuning.obstacles.size_max,
            tuning.obstacles.min_gap,
        );

        let pickups = PickupSpawner::new(tuning.pickups.clone());
        let mut state = Self {
            seed,
            arena,
            field,
            player,
            enemies: Vec::new(),
            roar_bombs: Vec::new(),
            brick_bombs: Vec::new(),
            pickups,
            combat: CombatSystem::new(),
            tuning,
            time_ticks: 0,
            rng,
            enemy_counter: 0,
        };

        let b = bounds;
        state.spawn_enemy(Vec2::new(b.left() + ENEMY_SPAWN_INSET, b.top() + ENEMY_SPAWN_INSET));
        state.spawn_enemy(Vec2::new(
            b.right() - ENEMY_SPAWN_INSET,
            b.bottom() - ENEMY_SPAWN_INSET,
        ));
        state
    }

    /// Spawn an enemy at (or near) the preferred position, relocating to a
    /// random clear spot if the preferred one overlaps level geometry
    pub fn spawn_enemy(&mut self, preferred: Vec2) {
        let pos = self.find_clear_spot(preferred);
        self.enemy_counter += 1;
        let seed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(self.enemy_counter);
        self.enemies.push(Enemy::new(pos, seed));
    }

    fn find_clear_spot(&mut self, preferred: Vec2) -> Vec2 {
        let probe = Rect::from_agent(preferred, crate::consts::ENEMY_RADIUS);
        if self.arena.contains(&probe) && !self.field.collides(&probe) {
            return preferred;
        }

        let inner = self.arena.inner_bounds();
        for _ in 0..100 {
            let pos = Vec2::new(
                self.rng.random_range(inner.left() + 20.0..inner.right() - 20.0),
                self.rng.random_range(inner.top() + 20.0..inner.bottom() - 20.0),
            );
            let probe = Rect::from_agent(pos, crate::consts::ENEMY_RADIUS);
            if self.arena.contains(&probe) && !self.field.collides(&probe) {
                log::debug!("enemy spawn relocated to ({:.0}, {:.0})", pos.x, pos.y);
                return pos;
            }
        }
        // Pathological level; fall back to the arena center
        self.arena.bounds().center()
    }

    /// Debug/round reset: fresh obstacles, full health, new enemies
    pub fn reset_level(&mut self) {
        let center = self.arena.bounds().center();

        self.field = ObstacleField::new();
        let safe_zone = Rect::from_agent(self.player.body.pos, 50.0);
        self.field.place_random(
            &mut self.rng,
            &self.arena,
            safe_zone,
            self.tuning.obstacles.count,
            self.tuning.obstacles.size_min..=self.tuning.obstacles.size_max,
            self.tuning.obstacles.min_gap,
        );

        self.player = Player::new(center, &self.tuning);
        self.enemies.clear();
        self.roar_bombs.clear();
        self.brick_bombs.clear();

        let b = self.arena.bounds();
        self.spawn_enemy(Vec2::new(b.left() + ENEMY_SPAWN_INSET, b.top() + ENEMY_SPAWN_INSET));
        self.spawn_enemy(Vec2::new(
            b.right() - ENEMY_SPAWN_INSET,
            b.bottom() - ENEMY_SPAWN_INSET,
        ));
        log::info!("level reset");
    }
}
