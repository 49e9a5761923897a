//! Health pack pickups
//!
//! Packs appear on a randomized cadence at obstacle-free spots, live for a
//! few seconds, and heal whoever touches them first. Enemies get half value;
//! healing caps at the collector's own max health via the `Combatant` trait.

use rand::Rng;

use super::arena::Arena;
use super::body::Combatant;
use super::obstacle::ObstacleField;
use super::rect::Rect;
use crate::tuning::PickupTuning;

/// Side length of a health pack
const PICKUP_SIZE: f32 = 20.0;
/// Placement attempts per spawn before giving up for this cycle
const SPAWN_ATTEMPTS: u32 = 10;
/// Margin (total, per axis) between the arena bounds and pack spawns
const SPAWN_MARGIN: f32 = 40.0;

/// A collectible healing square
#[derive(Debug)]
pub struct HealthPack {
    pub rect: Rect,
    lifetime: f32,
    heal: i32,
    pub active: bool,
}

impl HealthPack {
    fn new(rect: Rect, lifetime: f32, heal: i32) -> Self {
        Self {
            rect,
            lifetime,
            heal,
            active: true,
        }
    }

    fn update(&mut self, dt: f32) {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.active = false;
        }
    }

    /// Heal the collector and spend the pack. Enemies restore half value.
    pub fn collect<C: Combatant>(&mut self, target: &mut C) {
        let restore = if target.is_player() {
            self.heal
        } else {
            self.heal / 2
        };
        let cap = target.max_health();
        target.body_mut().heal(restore, cap);
        self.active = false;
        log::debug!(
            "health pack collected (+{restore}), hp now {}",
            target.body().health
        );
    }
}

/// Owns the pack roster and its spawn cadence
#[derive(Debug)]
pub struct PickupSpawner {
    packs: Vec<HealthPack>,
    spawn_timer: f32,
    next_spawn_time: f32,
    tuning: PickupTuning,
}

impl PickupSpawner {
    pub fn new(tuning: PickupTuning) -> Self {
        Self {
            packs: Vec::new(),
            spawn_timer: 0.0,
            next_spawn_time: tuning.spawn_interval_min,
            tuning,
        }
    }

    pub fn packs_mut(&mut self) -> &mut [HealthPack] {
        &mut self.packs
    }

    /// Age packs, drop spent ones, and spawn on cadence
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R, arena: &Arena, field: &ObstacleField) {
        for pack in &mut self.packs {
            pack.update(dt);
        }
        self.packs.retain(|p| p.active);

        self.spawn_timer += dt;
        if self.spawn_timer >= self.next_spawn_time {
            self.spawn_timer = 0.0;
            self.next_spawn_time = rng
                .random_range(self.tuning.spawn_interval_min..=self.tuning.spawn_interval_max);
            self.spawn(rng, arena, field);
        }
    }

    /// Find an obstacle-free spot; a fully blocked arena just skips a cycle
    fn spawn<R: Rng>(&mut self, rng: &mut R, arena: &Arena, field: &ObstacleField) {
        let spawn_area = arena.bounds().inflate(-SPAWN_MARGIN, -SPAWN_MARGIN);
        for _ in 0..SPAWN_ATTEMPTS {
            let x = rng.random_range(spawn_area.left()..spawn_area.right() - PICKUP_SIZE);
            let y = rng.random_range(spawn_area.top()..spawn_area.bottom() - PICKUP_SIZE);
            let rect = Rect::new(x, y, PICKUP_SIZE, PICKUP_SIZE);
            if !field.collides(&rect) {
                log::debug!("health pack spawned at ({x:.0}, {y:.0})");
                self.packs
                    .push(HealthPack::new(rect, self.tuning.lifetime, self.tuning.heal));
                return;
            }
        }
    }
}
