//! Data-driven game balance
//!
//! Ability and level tunables, loadable from JSON. Every field has a sane
//! default and `validated` clamps malformed numbers back to those defaults,
//! so the simulation core only ever sees well-formed values (positive
//! cooldowns, non-degenerate radii).

use serde::{Deserialize, Serialize};

/// Dash ability tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashTuning {
    pub cooldown: f32,
    /// Dash distance as a multiple of the agent diameter
    pub distance_multiplier: f32,
    /// Invulnerability window after dashing (seconds)
    pub duration: f32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            cooldown: 10.0,
            distance_multiplier: 2.0,
            duration: 0.25,
        }
    }
}

/// Roar ability tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoarTuning {
    pub cooldown: f32,
    /// AoE radius as a multiple of the agent diameter
    pub push_distance_multiplier: f32,
    pub force: f32,
}

impl Default for RoarTuning {
    fn default() -> Self {
        Self {
            cooldown: 30.0,
            push_distance_multiplier: 5.0,
            force: 500.0,
        }
    }
}

/// Thrown roar bomb tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoarBombTuning {
    pub cooldown: f32,
    pub throw_speed: f32,
    pub duration: f32,
    pub radius: f32,
    pub push_force: f32,
    pub friction: f32,
}

impl Default for RoarBombTuning {
    fn default() -> Self {
        Self {
            cooldown: 15.0,
            throw_speed: 500.0,
            duration: 10.0,
            radius: 150.0,
            push_force: 300.0,
            friction: 2.0,
        }
    }
}

/// Thrown brick bomb tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickBombTuning {
    pub cooldown: f32,
    pub throw_speed: f32,
    pub fuse_time: f32,
    /// Side length of the solidified brick
    pub size: f32,
    /// Required edge clearance as a multiple of the agent diameter
    pub clearance_factor: f32,
    /// Lifetime of the solidified brick obstacle
    pub lifespan: f32,
}

impl Default for BrickBombTuning {
    fn default() -> Self {
        Self {
            cooldown: 12.0,
            throw_speed: 400.0,
            fuse_time: 3.0,
            size: 40.0,
            clearance_factor: 1.5,
            lifespan: 20.0,
        }
    }
}

/// Level obstacle generation tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    pub count: usize,
    pub size_min: f32,
    pub size_max: f32,
    /// Minimum clearance between placed obstacles (1.5x player diameter)
    pub min_gap: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            count: 10,
            size_min: 30.0,
            size_max: 80.0,
            min_gap: 45.0,
        }
    }
}

/// Health pack spawning tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    pub lifetime: f32,
    pub heal: i32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            spawn_interval_min: 5.0,
            spawn_interval_max: 15.0,
            lifetime: 10.0,
            heal: 50,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub dash: DashTuning,
    pub roar: RoarTuning,
    pub roar_bomb: RoarBombTuning,
    pub brick_bomb: BrickBombTuning,
    pub obstacles: ObstacleTuning,
    pub pickups: PickupTuning,
}

impl Tuning {
    /// Parse from JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::validated)
    }

    /// Clamp malformed values back to their defaults.
    ///
    /// The simulation assumes positive cooldowns and non-degenerate radii;
    /// this is the boundary where that assumption is enforced.
    pub fn validated(mut self) -> Self {
        fn positive(value: &mut f32, fallback: f32, name: &str) {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("tuning: {name} = {value} invalid, using {fallback}");
                *value = fallback;
            }
        }

        positive(&mut self.dash.cooldown, 10.0, "dash.cooldown");
        positive(&mut self.dash.distance_multiplier, 2.0, "dash.distance_multiplier");
        positive(&mut self.dash.duration, 0.25, "dash.duration");

        positive(&mut self.roar.cooldown, 30.0, "roar.cooldown");
        positive(&mut self.roar.push_distance_multiplier, 5.0, "roar.push_distance_multiplier");
        positive(&mut self.roar.force, 500.0, "roar.force");

        positive(&mut self.roar_bomb.cooldown, 15.0, "roar_bomb.cooldown");
        positive(&mut self.roar_bomb.throw_speed, 500.0, "roar_bomb.throw_speed");
        positive(&mut self.roar_bomb.duration, 10.0, "roar_bomb.duration");
        positive(&mut self.roar_bomb.radius, 150.0, "roar_bomb.radius");
        positive(&mut self.roar_bomb.push_force, 300.0, "roar_bomb.push_force");
        positive(&mut self.roar_bomb.friction, 2.0, "roar_bomb.friction");

        positive(&mut self.brick_bomb.cooldown, 12.0, "brick_bomb.cooldown");
        positive(&mut self.brick_bomb.throw_speed, 400.0, "brick_bomb.throw_speed");
        positive(&mut self.brick_bomb.fuse_time, 3.0, "brick_bomb.fuse_time");
        positive(&mut self.brick_bomb.size, 40.0, "brick_bomb.size");
        positive(&mut self.brick_bomb.clearance_factor, 1.5, "brick_bomb.clearance_factor");
        positive(&mut self.brick_bomb.lifespan, 20.0, "brick_bomb.lifespan");

        positive(&mut self.obstacles.size_min, 30.0, "obstacles.size_min");
        positive(&mut self.obstacles.size_max, 80.0, "obstacles.size_max");
        if self.obstacles.size_max < self.obstacles.size_min {
            self.obstacles.size_max = self.obstacles.size_min;
        }
        positive(&mut self.obstacles.min_gap, 45.0, "obstacles.min_gap");

        positive(&mut self.pickups.spawn_interval_min, 5.0, "pickups.spawn_interval_min");
        positive(&mut self.pickups.spawn_interval_max, 15.0, "pickups.spawn_interval_max");
        if self.pickups.spawn_interval_max < self.pickups.spawn_interval_min {
            self.pickups.spawn_interval_max = self.pickups.spawn_interval_min;
        }
        positive(&mut self.pickups.lifetime, 10.0, "pickups.lifetime");
        if self.pickups.heal <= 0 {
            self.pickups.heal = 50;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"dash": {"cooldown": 5.0}}"#).unwrap();
        assert_eq!(tuning.dash.cooldown, 5.0);
        assert_eq!(tuning.dash.duration, 0.25);
        assert_eq!(tuning.roar.cooldown, 30.0);
    }

    #[test]
    fn test_validated_replaces_bad_values() {
        let tuning = Tuning::from_json(
            r#"{"roar": {"cooldown": -3.0}, "brick_bomb": {"size": 0.0}}"#,
        )
        .unwrap();
        assert_eq!(tuning.roar.cooldown, 30.0);
        assert_eq!(tuning.brick_bomb.size, 40.0);
    }

    #[test]
    fn test_validated_orders_ranges() {
        let tuning = Tuning::from_json(r#"{"obstacles": {"size_min": 60.0, "size_max": 30.0}}"#)
            .unwrap();
        assert!(tuning.obstacles.size_max >= tuning.obstacles.size_min);
    }
}
