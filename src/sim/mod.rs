//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, input or platform dependencies
//!
//! The tick driver owns the frame order: obstacle aging, player, pickups,
//! enemies, bombs, collision/combat resolution, dead-entity cleanup.

pub mod arena;
pub mod body;
pub mod bomb;
pub mod collision;
pub mod combat;
pub mod enemy;
pub mod knockback;
pub mod obstacle;
pub mod pathfind;
pub mod pickup;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use body::{Body, Combatant};
pub use bomb::{BrickBomb, RoarBomb};
pub use collision::MoveBlock;
pub use combat::{AreaSource, CombatSystem};
pub use enemy::{Enemy, EnemyState};
pub use knockback::Knockback;
pub use obstacle::{ColorTag, Obstacle, ObstacleField, ObstacleId};
pub use pathfind::{GridCoord, find_path};
pub use pickup::{HealthPack, PickupSpawner};
pub use player::{AbilityKind, Player};
pub use rect::Rect;
pub use state::{GameState, TickInput};
pub use tick::tick;
