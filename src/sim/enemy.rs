//! Enemy agent and behavior state machine
//!
//! Each enemy runs a five-state controller every tick: wander until the
//! target is sighted, chase it directly, investigate the last known position
//! after losing sight, and when direct pursuit stops making progress, back
//! off briefly and fall back to grid pathfinding. Stuck detection and a
//! bounce-loop breaker keep the controller from grinding against geometry.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::body::{Body, Combatant};
use super::collision::{self, MoveBlock};
use super::obstacle::ObstacleField;
use super::pathfind;
use crate::consts::*;
use crate::{heading_vec, normalize_or_fixed};

/// Behavior states; exactly one is active at a time
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyState {
    /// Wander on a random heading, retargeted every few seconds
    Patrol { retarget_timer: f32 },
    /// Direct pursuit of the visible target
    Chase,
    /// Head to the target's last known position
    Investigate,
    /// Reverse out of a dead end for a short randomized duration
    StuckBackoff { timer: f32 },
    /// Follow grid waypoints toward the last known position
    Pathfinding {
        path: Vec<Vec2>,
        cursor: usize,
        repath_timer: f32,
    },
}

/// An autonomous enemy agent
#[derive(Debug)]
pub struct Enemy {
    pub body: Body,
    pub speed: f32,
    pub look_dir: Vec2,
    state: EnemyState,
    last_known: Option<Vec2>,
    // Stuck detection, active while chasing
    stuck_timer: f32,
    stuck_checkpoint: Vec2,
    // Bounce-loop breaker
    last_block_pos: Option<Vec2>,
    block_repeats: u32,
    rng: Pcg32,
}

impl Enemy {
    pub fn new(pos: Vec2, seed: u64) -> Self {
        Self {
            body: Body::new(pos, ENEMY_RADIUS, ENEMY_MAX_HEALTH, ENEMY_KNOCKBACK_FRICTION),
            speed: ENEMY_SPEED,
            look_dir: Vec2::X,
            state: EnemyState::Patrol { retarget_timer: 0.0 },
            last_known: None,
            stuck_timer: 0.0,
            stuck_checkpoint: pos,
            last_block_pos: None,
            block_repeats: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &EnemyState {
        &self.state
    }

    /// Advance the state machine and move one tick
    pub fn update(&mut self, dt: f32, target_pos: Vec2, arena: &Arena, field: &ObstacleField) {
        // Perception first: sighting the target trumps everything except an
        // in-progress backoff
        let can_see = field.line_of_sight(self.body.pos, target_pos);
        if can_see {
            self.last_known = Some(target_pos);
            if !matches!(
                self.state,
                EnemyState::Chase | EnemyState::StuckBackoff { .. }
            ) {
                self.enter_chase();
            }
        } else if matches!(self.state, EnemyState::Chase) {
            log::debug!("enemy lost sight, investigating last known position");
            self.state = EnemyState::Investigate;
        }

        let desired = self.run_state(dt, arena, field);
        self.resolve_move(desired, dt, arena, field);
    }

    /// Per-state behavior; returns the desired movement direction
    fn run_state(&mut self, dt: f32, arena: &Arena, field: &ObstacleField) -> Vec2 {
        match &mut self.state {
            EnemyState::Patrol { retarget_timer } => {
                *retarget_timer -= dt;
                if *retarget_timer <= 0.0 {
                    let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
                    self.look_dir = heading_vec(angle);
                    *retarget_timer = self.rng.random_range(PATROL_RETARGET_MIN..PATROL_RETARGET_MAX);
                }
                self.look_dir
            }

            EnemyState::Chase => {
                // Stuck detection: every interval, demand real displacement
                self.stuck_timer += dt;
                if self.stuck_timer >= STUCK_CHECK_INTERVAL {
                    self.stuck_timer = 0.0;
                    let progress = self.body.pos.distance(self.stuck_checkpoint);
                    self.stuck_checkpoint = self.body.pos;
                    if progress < STUCK_MIN_PROGRESS {
                        self.enter_backoff();
                        return self.look_dir;
                    }
                }

                match self.last_known {
                    Some(target) => {
                        let to_target = target - self.body.pos;
                        if to_target.length() > ARRIVE_TOLERANCE {
                            to_target.normalize()
                        } else {
                            Vec2::ZERO
                        }
                    }
                    None => Vec2::ZERO,
                }
            }

            EnemyState::Investigate => match self.last_known {
                Some(target) => {
                    let to_target = target - self.body.pos;
                    if to_target.length() > ARRIVE_TOLERANCE {
                        to_target.normalize()
                    } else {
                        // Arrived with nothing to show for it; resume patrol
                        self.state = EnemyState::Patrol { retarget_timer: 0.0 };
                        Vec2::ZERO
                    }
                }
                None => {
                    self.state = EnemyState::Patrol { retarget_timer: 0.0 };
                    Vec2::ZERO
                }
            },

            EnemyState::StuckBackoff { timer } => {
                *timer -= dt;
                if *timer <= 0.0 {
                    self.enter_pathfinding(arena, field);
                }
                self.look_dir
            }

            EnemyState::Pathfinding {
                path,
                cursor,
                repath_timer,
            } => {
                *repath_timer -= dt;
                if *repath_timer <= 0.0 {
                    self.enter_pathfinding(arena, field);
                    return self.look_dir;
                }

                // Advance past reached waypoints
                while *cursor < path.len()
                    && self.body.pos.distance(path[*cursor]) <= WAYPOINT_TOLERANCE
                {
                    *cursor += 1;
                }

                match path.get(*cursor) {
                    Some(&waypoint) => normalize_or_fixed(waypoint - self.body.pos),
                    None => {
                        // Path exhausted (or was empty): fall back to the
                        // last known position on foot
                        log::debug!("enemy path exhausted, investigating");
                        self.state = EnemyState::Investigate;
                        Vec2::ZERO
                    }
                }
            }
        }
    }

    fn enter_chase(&mut self) {
        log::debug!("enemy sighted target, chasing");
        self.state = EnemyState::Chase;
        self.stuck_timer = 0.0;
        self.stuck_checkpoint = self.body.pos;
    }

    fn enter_backoff(&mut self) {
        log::debug!("enemy stuck, backing off");
        // Reverse heading with a random twist so repeated trips diverge
        let jitter = self
            .rng
            .random_range(-std::f32::consts::FRAC_PI_4..std::f32::consts::FRAC_PI_4);
        self.look_dir = Vec2::from_angle(jitter).rotate(-self.look_dir);
        self.state = EnemyState::StuckBackoff {
            timer: self.rng.random_range(BACKOFF_MIN..BACKOFF_MAX),
        };
    }

    fn enter_pathfinding(&mut self, arena: &Arena, field: &ObstacleField) {
        let goal = self.last_known.unwrap_or(self.body.pos);
        let path = pathfind::find_path(self.body.pos, goal, field, arena);
        log::debug!("enemy planning route: {} waypoints", path.len());
        self.state = EnemyState::Pathfinding {
            path,
            cursor: 0,
            repath_timer: REPATH_INTERVAL,
        };
    }

    /// Combine the desired heading with knockback and attempt the move.
    /// A blocked move leaves the position unchanged and kicks the enemy away
    /// from the obstruction.
    fn resolve_move(&mut self, desired: Vec2, dt: f32, arena: &Arena, field: &ObstacleField) {
        self.body.knockback.decay(dt);

        let mut velocity = Vec2::ZERO;
        if desired.length_squared() > 0.0 {
            self.look_dir = desired; // instant turn
            velocity = desired * self.speed;
        }

        let total = velocity + self.body.knockback.velocity();
        if total == Vec2::ZERO {
            return;
        }

        let next_pos = self.body.pos + total * dt;
        match collision::try_move_strict(&mut self.body, next_pos, arena, field) {
            None => {
                self.last_block_pos = None;
                self.block_repeats = 0;
            }
            Some(block) => {
                let away = match block {
                    MoveBlock::Wall => normalize_or_fixed(arena.bounds().center() - self.body.pos),
                    MoveBlock::Obstacle { center } => normalize_or_fixed(self.body.pos - center),
                };
                self.body.apply_knockback(away * BLOCKED_BOUNCE_IMPULSE);
                self.note_blocked();
            }
        }
    }

    /// Bounce-loop detection: repeatedly blocked in the same spot forces a
    /// fully random heading
    fn note_blocked(&mut self) {
        let near_previous = self
            .last_block_pos
            .is_some_and(|prev| self.body.pos.distance(prev) < BOUNCE_LOOP_RADIUS);
        self.block_repeats = if near_previous {
            self.block_repeats + 1
        } else {
            0
        };
        self.last_block_pos = Some(self.body.pos);

        if self.block_repeats >= BOUNCE_LOOP_LIMIT {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            self.look_dir = heading_vec(angle);
            self.block_repeats = 0;
            self.last_block_pos = None;
            // A patrolling enemy keeps the fresh heading for a full interval
            if let EnemyState::Patrol { retarget_timer } = &mut self.state {
                *retarget_timer = self.rng.random_range(PATROL_RETARGET_MIN..PATROL_RETARGET_MAX);
            }
        }
    }
}

impl Combatant for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
    fn max_health(&self) -> i32 {
        ENEMY_MAX_HEALTH
    }
    fn is_player(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::rect::Rect;

    const DT: f32 = 1.0 / 60.0;

    fn open_arena() -> Arena {
        Arena::new(Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    #[test]
    fn test_patrol_to_chase_within_one_tick() {
        let arena = open_arena();
        let field = ObstacleField::new();
        let mut enemy = Enemy::new(Vec2::new(100.0, 300.0), 1);
        let target = Vec2::new(500.0, 300.0);

        enemy.update(DT, target, &arena, &field);
        assert!(matches!(enemy.state(), EnemyState::Chase));
    }

    #[test]
    fn test_chase_holds_while_sighted_and_closes_in() {
        let arena = open_arena();
        let field = ObstacleField::new();
        let mut enemy = Enemy::new(Vec2::new(100.0, 300.0), 1);
        let target = Vec2::new(500.0, 300.0);

        let start_dist = enemy.body.pos.distance(target);
        for _ in 0..120 {
            enemy.update(DT, target, &arena, &field);
            assert!(matches!(enemy.state(), EnemyState::Chase));
        }
        assert!(enemy.body.pos.distance(target) < start_dist);
    }

    #[test]
    fn test_lost_sight_switches_to_investigate() {
        let arena = open_arena();
        let mut field = ObstacleField::new();
        field.add_static(Rect::new(300.0, 100.0, 40.0, 400.0));

        let mut enemy = Enemy::new(Vec2::new(100.0, 50.0), 1);
        // Visible above the wall
        let seen_at = Vec2::new(500.0, 50.0);
        enemy.update(DT, seen_at, &arena, &field);
        assert!(matches!(enemy.state(), EnemyState::Chase));

        // Target ducks behind the wall
        let hidden_at = Vec2::new(500.0, 300.0);
        enemy.update(DT, hidden_at, &arena, &field);
        assert!(matches!(enemy.state(), EnemyState::Investigate));
        // Still steering toward where the target was last seen
        assert_eq!(enemy.last_known, Some(seen_at));
    }

    #[test]
    fn test_investigate_arrival_resumes_patrol() {
        let arena = open_arena();
        let mut enemy = Enemy::new(Vec2::new(100.0, 300.0), 1);
        enemy.state = EnemyState::Investigate;
        enemy.last_known = Some(Vec2::new(104.0, 300.0)); // within tolerance

        // Keep the live target hidden so sighting can't preempt arrival
        let mut blocked = ObstacleField::new();
        blocked.add_static(Rect::new(300.0, 100.0, 40.0, 400.0));
        enemy.update(DT, Vec2::new(700.0, 300.0), &arena, &blocked);
        assert!(matches!(enemy.state(), EnemyState::Patrol { .. }));
    }

    #[test]
    fn test_stuck_recovery_order() {
        let arena = open_arena();
        let mut field = ObstacleField::new();
        // Pocket around the enemy: sealed except a sight slit ahead that is
        // too narrow to move through
        field.add_static(Rect::new(0.0, 200.0, 85.0, 200.0)); // behind
        field.add_static(Rect::new(85.0, 200.0, 200.0, 85.0)); // above
        field.add_static(Rect::new(85.0, 315.0, 200.0, 85.0)); // below
        field.add_static(Rect::new(115.0, 200.0, 40.0, 95.0)); // slit top
        field.add_static(Rect::new(115.0, 305.0, 40.0, 95.0)); // slit bottom

        let mut enemy = Enemy::new(Vec2::new(100.0, 300.0), 3);
        let target = Vec2::new(500.0, 300.0);
        assert!(field.line_of_sight(enemy.body.pos, target));

        let mut saw_chase = false;
        let mut saw_backoff_after_chase = false;
        let mut saw_pathfinding_after_backoff = false;
        for _ in 0..(3.0 / DT) as u32 {
            enemy.update(DT, target, &arena, &field);
            match enemy.state() {
                EnemyState::Chase => {
                    if !saw_backoff_after_chase {
                        saw_chase = true;
                    }
                }
                EnemyState::StuckBackoff { .. } => {
                    if saw_chase {
                        saw_backoff_after_chase = true;
                    }
                }
                EnemyState::Pathfinding { .. } => {
                    if saw_backoff_after_chase {
                        saw_pathfinding_after_backoff = true;
                        break;
                    }
                }
                _ => {}
            }
        }
        assert!(saw_chase, "never entered chase");
        assert!(saw_backoff_after_chase, "never tripped stuck detection");
        assert!(saw_pathfinding_after_backoff, "backoff never led to pathfinding");
        // Boxed in on every side: the enemy never gets anywhere
        assert!(enemy.body.pos.distance(Vec2::new(100.0, 300.0)) < 1.0);
    }

    #[test]
    fn test_patrol_heading_is_unit_length() {
        let arena = open_arena();
        // Wall between enemy and target so patrol persists
        let mut field = ObstacleField::new();
        field.add_static(Rect::new(300.0, 0.0, 40.0, 600.0));

        let mut enemy = Enemy::new(Vec2::new(100.0, 300.0), 9);
        enemy.update(DT, Vec2::new(700.0, 300.0), &arena, &field);
        assert!(matches!(enemy.state(), EnemyState::Patrol { .. }));
        assert!((enemy.look_dir.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_blocked_move_leaves_position_and_applies_impulse() {
        let arena = open_arena();
        let mut field = ObstacleField::new();
        // Flush against an obstacle to the right
        field.add_static(Rect::new(115.0, 200.0, 60.0, 200.0));

        let mut enemy = Enemy::new(Vec2::new(100.0, 300.0), 1);
        enemy.state = EnemyState::Investigate;
        enemy.last_known = Some(Vec2::new(160.0, 300.0)); // inside the obstacle band

        let before = enemy.body.pos;
        enemy.update(DT, Vec2::new(160.0, 300.0), &arena, &field);
        // Move into the obstacle is refused outright
        assert_eq!(enemy.body.pos, before);
        // And the obstruction kicked back
        assert!(enemy.body.knockback.is_active());
        assert!(enemy.body.knockback.velocity().x < 0.0);
    }
}
