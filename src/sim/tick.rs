//! Fixed timestep simulation tick
//!
//! One tick runs the whole frame pipeline in a fixed order: obstacle aging,
//! player, passive pickups, enemies, bombs, then the collision/combat
//! passes, and finally dead-entity cleanup. Everything is synchronous and
//! single-threaded; delta time is capped to bound integration error during
//! frame hitches.

use super::bomb::{BrickBomb, RoarBomb};
use super::player::AbilityKind;
use super::rect::Rect;
use super::state::{GameState, TickInput};
use crate::consts::{KILL_XP, MAX_FRAME_DT, PLAYER_RADIUS};
use crate::normalize_or_fixed;

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.min(MAX_FRAME_DT);
    state.time_ticks += 1;

    if let Some(kind) = input.select_ability {
        state.player.selected_ability = kind;
    }

    // 1. Obstacle aging
    state.field.advance(dt);

    // 2. Abilities fire before movement so their effects land this tick
    if input.dash {
        state.player.try_dash(&state.arena, &state.field);
    }
    if input.roar && state.player.try_roar() {
        apply_roar(state);
    }
    if input.throw_bomb && state.player.try_throw_bomb() {
        throw_selected_bomb(state);
    }

    // 3. Player movement
    state
        .player
        .update(dt, input.move_dir, input.aim_dir, &state.arena, &state.field);

    // 4. Passive entities
    state
        .pickups
        .update(dt, &mut state.rng, &state.arena, &state.field);

    // 5. Enemies
    let target = state.player.body.pos;
    for enemy in &mut state.enemies {
        enemy.update(dt, target, &state.arena, &state.field);
    }

    // 6. Bombs
    for bomb in &mut state.roar_bombs {
        bomb.update(dt, &state.arena);
    }
    let enemy_rects: Vec<Rect> = state.enemies.iter().map(|e| e.body.rect).collect();
    for bomb in &mut state.brick_bombs {
        bomb.update(dt, &state.arena, &state.field, &enemy_rects);
    }
    convert_solidified_bricks(state);

    // 7. Collision and combat passes
    state.combat.resolve(&mut state.player, &mut state.enemies);
    state
        .combat
        .resolve_enemy_pairs(&mut state.enemies, &state.arena, &state.field);
    state
        .combat
        .resolve_area_sources(&state.roar_bombs, &mut state.enemies);
    collect_pickups(state);

    // 8. Dead-entity cleanup
    state.roar_bombs.retain(|b| b.is_active());
    state.field.sweep_expired();
    award_kills(state);

    if state.player.body.is_dead() {
        let center = state.arena.bounds().center();
        state.player.respawn(center);
    }
}

/// Radial AoE impulse centered on the player
fn apply_roar(state: &mut GameState) {
    let origin = state.player.body.pos;
    let radius = state.player.roar_radius();
    let force = state.player.roar_force();

    for enemy in &mut state.enemies {
        let diff = enemy.body.pos - origin;
        if diff.length() < radius {
            enemy.body.apply_knockback(normalize_or_fixed(diff) * force);
        }
    }
}

fn throw_selected_bomb(state: &mut GameState) {
    let pos = state.player.body.pos;
    let look = state.player.look_dir;
    match state.player.selected_ability {
        // The roar bomb is chucked behind the player
        AbilityKind::RoarBomb => {
            state
                .roar_bombs
                .push(RoarBomb::new(pos, -look, &state.tuning.roar_bomb));
        }
        AbilityKind::BrickBomb => {
            state.brick_bombs.push(BrickBomb::new(
                pos,
                look,
                &state.tuning.brick_bomb,
                PLAYER_RADIUS * 2.0,
            ));
        }
    }
}

/// Armed brick bombs become time-limited obstacles
fn convert_solidified_bricks(state: &mut GameState) {
    let mut i = 0;
    while i < state.brick_bombs.len() {
        if state.brick_bombs[i].is_solidified() {
            let bomb = state.brick_bombs.swap_remove(i);
            state.field.add_dynamic(bomb.rect, bomb.brick_lifespan());
        } else {
            i += 1;
        }
    }
}

/// First overlapping agent collects; player is checked before enemies
fn collect_pickups(state: &mut GameState) {
    for pack in state.pickups.packs_mut() {
        if !pack.active {
            continue;
        }
        if state.player.body.rect.intersects(&pack.rect) {
            pack.collect(&mut state.player);
            continue;
        }
        if let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.body.rect.intersects(&pack.rect))
        {
            pack.collect(enemy);
        }
    }
}

/// Drop dead enemies and grant the player their experience
fn award_kills(state: &mut GameState) {
    let before = state.enemies.len();
    state.enemies.retain(|e| !e.body.is_dead());
    let kills = (before - state.enemies.len()) as u32;
    if kills > 0 {
        log::info!("{kills} enemies defeated (+{} xp)", kills * KILL_XP);
        state.player.gain_xp(kills * KILL_XP);
    }
}
