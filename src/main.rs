//! Maze Melee entry point
//!
//! Headless demo driver: runs the simulation for a fixed duration with a
//! scripted input and prints a summary. Rendering and real input polling
//! live in a separate presentation layer; this binary exists to exercise the
//! core loop end to end.

use glam::Vec2;

use maze_melee::Tuning;
use maze_melee::consts::{MAX_SUBSTEPS, SIM_DT};
use maze_melee::sim::{GameState, Rect, TickInput, tick};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(30.0);

    let mut state = GameState::new(seed, Rect::new(50.0, 50.0, 700.0, 500.0), Tuning::default());
    log::info!(
        "seed {seed}: {} obstacles, {} enemies",
        state.field.active_count(),
        state.enemies.len()
    );

    // Frame loop with a fixed-step accumulator, as a real frontend would
    // drive it
    let total_ticks = (seconds / SIM_DT) as u64;
    let frame_dt = 1.0 / 60.0;
    let mut accumulator = 0.0;

    while state.time_ticks < total_ticks {
        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = scripted_input(&state);
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    println!(
        "simulated {:.0}s: player hp {}, level {}, xp {}, deaths {}; {} enemies left, {} obstacles",
        seconds,
        state.player.body.health,
        state.player.level,
        state.player.xp,
        state.player.deaths,
        state.enemies.len(),
        state.field.active_count(),
    );
}

/// Deterministic wandering input: slow circle strafe with periodic ability
/// use
fn scripted_input(state: &GameState) -> TickInput {
    let t = state.time_ticks as f32 * SIM_DT;
    let heading = Vec2::new((t * 0.5).cos(), (t * 0.5).sin());
    let ticks = state.time_ticks;

    TickInput {
        move_dir: heading,
        aim_dir: heading,
        dash: ticks > 0 && ticks.is_multiple_of(1500),
        roar: ticks > 0 && ticks.is_multiple_of(4000),
        throw_bomb: ticks > 0 && ticks.is_multiple_of(2400),
        select_ability: None,
    }
}
