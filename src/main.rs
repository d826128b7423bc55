//! Brickfall headless driver
//!
//! Builds a brick wall, lets an autopilot paddle play it for a while at a
//! fixed timestep, and logs what happened. Set `RUST_LOG=debug` to watch
//! power-ups spawn and expire.

use glam::{Vec2, Vec3};

use brickfall::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use brickfall::sim::{Body, GamePhase, GameState, Level, NoTextures, TickInput, tick};
use brickfall::{Tuning, WHITE};

/// Frame time (60 Hz)
const DT: f32 = 1.0 / 60.0;
/// Two minutes of play
const MAX_TICKS: u32 = 60 * 120;

const BRICK_SIZE: Vec2 = Vec2::new(80.0, 25.0);

fn build_wall() -> Level {
    let colors = [
        Vec3::new(0.2, 0.6, 1.0),
        Vec3::new(0.0, 0.7, 0.0),
        Vec3::new(0.8, 0.8, 0.4),
        Vec3::new(1.0, 0.5, 0.0),
    ];
    let mut bricks = Vec::new();
    for row in 0..6 {
        for col in 0..(FIELD_WIDTH / BRICK_SIZE.x) as usize {
            let pos = Vec2::new(col as f32 * BRICK_SIZE.x, 60.0 + row as f32 * BRICK_SIZE.y);
            if row == 4 && col % 4 == 1 {
                bricks.push(Body::solid_brick(pos, BRICK_SIZE, Vec3::new(0.8, 0.8, 0.7)));
            } else {
                bricks.push(Body::brick(pos, BRICK_SIZE, colors[row % colors.len()]));
            }
        }
    }
    Level::new(bricks)
}

fn autopilot(state: &GameState) -> TickInput {
    let target = state.ball.center().x;
    let paddle = state.paddle.center().x;
    TickInput {
        move_left: target < paddle - 10.0,
        move_right: target > paddle + 10.0,
        release: state.ball.stuck,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let seed = std::env::var("BRICKFALL_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);

    log::info!("Brickfall (headless) starting, seed {seed}");
    let mut state = GameState::new(FIELD_WIDTH, FIELD_HEIGHT, vec![build_wall()], tuning, seed)
        .with_textures(&NoTextures);

    for _ in 0..MAX_TICKS {
        let input = autopilot(&state);
        tick(&mut state, &input, DT);
        if state.phase == GamePhase::Win {
            break;
        }
    }

    let level = state.level();
    let destroyed = level.bricks.iter().filter(|b| b.destroyed).count();
    log::info!(
        "Finished after {} ticks: phase {:?}, {}/{} bricks down, {} power-ups live",
        state.time_ticks,
        state.phase,
        destroyed,
        level.bricks.len(),
        state.power_ups.len()
    );
    log::info!(
        "Ball sticky={} pass_through={} tint_white={}, effects {:?}",
        state.ball.sticky,
        state.ball.pass_through,
        state.ball.body.color == WHITE,
        state.effects
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless driver is native only
}
