//! Per-frame simulation tick
//!
//! Order within a tick: ball motion, collision pass (paddle, bricks in level
//! order, power-up pickup), power-up timers, loss check, shake decay.

use super::collision::circle_box_collision;
use super::powerup::{EffectTargets, collect_power_ups, spawn_power_ups, update_power_ups};
use super::resolve::{advance_ball, paddle_bounce, resolve_brick_contact};
use super::state::{GamePhase, GameState};

/// Input state for a single tick, already mapped from raw key state
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move paddle left (A / Left)
    pub move_left: bool,
    /// Move paddle right (D / Right)
    pub move_right: bool,
    /// Release a stuck ball (Space)
    pub release: bool,
}

/// Move the paddle and release the ball. A stuck ball rides along.
pub fn process_input(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Active {
        return;
    }

    let velocity = state.tuning.paddle_speed * dt;
    let paddle = &mut state.paddle;
    let ball = &mut state.ball;

    if input.move_left && paddle.pos.x >= 0.0 {
        paddle.pos.x -= velocity;
        if ball.stuck {
            ball.body.pos.x -= velocity;
        }
    }
    if input.move_right && paddle.pos.x <= state.width - paddle.size.x {
        paddle.pos.x += velocity;
        if ball.stuck {
            ball.body.pos.x += velocity;
        }
    }
    if input.release && ball.stuck {
        ball.stuck = false;
        log::debug!("ball released at {:?}", ball.body.pos);
    }
}

/// Collision and resolution pass: ball vs paddle, ball vs each live brick,
/// then power-up pickup and off-screen loss.
pub fn do_collisions(state: &mut GameState) {
    let level = state.current_level;
    assert!(
        level < state.levels.len(),
        "current level {} out of range ({} levels)",
        level,
        state.levels.len()
    );

    if !state.ball.stuck {
        let contact = circle_box_collision(state.ball.center(), state.ball.radius, &state.paddle);
        if contact.is_hit() {
            paddle_bounce(
                &mut state.ball,
                &state.paddle,
                state.tuning.initial_ball_velocity,
                state.tuning.bounce_strength,
            );
        }
    }

    for brick in state.levels[level].bricks.iter_mut().filter(|b| !b.destroyed) {
        let contact = circle_box_collision(state.ball.center(), state.ball.radius, brick);
        if !contact.is_hit() {
            continue;
        }

        if brick.solid {
            state.shake_time = state.tuning.shake_duration;
            state.effects.shake = true;
        } else {
            brick.destroyed = true;
            spawn_power_ups(
                &mut state.rng,
                &state.tuning,
                &state.textures,
                brick.pos,
                &mut state.power_ups,
            );
            if state.ball.pass_through {
                continue;
            }
        }

        resolve_brick_contact(&mut state.ball, contact);
    }

    let mut targets = EffectTargets {
        ball: &mut state.ball,
        paddle: &mut state.paddle,
        effects: &mut state.effects,
    };
    collect_power_ups(&mut state.power_ups, &mut targets, state.height, &state.tuning);
}

/// Advance the simulation by `dt` seconds (no input handling)
pub fn update(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Active {
        return;
    }
    state.time_ticks += 1;

    advance_ball(&mut state.ball, dt, state.width);
    do_collisions(state);

    let mut targets = EffectTargets {
        ball: &mut state.ball,
        paddle: &mut state.paddle,
        effects: &mut state.effects,
    };
    update_power_ups(&mut state.power_ups, &mut targets, dt);

    // Power-ups and active effects survive a lost ball
    if state.ball.body.pos.y >= state.height {
        log::info!("Ball lost, resetting level {}", state.current_level);
        state.level_mut().reset();
        state.reset_player();
    } else if state.level().is_completed() {
        log::info!("Level {} completed", state.current_level);
        state.phase = GamePhase::Win;
    }

    if state.shake_time > 0.0 {
        state.shake_time -= dt;
        if state.shake_time <= 0.0 {
            state.effects.shake = false;
        }
    }
}

/// Process input, then advance the simulation by one step
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    process_input(state, input, dt);
    update(state, dt);
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::WHITE;
    use crate::sim::state::{Body, Level, PowerUp, PowerUpKind};
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    /// A brick parked in the top-right corner so levels never start completed
    fn corner_brick() -> Body {
        Body::brick(Vec2::new(760.0, 0.0), Vec2::new(40.0, 20.0), WHITE)
    }

    fn state_with(mut bricks: Vec<Body>) -> GameState {
        bricks.push(corner_brick());
        GameState::new(800.0, 600.0, vec![Level::new(bricks)], Tuning::default(), 42)
    }

    fn wall() -> Vec<Body> {
        let mut bricks = Vec::new();
        for row in 0..6 {
            for col in 0..10 {
                let pos = Vec2::new(col as f32 * 80.0, 40.0 + row as f32 * 25.0);
                if row == 5 && col % 3 == 0 {
                    bricks.push(Body::solid_brick(pos, Vec2::new(80.0, 25.0), WHITE));
                } else {
                    bricks.push(Body::brick(pos, Vec2::new(80.0, 25.0), WHITE));
                }
            }
        }
        bricks
    }

    /// Free ball whose center sits 10 above the top of a brick at (380, 300)
    fn over_brick(solid: bool) -> GameState {
        let brick = if solid {
            Body::solid_brick(Vec2::new(380.0, 300.0), Vec2::new(40.0, 20.0), WHITE)
        } else {
            Body::brick(Vec2::new(380.0, 300.0), Vec2::new(40.0, 20.0), WHITE)
        };
        let mut state = state_with(vec![brick]);
        state.ball.stuck = false;
        state.ball.body.pos = Vec2::new(387.5, 277.5);
        state.ball.body.vel = Vec2::new(0.0, 200.0);
        state
    }

    #[test]
    fn test_stuck_ball_follows_paddle() {
        let mut state = state_with(Vec::new());
        let offset = state.ball.body.pos.x - state.paddle.pos.x;
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input, DT);
        }
        assert!(state.paddle.pos.x < 350.0);
        assert!((state.ball.body.pos.x - state.paddle.pos.x - offset).abs() < 1e-3);
        assert!(state.ball.stuck);
    }

    #[test]
    fn test_paddle_stops_at_left_edge() {
        let mut state = state_with(Vec::new());
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input, DT);
        }
        // One step of overshoot at most
        assert!(state.paddle.pos.x < 0.0);
        assert!(state.paddle.pos.x >= -500.0 * DT - 1e-3);
    }

    #[test]
    fn test_release_launches_ball() {
        let mut state = state_with(Vec::new());
        let start_y = state.ball.body.pos.y;
        let input = TickInput {
            release: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(!state.ball.stuck);
        assert!(state.ball.body.pos.y < start_y);
    }

    #[test]
    fn test_inactive_phase_does_nothing() {
        let mut state = state_with(Vec::new());
        state.phase = GamePhase::Menu;
        state.ball.stuck = false;
        let before = state.ball.body.pos;
        tick(
            &mut state,
            &TickInput {
                move_right: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.ball.body.pos, before);
        assert_eq!(state.paddle.pos.x, 350.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_brick_hit_reflects_and_destroys() {
        let mut state = over_brick(false);
        do_collisions(&mut state);
        assert!(state.levels[0].bricks[0].destroyed);
        assert_eq!(state.ball.body.vel, Vec2::new(0.0, -200.0));
        assert_eq!(state.ball.body.pos.y, 275.0);
    }

    #[test]
    fn test_pass_through_destroys_without_reflecting() {
        let mut state = over_brick(false);
        state.ball.pass_through = true;
        do_collisions(&mut state);
        assert!(state.levels[0].bricks[0].destroyed);
        assert_eq!(state.ball.body.vel, Vec2::new(0.0, 200.0));
        assert_eq!(state.ball.body.pos, Vec2::new(387.5, 277.5));
    }

    #[test]
    fn test_solid_brick_survives_and_shakes() {
        let mut state = over_brick(true);
        state.ball.pass_through = true;
        do_collisions(&mut state);
        assert!(!state.levels[0].bricks[0].destroyed);
        assert_eq!(state.ball.body.vel, Vec2::new(0.0, -200.0));
        assert!(state.effects.shake);
        assert_eq!(state.shake_time, 0.05);
        assert!(state.power_ups.is_empty());

        state.ball.stuck = true;
        state.ball.body.pos = Vec2::new(50.0, 400.0);
        update(&mut state, 0.1);
        assert!(!state.effects.shake);
    }

    #[test]
    fn test_paddle_hit_bounces_up_and_sticky_catches() {
        let mut state = state_with(Vec::new());
        state.ball.stuck = false;
        state.ball.sticky = true;
        state.ball.body.pos = Vec2::new(387.5, 560.0);
        state.ball.body.vel = Vec2::new(50.0, 300.0);
        let speed = state.ball.body.vel.length();
        do_collisions(&mut state);
        assert!(state.ball.body.vel.y < 0.0);
        assert!((state.ball.body.vel.length() - speed).abs() < 1e-3);
        assert!(state.ball.stuck);
    }

    #[test]
    fn test_loss_resets_level_and_player_but_keeps_power_ups() {
        let mut state = state_with(vec![Body::brick(
            Vec2::new(100.0, 100.0),
            Vec2::new(40.0, 20.0),
            WHITE,
        )]);
        state.levels[0].bricks[0].destroyed = true;
        state.paddle.size.x = 150.0;
        state.ball.sticky = true;
        let mut sticky = PowerUp::new(PowerUpKind::Sticky, 20.0, Vec2::ZERO, &state.tuning);
        sticky.body.destroyed = true;
        sticky.activated = true;
        state.power_ups.push(sticky);

        state.ball.stuck = false;
        state.ball.body.pos = Vec2::new(50.0, 595.0);
        state.ball.body.vel = Vec2::new(0.0, 200.0);
        update(&mut state, 0.1);

        assert!(!state.levels[0].bricks[0].destroyed);
        assert_eq!(state.paddle.size.x, 100.0);
        assert!(state.ball.stuck);
        assert_eq!(state.ball.body.pos, Vec2::new(387.5, 555.0));
        assert_eq!(state.power_ups.len(), 1);
        assert!(state.ball.sticky);
        assert_eq!(state.phase, GamePhase::Active);
    }

    #[test]
    fn test_clearing_level_wins() {
        let mut state = state_with(vec![Body::solid_brick(
            Vec2::new(100.0, 100.0),
            Vec2::new(40.0, 20.0),
            WHITE,
        )]);
        update(&mut state, DT);
        assert_eq!(state.phase, GamePhase::Active);

        state.levels[0].bricks[1].destroyed = true;
        update(&mut state, DT);
        assert_eq!(state.phase, GamePhase::Win);
    }

    #[test]
    #[should_panic]
    fn test_bad_level_index_panics() {
        let mut state = state_with(Vec::new());
        state.current_level = 5;
        do_collisions(&mut state);
    }

    /// Paddle chases the ball; release whenever stuck
    fn autopilot(state: &GameState) -> TickInput {
        let target = state.ball.center().x;
        let paddle = state.paddle.center().x;
        TickInput {
            move_left: target < paddle - 10.0,
            move_right: target > paddle + 10.0,
            release: state.ball.stuck,
        }
    }

    #[test]
    fn test_cleanup_invariant_holds_every_tick() {
        let mut state = state_with(wall());
        for _ in 0..5000 {
            let input = autopilot(&state);
            tick(&mut state, &input, DT);
            assert!(state.power_ups.iter().all(|p| !(p.body.destroyed && !p.activated)));
            assert!(state.ball.body.pos.is_finite());
            if state.phase != GamePhase::Active {
                break;
            }
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = state_with(wall());
        let mut b = state_with(wall());
        for _ in 0..2000 {
            let input = autopilot(&a);
            tick(&mut a, &input, DT);
            let input = autopilot(&b);
            tick(&mut b, &input, DT);
        }
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.paddle, b.paddle);
        assert_eq!(a.power_ups, b.power_ups);
        assert_eq!(a.levels, b.levels);
    }
}
