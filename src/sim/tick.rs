//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. The
//! external frame loop calls [`tick`] once per animation frame with a
//! fixed `dt`; everything else in here is driven from that single entry
//! point.

use rand::Rng;

use super::collision::{ContactEvent, ResolveParams, resolve};
use super::rect::Rect;
use super::state::{BallState, Brick, GamePhase, GameState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Target paddle center x (from mouse/touch position)
    pub target_x: Option<f32>,
    /// Launch the ball (click/tap/space)
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Skip to the next level (debug/testing)
    pub skip_level: bool,
    /// Idle/demo mode - the built-in AI plays
    pub idle_mode: bool,
}

/// Build a fresh run: state plus the first level's brick field
pub fn new_game(seed: u64, tuning: Tuning) -> GameState {
    let mut state = GameState::with_tuning(seed, tuning);
    generate_level(&mut state);
    state
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing | GamePhase::Serve => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                state.phase = if matches!(state.ball.state, BallState::Attached { .. }) {
                    GamePhase::Serve
                } else {
                    GamePhase::Playing
                };
            }
            _ => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        _ => {}
    }

    // Idle/demo mode - AI plays the game
    let mut input = input.clone();
    if input.idle_mode {
        if matches!(state.phase, GamePhase::Serve) {
            input.launch = true;
        }
        if matches!(state.ball.state, BallState::Free) {
            // Lead the ball slightly, with a small oscillating offset so
            // autoplay runs don't settle into a perfect loop
            let lead = state.ball.pos + state.ball.vel.normalize_or_zero() * 24.0;
            let wobble = (state.time_ticks as f32 * 0.013).sin() * 6.0;
            input.target_x = Some(lead.x + wobble);
        }
    }
    let input = &input;

    // Debug: skip to next level
    if input.skip_level {
        state.bricks.clear();
        state.level_index += 1;
        state.breather_ticks = 0;
        generate_level(state);
        state.attach_ball();
        state.phase = GamePhase::Serve;
        return;
    }

    state.time_ticks += 1;

    // Update paddle position
    if let Some(target) = input.target_x {
        let max_speed = state.tuning.paddle_max_speed;
        state.paddle.move_toward(target, dt, max_speed);
    }

    match state.phase {
        GamePhase::Serve => {
            state.ball.update_attached(&state.paddle);
            if input.launch {
                state.ball.launch(
                    &state.paddle,
                    state.tuning.ball_start_speed,
                    state.tuning.deflection_scale,
                );
                state.phase = GamePhase::Playing;
                log::debug!("ball launched on level {}", state.level_index);
            }
        }

        GamePhase::Playing => {
            step_ball(state, dt);

            // Level cleared once the last brick is gone (unless the ball
            // loss above already changed phase)
            if state.phase == GamePhase::Playing && state.bricks.is_empty() {
                state.level_index += 1;
                state.breather_ticks = state.tuning.breather_ticks();
                state.phase = GamePhase::Breather;
                log::info!(
                    "level cleared, next is {}, score {}",
                    state.level_index,
                    state.score
                );
            }
        }

        GamePhase::Breather => {
            state.breather_ticks = state.breather_ticks.saturating_sub(1);
            if state.breather_ticks == 0 {
                generate_level(state);
                state.attach_ball();
                state.phase = GamePhase::Serve;
            }
        }

        _ => {}
    }
}

/// Move the free ball one step and apply the resolver's side effects
fn step_ball(state: &mut GameState, dt: f32) {
    if !matches!(state.ball.state, BallState::Free) {
        return;
    }

    let params = ResolveParams {
        base_speed: state.ball.vel.length(),
        deflection_scale: state.tuning.deflection_scale,
        field_height: FIELD_HEIGHT,
    };
    let obstacles = state.obstacles();
    let outcome = resolve(state.ball.bounds(), state.ball.vel, dt, &obstacles, &params);

    state.ball.pos = outcome.rect.center();
    state.ball.vel = outcome.vel;

    for event in &outcome.events {
        match *event {
            ContactEvent::BrickHit { id } => {
                if let Some(idx) = state.bricks.iter().position(|b| b.id == id) {
                    let brick = state.bricks.remove(idx);
                    state.combo += 1;
                    state.score += u64::from(brick.points);
                    log::debug!(
                        "brick {} destroyed (row {}), score {}, combo {}",
                        brick.id,
                        brick.row,
                        state.score,
                        state.combo
                    );
                }
            }
            ContactEvent::PaddleHit { ratio } => {
                state.combo = 0;
                let boosted = (state.ball.vel.length() * state.tuning.paddle_boost)
                    .min(state.tuning.ball_max_speed);
                state.ball.vel = state.ball.vel.normalize_or_zero() * boosted;
                log::debug!("paddle hit, deflection ratio {ratio:.2}");
            }
            ContactEvent::BallLost => {
                state.lives = state.lives.saturating_sub(1);
                state.combo = 0;
                log::info!("ball lost, {} lives left", state.lives);
                if state.lives == 0 {
                    state.phase = GamePhase::GameOver;
                } else {
                    state.attach_ball();
                    state.phase = GamePhase::Serve;
                }
            }
        }
    }
}

/// Brick layout variants; level 0 is always the full grid
#[derive(Debug, Clone, Copy)]
enum Layout {
    Full,
    Checker,
    Pyramid,
}

/// Lay out the brick grid for the current level
pub fn generate_level(state: &mut GameState) {
    // Pin the RNG stream to the level so a reloaded save regenerates the
    // identical field
    state.rng_state.stream = u64::from(state.level_index);
    let mut rng = state.rng_state.to_rng();

    let rows = state.tuning.brick_rows;
    let cols = state.tuning.brick_cols;
    let grid_left = (FIELD_WIDTH - cols as f32 * BRICK_WIDTH) / 2.0;

    let layout = if state.level_index == 0 {
        Layout::Full
    } else {
        match rng.random_range(0..3u32) {
            0 => Layout::Full,
            1 => Layout::Checker,
            _ => Layout::Pyramid,
        }
    };

    state.bricks.clear();
    for row in 0..rows {
        for col in 0..cols {
            let keep = match layout {
                Layout::Full => true,
                Layout::Checker => (row + col) % 2 == 0,
                Layout::Pyramid => col >= row && col < cols.saturating_sub(row),
            };
            if !keep {
                continue;
            }
            let id = state.next_entity_id();
            let rect = Rect::new(
                grid_left + col as f32 * BRICK_WIDTH,
                BRICK_TOP_MARGIN + row as f32 * BRICK_HEIGHT,
                BRICK_WIDTH,
                BRICK_HEIGHT,
            );
            state.bricks.push(Brick {
                id,
                rect,
                row,
                points: points_for_row(row, rows),
            });
        }
    }
    state.bricks.sort_by_key(|b| b.id);

    log::info!(
        "level {} generated: {} bricks, {:?} layout",
        state.level_index,
        state.bricks.len(),
        layout
    );
}

/// Top rows pay more, classic arcade scoring
fn points_for_row(row: u32, rows: u32) -> u32 {
    (rows - row) * 10
}
