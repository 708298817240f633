//! Game state and core simulation types
//!
//! Everything that must be persisted for save/restore or determinism
//! lives here. The tick module mutates it; the resolver only ever sees
//! per-tick snapshots built by [`GameState::obstacles`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Obstacle, ObstacleKind};
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Obstacle id reserved for the paddle; entity ids start above it
const PADDLE_OBSTACLE_ID: u32 = 0;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball attached to the paddle, waiting for launch input
    Serve,
    /// Active gameplay
    Playing,
    /// Between-level rest period
    Breather,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Ball state - attached to the paddle or free-moving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BallState {
    /// Riding the paddle at a horizontal offset from its center
    Attached { offset: f32 },
    /// Free-moving
    Free,
}

/// The moving body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Full extent of the square collision box
    pub size: f32,
    pub state: BallState,
}

impl Ball {
    pub fn new(size: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size,
            state: BallState::Attached { offset: 0.0 },
        }
    }

    /// Collision box, centered on `pos`
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size, self.size)
    }

    /// Keep an attached ball riding the paddle
    pub fn update_attached(&mut self, paddle: &Paddle) {
        if let BallState::Attached { offset } = self.state {
            self.pos = Vec2::new(
                paddle.x + offset,
                paddle.bounds().top - self.size / 2.0 - 1.0,
            );
        }
    }

    /// Launch from the paddle; the attach offset biases the serve angle
    /// the same way an off-center paddle hit would
    pub fn launch(&mut self, paddle: &Paddle, speed: f32, deflection_scale: f32) {
        if let BallState::Attached { offset } = self.state {
            let ratio = (offset / paddle.half_width() * deflection_scale).clamp(-1.0, 1.0);
            self.vel = Vec2::new(ratio, -1.0).normalize() * speed;
            self.state = BallState::Free;
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Center x position
    pub x: f32,
    /// Full width; must be positive (the deflection ratio divides by it)
    pub width: f32,
}

impl Paddle {
    pub fn new(width: f32) -> Self {
        Self {
            x: FIELD_WIDTH / 2.0,
            width,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    /// Collision box; the centerline sits `PADDLE_BASELINE` above the
    /// bottom of the field
    pub fn bounds(&self) -> Rect {
        Rect::from_center(
            Vec2::new(self.x, FIELD_HEIGHT - PADDLE_BASELINE),
            self.width,
            PADDLE_HEIGHT,
        )
    }

    pub fn as_obstacle(&self) -> Obstacle {
        Obstacle {
            id: PADDLE_OBSTACLE_ID,
            kind: ObstacleKind::Paddle,
            rect: self.bounds(),
        }
    }

    /// Move toward a target x at bounded speed, staying inside the field
    pub fn move_toward(&mut self, target_x: f32, dt: f32, max_speed: f32) {
        let max_delta = max_speed * dt;
        let delta = (target_x - self.x).clamp(-max_delta, max_delta);
        self.x = (self.x + delta).clamp(self.half_width(), FIELD_WIDTH - self.half_width());
    }
}

/// A destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub rect: Rect,
    /// Grid row, 0 at the top; drives the point value
    pub row: u32,
    pub points: u32,
}

impl Brick {
    pub fn as_obstacle(&self) -> Obstacle {
        Obstacle {
            id: self.id,
            kind: ObstacleKind::Brick,
            rect: self.rect,
        }
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Stream selector; level generation pins it to the level index so a
    /// regenerated level is identical after save/load
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Current level index (0-based)
    pub level_index: u32,
    pub lives: u8,
    pub score: u64,
    /// Bricks destroyed since the last paddle hit or ball loss
    pub combo: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Ticks remaining in the between-level breather
    pub breather_ticks: u32,
    /// Balance values the run was started with
    pub tuning: Tuning,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live bricks, sorted by id for deterministic iteration
    pub bricks: Vec<Brick>,
    /// Boundary walls, built once at construction
    pub walls: Vec<Obstacle>,
    /// Next entity id
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            level_index: 0,
            lives: tuning.starting_lives,
            score: 0,
            combo: 0,
            time_ticks: 0,
            phase: GamePhase::Serve,
            breather_ticks: 0,
            paddle: Paddle::new(tuning.paddle_width),
            ball: Ball::new(BALL_SIZE),
            bricks: Vec::new(),
            walls: Vec::new(),
            tuning,
            next_id: PADDLE_OBSTACLE_ID + 1,
        };
        state.walls = state.build_walls();
        state.ball.update_attached(&state.paddle);
        state
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Left, right, and top boundary walls; the bottom edge stays open
    fn build_walls(&mut self) -> Vec<Obstacle> {
        let t = WALL_THICKNESS;
        [
            Rect::new(-t, -t, t, FIELD_HEIGHT + t),
            Rect::new(FIELD_WIDTH, -t, t, FIELD_HEIGHT + t),
            Rect::new(0.0, -t, FIELD_WIDTH, t),
        ]
        .into_iter()
        .map(|rect| Obstacle {
            id: self.next_entity_id(),
            kind: ObstacleKind::Wall,
            rect,
        })
        .collect()
    }

    /// Flatten walls, live bricks, and the paddle into the per-tick
    /// obstacle snapshot for the resolver
    pub fn obstacles(&self) -> Vec<Obstacle> {
        let mut out = Vec::with_capacity(self.walls.len() + self.bricks.len() + 1);
        out.extend(self.walls.iter().copied());
        out.extend(self.bricks.iter().map(Brick::as_obstacle));
        out.push(self.paddle.as_obstacle());
        out
    }

    /// Put the ball back on the paddle for the next serve
    pub fn attach_ball(&mut self) {
        self.ball.vel = Vec2::ZERO;
        self.ball.state = BallState::Attached { offset: 0.0 };
        self.ball.update_attached(&self.paddle);
    }
}
