//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (bricks sorted by id)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{ContactEvent, Obstacle, ObstacleKind, Resolution, ResolveParams, resolve};
pub use rect::Rect;
pub use state::{Ball, BallState, Brick, GamePhase, GameState, Paddle, RngState};
pub use tick::{TickInput, generate_level, new_game, tick};
