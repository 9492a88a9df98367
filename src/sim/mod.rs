//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete tick per call, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod grid;
pub mod state;
pub mod tick;

pub use grid::Grid;
pub use state::{
    Bomb, Direction, GameEvent, GameOverReason, GamePhase, GameState, GoldenApple, Snapshot,
};
pub use tick::{ItemKind, SimError, TickInput, TickOutcome, TickResult, tick};
