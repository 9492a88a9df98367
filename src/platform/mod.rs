//! Platform abstraction layer
//!
//! Handles the terminal side of the host shell:
//! - Input events mapped to game commands
//! - Frame pacing from the simulation speed
//! - Raw mode / alternate screen lifetime

pub mod input;
pub mod terminal;
pub mod time;

pub use input::{Command, InputQueue, map_key};
pub use terminal::TerminalGuard;
pub use time::FrameClock;
