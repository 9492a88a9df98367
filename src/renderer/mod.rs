//! Terminal rendering module
//!
//! Every grid cell is drawn as two terminal columns so cells look square.
//! Layout is computed by pure functions (`frame`, `screens`) and only
//! `TerminalRenderer` touches the output stream.

pub mod frame;
pub mod screens;
pub mod terminal;

pub use frame::{Glyph, compose_frame, hud_line};
pub use screens::{Line, Tone, game_over_screen, pause_screen, settings_error_screen, start_screen};
pub use terminal::TerminalRenderer;
