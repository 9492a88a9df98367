//! Nonspecial Snake - A wrap-around grid snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, items, bombs, scoring)
//! - `settings`: `settings.json` loading and validation into a `GameConfig`
//! - `platform`: Terminal input mapping and frame pacing
//! - `renderer`: Terminal rendering of snapshots and menu screens

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{BombBehavior, GameConfig, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Size of one grid cell in screen pixels
    pub const CELL_SIZE: u32 = 20;

    /// Minimum screen resolution; smaller configured values are raised to this
    pub const MIN_SCREEN_WIDTH: u32 = 1280;
    pub const MIN_SCREEN_HEIGHT: u32 = 720;

    /// Ticks per second at 100% speed, before any speed-ups
    pub const BASE_SPEED: f32 = 10.0;
    /// Speed gained each time the score lands on a multiple of this
    pub const SPEED_UP_SCORE_STEP: u64 = 5;

    /// Golden apple lifetime is configured in seconds, stored in ticks
    pub const TICKS_PER_SECOND: u32 = 10;
    /// Regular apples needed before a golden apple may appear (inclusive range)
    pub const GOLDEN_THRESHOLD_MIN: u32 = 1;
    pub const GOLDEN_THRESHOLD_MAX: u32 = 10;

    /// Bomb lifetime in ticks
    pub const BOMB_DURATION_TICKS: u32 = 50;
    /// Bomb spawn interval bounds in ticks (inclusive range)
    pub const BOMB_INTERVAL_MIN: u32 = 50;
    pub const BOMB_INTERVAL_MAX: u32 = 100;

    /// Random placement attempts before scanning the whole grid
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

    /// Score for a regular apple
    pub const FOOD_SCORE: u64 = 1;
    /// Score for a golden apple
    pub const GOLDEN_APPLE_SCORE: u64 = 2;
}

/// Wall-clock time between two ticks at the given speed (ticks per second)
#[inline]
pub fn tick_interval(speed: f32) -> std::time::Duration {
    std::time::Duration::from_secs_f32(1.0 / speed.max(f32::EPSILON))
}
