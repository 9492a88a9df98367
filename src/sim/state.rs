//! Game state and core simulation types
//!
//! Everything a session needs to advance lives in [`GameState`]; the host only
//! ever reads it back through a [`Snapshot`].

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::Grid;
use crate::consts::*;
use crate::settings::GameConfig;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Snake has not moved yet, waiting for the first direction
    Idle,
    /// Active gameplay
    Running,
    /// Session ended
    GameOver,
}

/// Travel direction of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// One-cell step in grid coordinates (y grows downward)
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Head ran into the snake's own body
    SelfCollision,
    /// Head landed on a bomb while bombs end the game
    Bomb,
    /// No free cell left for the next apple
    BoardFull,
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// First direction accepted, the snake is moving
    Started,
    AteFood { score: u64 },
    AteGoldenApple { score: u64 },
    SpeedUp { speed: f32 },
    /// A bomb cut the snake down to `length` segments
    BombHalved { length: usize },
    GoldenAppleSpawned { pos: IVec2 },
    GoldenAppleExpired,
    BombSpawned { pos: IVec2 },
    BombsExpired { count: usize },
    GameOver { reason: GameOverReason },
}

/// A bomb on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bomb {
    pub pos: IVec2,
    /// Ticks until the bomb disappears
    pub ticks_left: u32,
}

/// The temporary, double-value apple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoldenApple {
    pub pos: IVec2,
    /// Ticks until the apple disappears
    pub ticks_left: u32,
}

/// Read-only view of a session handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub grid: Grid,
    /// Snake cells, head first
    pub snake: Vec<IVec2>,
    pub food: Option<IVec2>,
    pub golden_apple: Option<IVec2>,
    pub bombs: Vec<IVec2>,
    pub score: u64,
    /// Ticks per second
    pub speed: f32,
    pub phase: GamePhase,
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Set together with `GamePhase::GameOver`
    pub game_over_reason: Option<GameOverReason>,
    /// Snake cells, head at the front
    pub snake: VecDeque<IVec2>,
    /// `None` while the snake is stationary
    pub heading: Option<Direction>,
    /// Segments still owed from a golden apple; each one skips a tail pop
    pub pending_growth: u32,
    pub food: Option<IVec2>,
    pub golden_apple: Option<GoldenApple>,
    /// Regular apples eaten since the last golden apple appeared
    pub apples_since_golden: u32,
    pub bombs: Vec<Bomb>,
    /// Ticks since the last bomb spawn
    pub bomb_timer: u32,
    /// Ticks between the last bomb spawn and the next one
    pub bomb_interval: u32,
    pub score: u64,
    /// Ticks per second
    pub speed: f32,
    /// Simulated ticks while running
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new session with the given configuration and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let start = config.grid.center();
        let bomb_interval = rng.random_range(BOMB_INTERVAL_MIN..=BOMB_INTERVAL_MAX);

        let mut state = Self {
            seed,
            config,
            rng,
            phase: GamePhase::Idle,
            game_over_reason: None,
            snake: VecDeque::from([start]),
            heading: None,
            pending_growth: 0,
            food: None,
            golden_apple: None,
            apples_since_golden: 0,
            bombs: Vec::new(),
            bomb_timer: 0,
            bomb_interval,
            score: 0,
            speed: config.initial_speed(),
            time_ticks: 0,
        };

        state.food = state.free_cell();
        if state.food.is_none() {
            log::warn!("No room for the first apple on a {:?} grid", config.grid);
        }

        log::info!(
            "New session: seed={}, grid={}x{}, speed={}",
            seed,
            config.grid.width,
            config.grid.height,
            state.speed
        );
        state
    }

    pub fn head(&self) -> IVec2 {
        // The snake is never empty
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn bomb_at(&self, cell: IVec2) -> Option<usize> {
        self.bombs.iter().position(|b| b.pos == cell)
    }

    /// Random cell not covered by the snake, food, golden apple or any bomb
    pub fn free_cell(&mut self) -> Option<IVec2> {
        let grid = self.config.grid;
        // Split borrows: the RNG is mutated while the entities are read
        let Self {
            rng,
            snake,
            food,
            golden_apple,
            bombs,
            ..
        } = self;
        grid.find_free_cell(rng, |cell| {
            snake.contains(&cell)
                || *food == Some(cell)
                || golden_apple.is_some_and(|g| g.pos == cell)
                || bombs.iter().any(|b| b.pos == cell)
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.config.grid,
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            golden_apple: self.golden_apple.map(|g| g.pos),
            bombs: self.bombs.iter().map(|b| b.pos).collect(),
            score: self.score,
            speed: self.speed,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(GameConfig::default(), 42);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.heading, None);
        assert_eq!(state.snake, VecDeque::from([IVec2::new(32, 18)]));
        assert_eq!(state.score, 0);
        assert!((BOMB_INTERVAL_MIN..=BOMB_INTERVAL_MAX).contains(&state.bomb_interval));

        let food = state.food.unwrap();
        assert!(state.config.grid.contains(food));
        assert_ne!(food, state.head());
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = GameState::new(GameConfig::default(), 7);
        let b = GameState::new(GameConfig::default(), 7);
        assert_eq!(a.food, b.food);
        assert_eq!(a.bomb_interval, b.bomb_interval);
    }

    #[test]
    fn test_direction_opposites() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
        }
        assert_eq!(Direction::Up.delta(), IVec2::new(0, -1));
    }

    #[test]
    fn test_occupancy() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.food = Some(IVec2::new(1, 1));
        state.golden_apple = Some(GoldenApple {
            pos: IVec2::new(2, 2),
            ticks_left: 5,
        });
        state.bombs.push(Bomb {
            pos: IVec2::new(3, 3),
            ticks_left: 5,
        });

        assert_eq!(state.bomb_at(IVec2::new(3, 3)), Some(0));
        assert_eq!(state.bomb_at(IVec2::new(4, 4)), None);

        let taken = [
            state.head(),
            IVec2::new(1, 1),
            IVec2::new(2, 2),
            IVec2::new(3, 3),
        ];
        for _ in 0..50 {
            let cell = state.free_cell().unwrap();
            assert!(!taken.contains(&cell));
        }
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(GameConfig::default(), 3);
        state.bombs.push(Bomb {
            pos: IVec2::new(0, 0),
            ticks_left: 10,
        });
        let snap = state.snapshot();
        assert_eq!(snap.snake, vec![state.head()]);
        assert_eq!(snap.food, state.food);
        assert_eq!(snap.golden_apple, None);
        assert_eq!(snap.bombs, vec![IVec2::new(0, 0)]);
        assert_eq!(snap.phase, GamePhase::Idle);
        assert_eq!(snap.grid, Grid::new(64, 36));
    }
}
