//! Discrete simulation tick
//!
//! One call to [`tick`] is one frame of the game: steer, move, resolve bombs
//! and items, then run the bomb and golden apple timers.

use glam::IVec2;
use rand::Rng;
use thiserror::Error;

use super::state::{
    Bomb, Direction, GameEvent, GameOverReason, GamePhase, GameState, GoldenApple, Snapshot,
};
use crate::consts::*;
use crate::settings::BombBehavior;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Requested direction, if any key was pressed
    pub direction: Option<Direction>,
}

/// Item kinds that need a free cell to appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Food,
    GoldenApple,
    Bomb,
}

/// Placement failures reported by [`GameState::place`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    /// Every cell is taken, nothing can be placed
    #[error("no free cell left on the grid for {item:?}")]
    NoSpace { item: ItemKind },
}

/// Whether the session continues after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver(GameOverReason),
}

/// Everything the host needs after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub outcome: TickOutcome,
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
    pub snapshot: Snapshot,
}

impl TickResult {
    pub fn is_game_over(&self) -> bool {
        matches!(self.outcome, TickOutcome::GameOver(_))
    }
}

impl GameState {
    /// Advance one tick with an optional direction request
    pub fn advance(&mut self, direction: Option<Direction>) -> TickResult {
        tick(self, &TickInput { direction })
    }

    /// Pick a free cell for `item`
    pub fn place(&mut self, item: ItemKind) -> Result<IVec2, SimError> {
        self.free_cell().ok_or(SimError::NoSpace { item })
    }
}

/// Advance the game state by one tick.
///
/// Terminal ticks (self-collision, bomb with [`BombBehavior::EndGame`], no room
/// for the next apple) leave the snake, items and score exactly as they were
/// before the tick. Once the state is [`GamePhase::GameOver`] further calls
/// change nothing.
pub fn tick(state: &mut GameState, input: &TickInput) -> TickResult {
    let mut events = Vec::new();

    if let Some(reason) = state.game_over_reason {
        return result(state, TickOutcome::GameOver(reason), events);
    }

    steer(state, input.direction, &mut events);

    if state.phase == GamePhase::Idle {
        return result(state, TickOutcome::Continue, events);
    }

    state.time_ticks += 1;

    let Some(heading) = state.heading else {
        return result(state, TickOutcome::Continue, events);
    };
    let new_head = state.config.grid.wrap(state.head() + heading.delta());

    if state.snake.contains(&new_head) {
        return end_game(state, GameOverReason::SelfCollision, events);
    }

    // The eaten apple's cell becomes the head and the tail stays, so the cells
    // free now are exactly the cells free after the move
    let next_food = if state.food == Some(new_head) {
        match state.place(ItemKind::Food) {
            Ok(cell) => Some(cell),
            Err(e) => {
                log::warn!("{}", e);
                return end_game(state, GameOverReason::BoardFull, events);
            }
        }
    } else {
        None
    };

    // Bombs take priority over items; they never share a cell with one
    let mut halve = false;
    if state.config.bombs_enabled {
        if let Some(index) = state.bomb_at(new_head) {
            match state.config.bomb_behavior {
                BombBehavior::EndGame => {
                    return end_game(state, GameOverReason::Bomb, events);
                }
                BombBehavior::HalveLength => {
                    state.bombs.swap_remove(index);
                    // Owed growth is forfeit; the bomb tick always drops the tail
                    state.pending_growth = 0;
                    halve = true;
                }
            }
        }
    }

    state.snake.push_front(new_head);

    if let Some(cell) = next_food {
        eat_food(state, cell, &mut events);
    } else if state.golden_apple.is_some_and(|g| g.pos == new_head) {
        eat_golden_apple(state, &mut events);
    } else if state.pending_growth > 0 {
        state.pending_growth -= 1;
    } else if state.len() > 1 {
        state.snake.pop_back();
    }

    if halve {
        let length = (state.len() / 2).max(1);
        state.snake.truncate(length);
        log::info!("Bomb hit, snake cut to {} segments", length);
        events.push(GameEvent::BombHalved { length });
    }

    if state.config.bombs_enabled {
        update_bombs(state, &mut events);
    }
    update_golden_apple(state, &mut events);

    result(state, TickOutcome::Continue, events)
}

/// Accept a direction unless it reverses the current heading
fn steer(state: &mut GameState, requested: Option<Direction>, events: &mut Vec<GameEvent>) {
    let Some(dir) = requested else {
        return;
    };
    if state.heading.is_some_and(|h| h.opposite() == dir) {
        log::debug!("Ignoring reversal {:?} while heading {:?}", dir, state.heading);
        return;
    }
    state.heading = Some(dir);

    if state.phase == GamePhase::Idle {
        state.phase = GamePhase::Running;
        log::info!("Snake started moving {:?}", dir);
        events.push(GameEvent::Started);
    }
}

fn end_game(state: &mut GameState, reason: GameOverReason, mut events: Vec<GameEvent>) -> TickResult {
    state.phase = GamePhase::GameOver;
    state.game_over_reason = Some(reason);
    log::info!("Game over ({:?}) with score {}", reason, state.score);
    events.push(GameEvent::GameOver { reason });
    result(state, TickOutcome::GameOver(reason), events)
}

fn result(state: &GameState, outcome: TickOutcome, events: Vec<GameEvent>) -> TickResult {
    TickResult {
        outcome,
        events,
        snapshot: state.snapshot(),
    }
}

/// Add points and apply the multiple-of-five speed-up
fn add_score(state: &mut GameState, points: u64, events: &mut Vec<GameEvent>) {
    state.score += points;
    if state.score > 0 && state.score % SPEED_UP_SCORE_STEP == 0 {
        state.speed += state.config.speed_increment();
        log::debug!("Speed up to {} at score {}", state.speed, state.score);
        events.push(GameEvent::SpeedUp { speed: state.speed });
    }
}

fn eat_food(state: &mut GameState, next_food: IVec2, events: &mut Vec<GameEvent>) {
    state.apples_since_golden += 1;
    add_score(state, FOOD_SCORE, events);
    events.push(GameEvent::AteFood { score: state.score });
    state.food = Some(next_food);

    // Golden apples can only appear right after a regular apple is eaten
    if state.config.golden_apple_enabled {
        let threshold = state
            .rng
            .random_range(GOLDEN_THRESHOLD_MIN..=GOLDEN_THRESHOLD_MAX);
        if state.apples_since_golden >= threshold && state.golden_apple.is_none() {
            spawn_golden_apple(state, events);
        }
    }
}

fn spawn_golden_apple(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let pos = match state.place(ItemKind::GoldenApple) {
        Ok(pos) => pos,
        Err(e) => {
            log::warn!("{}", e);
            return;
        }
    };
    state.golden_apple = Some(GoldenApple {
        pos,
        ticks_left: state.config.golden_apple_duration_ticks,
    });
    state.apples_since_golden = 0;
    log::debug!("Golden apple at {}", pos);
    events.push(GameEvent::GoldenAppleSpawned { pos });
}

fn eat_golden_apple(state: &mut GameState, events: &mut Vec<GameEvent>) {
    // Tail stays this tick, and one more segment is owed for the next move
    state.pending_growth += 1;
    add_score(state, GOLDEN_APPLE_SCORE, events);
    state.golden_apple = None;
    events.push(GameEvent::AteGoldenApple { score: state.score });
}

/// Bomb spawn cadence and bomb expiry
fn update_bombs(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.bomb_timer += 1;
    if state.bomb_timer >= state.bomb_interval {
        state.bomb_timer = 0;
        state.bomb_interval = state
            .rng
            .random_range(BOMB_INTERVAL_MIN..=BOMB_INTERVAL_MAX);
        spawn_bomb(state, events);
    }

    let (kept, expired): (Vec<Bomb>, Vec<Bomb>) = std::mem::take(&mut state.bombs)
        .into_iter()
        .map(|b| Bomb {
            ticks_left: b.ticks_left.saturating_sub(1),
            ..b
        })
        .partition(|b| b.ticks_left > 0);
    state.bombs = kept;

    if !expired.is_empty() {
        log::debug!("{} bomb(s) expired", expired.len());
        events.push(GameEvent::BombsExpired {
            count: expired.len(),
        });
    }
}

fn spawn_bomb(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let pos = match state.place(ItemKind::Bomb) {
        Ok(pos) => pos,
        Err(e) => {
            log::warn!("{}", e);
            return;
        }
    };
    state.bombs.push(Bomb {
        pos,
        ticks_left: BOMB_DURATION_TICKS,
    });
    log::debug!("Bomb at {}, next in {} ticks", pos, state.bomb_interval);
    events.push(GameEvent::BombSpawned { pos });
}

fn update_golden_apple(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(golden) = state.golden_apple.as_mut() else {
        return;
    };
    golden.ticks_left = golden.ticks_left.saturating_sub(1);
    if golden.ticks_left == 0 {
        state.golden_apple = None;
        log::debug!("Golden apple expired");
        events.push(GameEvent::GoldenAppleExpired);
    }
}
