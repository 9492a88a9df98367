//! Keyboard mapping
//!
//! Raw key events become [`Command`]s. Directions pressed between two frames are
//! queued so quick turns are not lost, and the simulation receives one per tick.

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::Direction;

/// Most directions kept between frames; older ones are dropped first
pub const MAX_QUEUED_DIRECTIONS: usize = 3;

/// A logical action requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    /// Space: pause or resume
    Pause,
    /// Esc: back to the start screen
    Back,
    /// Enter: start / play again
    Confirm,
    /// `q` or Ctrl-C
    Quit,
}

/// Map a key event to a command, ignoring releases and unbound keys
pub fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Steer(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Steer(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Command::Steer(Direction::Right)
        }
        KeyCode::Char(' ') => Command::Pause,
        KeyCode::Esc => Command::Back,
        KeyCode::Enter => Command::Confirm,
        KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Directions waiting to be fed to the simulation
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a direction; repeats of the last queued one are dropped
    pub fn push(&mut self, dir: Direction) {
        if self.pending.back() == Some(&dir) {
            return;
        }
        if self.pending.len() == MAX_QUEUED_DIRECTIONS {
            self.pending.pop_front();
        }
        self.pending.push_back(dir);
    }

    /// Direction for the next tick
    pub fn next(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }
}
