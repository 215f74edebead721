use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::DirectionError;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, serde::Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Every direction, in `Up, Down, Left, Right` order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the `(dx, dy)` unit step; `y` grows downwards.
    #[must_use]
    pub fn vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Parses a raw `(dx, dy)` step. Diagonal, zero and longer vectors are rejected.
    pub fn from_vector(dx: i32, dy: i32) -> Result<Self, DirectionError> {
        match (dx, dy) {
            (0, -1) => Ok(Self::Up),
            (0, 1) => Ok(Self::Down),
            (-1, 0) => Ok(Self::Left),
            (1, 0) => Ok(Self::Right),
            _ => Err(DirectionError { dx, dy }),
        }
    }
}

/// Last-writer-wins latch for the direction applied on the next tick.
///
/// Submissions are never judged here. Whether a direction reverses the snake
/// depends on the move the engine actually executed, which is only known when
/// the tick runs.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct InputDirector {
    pending: Direction,
}

impl InputDirector {
    #[must_use]
    pub fn new(initial: Direction) -> Self {
        Self { pending: initial }
    }

    /// Records `direction` as pending, replacing any earlier submission.
    pub fn submit(&mut self, direction: Direction) {
        self.pending = direction;
    }

    /// Records a raw vector; a non-unit vector leaves the latch untouched.
    pub fn submit_vector(&mut self, dx: i32, dy: i32) -> Result<(), DirectionError> {
        match Direction::from_vector(dx, dy) {
            Ok(direction) => {
                self.submit(direction);
                Ok(())
            }
            Err(error) => {
                log::debug!("ignoring direction submission: {error}");
                Err(error)
            }
        }
    }

    /// Direction the next tick will try to apply. Reading does not clear it.
    #[must_use]
    pub fn pending(&self) -> Direction {
        self.pending
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Confirm,
    Quit,
}

/// Maps a terminal key press to a game input. Arrows and WASD steer.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Confirm,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Waits up to `timeout` for one key press and maps it.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}
