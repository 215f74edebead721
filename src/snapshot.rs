use serde::Serialize;

use crate::config::GridSize;
use crate::game::{DeathReason, GameStatus};
use crate::input::Direction;
use crate::snake::Position;

/// Immutable view of one engine state, taken after a tick or a reset.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    /// Body cells, head first.
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub heading: Direction,
    pub grid: GridSize,
}

impl Snapshot {
    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
