use std::io;

use thiserror::Error;

use crate::snake::Position;

/// A raw direction vector that is not one of the four unit steps.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("({dx}, {dy}) is not a unit direction vector")]
pub struct DirectionError {
    pub dx: i32,
    pub dy: i32,
}

/// Reasons an explicit mid-game board cannot seed an engine.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum BoardError {
    #[error("snake must have at least one segment")]
    EmptySnake,
    #[error("snake of {len} segments does not fit a grid of {cells} cells")]
    SnakeTooLong { len: usize, cells: usize },
    #[error("segment {0:?} lies outside the grid")]
    OutOfBounds(Position),
    #[error("segment {0:?} appears more than once")]
    DuplicateSegment(Position),
    #[error("segments {0:?} and {1:?} are not adjacent")]
    Disconnected(Position, Position),
    #[error("food at {0:?} is outside the grid or under the snake")]
    InvalidFood(Position),
}

/// High-score persistence failures.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
