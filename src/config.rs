use std::time::Duration;

use crate::input::Direction;
use crate::snake::Position;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, serde::Serialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// The 20 x 20 board the game is played on.
    pub const DEFAULT: Self = Self {
        width: GRID_SIZE,
        height: GRID_SIZE,
    };

    /// Returns a square grid with `size` cells per side.
    #[must_use]
    pub const fn square(size: u16) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Cell the snake head occupies after a start or reset.
    #[must_use]
    pub fn start_position(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Cells per side of the default board.
pub const GRID_SIZE: u16 = 20;

/// Fixed tick cadence in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 150;

/// Heading of a freshly reset snake.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Engine and timer configuration for one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Settings {
    pub grid: GridSize,
    pub tick_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridSize::DEFAULT,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }
}

/// Snake head glyph.
pub const GLYPH_SNAKE_HEAD: &str = "██";

/// Snake body glyph.
pub const GLYPH_SNAKE_BODY: &str = "▓▓";

/// Food glyph.
pub const GLYPH_FOOD: &str = "()";

/// Terminal columns used to draw one grid cell.
pub const CELL_COLUMNS: u16 = 2;
