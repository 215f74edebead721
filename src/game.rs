use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GridSize, INITIAL_DIRECTION};
use crate::error::{BoardError, DirectionError};
use crate::food::place_food;
use crate::input::{Direction, InputDirector};
use crate::snake::{Position, Snake};
use crate::snapshot::Snapshot;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Idle,
    Playing,
    GameOver,
    Won,
}

impl GameStatus {
    /// Returns true for states only `reset` can leave.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

/// Cause of the most recent game over.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, serde::Serialize)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Notifications emitted by a tick, in the order they happened.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    FoodEaten { score: u32 },
    /// The high score rose; carries the value to persist.
    HighScoreChanged(u32),
    GameOver(DeathReason),
    Won,
}

/// An explicit mid-game layout used to seed a playing engine.
#[derive(Debug, Clone)]
pub struct Board {
    /// Body segments, head first.
    pub snake: Snake,
    pub food: Position,
    /// Direction latched for the next tick and recorded as the last move.
    pub heading: Direction,
}

/// The simulation engine: sole owner of snake, food, score and status.
#[derive(Debug, Clone)]
pub struct Engine<R = StdRng> {
    grid: GridSize,
    snake: Snake,
    food: Option<Position>,
    heading: Direction,
    input: InputDirector,
    high_score: u32,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    rng: R,
}

impl Engine<StdRng> {
    /// Creates an idle engine with an entropy-seeded food source.
    #[must_use]
    pub fn new(grid: GridSize, high_score: u32) -> Self {
        Self::with_rng(grid, high_score, StdRng::from_entropy())
    }

    /// Creates a deterministic idle engine for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(grid: GridSize, high_score: u32, seed: u64) -> Self {
        Self::with_rng(grid, high_score, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Creates an idle engine drawing food cells from `rng`.
    ///
    /// # Panics
    ///
    /// Panics when the grid has fewer than two cells.
    #[must_use]
    pub fn with_rng(grid: GridSize, high_score: u32, mut rng: R) -> Self {
        assert!(
            grid.total_cells() >= 2,
            "grid {}x{} is too small to play on",
            grid.width,
            grid.height
        );

        let snake = Snake::new(grid.start_position());
        let food = place_food(&mut rng, grid, &snake);

        Self {
            grid,
            snake,
            food: Some(food),
            heading: INITIAL_DIRECTION,
            input: InputDirector::new(INITIAL_DIRECTION),
            high_score,
            status: GameStatus::Idle,
            death_reason: None,
            tick_count: 0,
            rng,
        }
    }

    /// Creates a playing engine from a validated mid-game board.
    ///
    /// The score is derived from the snake length. `high_score` is kept as
    /// given; the next growth past it reports `HighScoreChanged` as usual.
    pub fn from_board(
        grid: GridSize,
        board: Board,
        high_score: u32,
        rng: R,
    ) -> Result<Self, BoardError> {
        validate_board(grid, &board)?;

        Ok(Self {
            grid,
            snake: board.snake,
            food: Some(board.food),
            heading: board.heading,
            input: InputDirector::new(board.heading),
            high_score,
            status: GameStatus::Playing,
            death_reason: None,
            tick_count: 0,
            rng,
        })
    }

    /// Latches `direction` for the next tick. Accepted in every state.
    pub fn submit(&mut self, direction: Direction) {
        self.input.submit(direction);
    }

    /// Latches a raw `(dx, dy)` vector; non-unit vectors are ignored.
    pub fn submit_vector(&mut self, dx: i32, dy: i32) -> Result<(), DirectionError> {
        self.input.submit_vector(dx, dy)
    }

    /// Leaves `Idle` for a fresh game. Returns false in any other state.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::Idle {
            return false;
        }

        self.begin();
        true
    }

    /// Starts a fresh game from `Idle`, `GameOver` or `Won`.
    ///
    /// Returns false while a game is in progress.
    pub fn reset(&mut self) -> bool {
        if self.status == GameStatus::Playing {
            return false;
        }

        self.begin();
        true
    }

    /// Advances the simulation by one step and reports what happened.
    ///
    /// Outside `Playing` this does nothing and returns no events.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.status != GameStatus::Playing {
            return events;
        }

        let movement = self.effective_move();
        let next_head = self.snake.head().step(movement);

        if !next_head.is_within_bounds(self.grid) {
            self.die(DeathReason::WallCollision, &mut events);
            return events;
        }

        // Checked against the pre-move body, so the cell the tail is about
        // to leave still counts as occupied.
        if self.snake.occupies(next_head) {
            self.die(DeathReason::SelfCollision, &mut events);
            return events;
        }

        let ate = self.food == Some(next_head);
        self.snake.advance(next_head, ate);
        self.heading = movement;
        self.tick_count += 1;

        if ate {
            self.eat(&mut events);
        }

        events
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food cell; `None` only once the board is full.
    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    /// One point per growth event, so always `snake length - 1`.
    #[must_use]
    pub fn score(&self) -> u32 {
        u32::try_from(self.snake.len().saturating_sub(1)).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Direction of the last executed move.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Direction latched for the next tick.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.input.pending()
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    /// Number of moves executed since the last start or reset.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Read-only copy of everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            score: self.score(),
            high_score: self.high_score,
            status: self.status,
            death_reason: self.death_reason,
            heading: self.heading,
            grid: self.grid,
        }
    }

    /// Resolves the latched direction against the move actually executed.
    ///
    /// A request that would put the head onto the neck is dropped and the
    /// snake keeps going straight.
    fn effective_move(&self) -> Direction {
        let requested = self.input.pending();
        let head = self.snake.head();

        match self.snake.neck() {
            Some(neck) if head.step(requested) == neck => {
                let straight = self.snake.last_move().unwrap_or(self.heading);
                log::debug!("discarding reversal {requested:?}, continuing {straight:?}");
                straight
            }
            _ => requested,
        }
    }

    fn eat(&mut self, events: &mut Vec<GameEvent>) {
        let score = self.score();
        events.push(GameEvent::FoodEaten { score });

        if score > self.high_score {
            self.high_score = score;
            events.push(GameEvent::HighScoreChanged(score));
        }

        if self.snake.len() == self.grid.total_cells() {
            self.food = None;
            self.status = GameStatus::Won;
            events.push(GameEvent::Won);
            log::info!("board filled, game won with score {score}");
            return;
        }

        self.food = Some(place_food(&mut self.rng, self.grid, &self.snake));
    }

    fn die(&mut self, reason: DeathReason, events: &mut Vec<GameEvent>) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        events.push(GameEvent::GameOver(reason));
        log::info!("game over ({reason:?}) with score {}", self.score());
    }

    fn begin(&mut self) {
        self.snake = Snake::new(self.grid.start_position());
        self.heading = INITIAL_DIRECTION;
        self.input = InputDirector::new(INITIAL_DIRECTION);
        self.death_reason = None;
        self.tick_count = 0;
        self.food = Some(place_food(&mut self.rng, self.grid, &self.snake));
        self.status = GameStatus::Playing;
        log::info!("new game started, high score {}", self.high_score);
    }
}

fn validate_board(grid: GridSize, board: &Board) -> Result<(), BoardError> {
    let snake = &board.snake;
    if snake.is_empty() {
        return Err(BoardError::EmptySnake);
    }

    if snake.len() >= grid.total_cells() {
        return Err(BoardError::SnakeTooLong {
            len: snake.len(),
            cells: grid.total_cells(),
        });
    }

    let mut seen = HashSet::with_capacity(snake.len());
    let mut previous: Option<Position> = None;
    for &segment in snake.segments() {
        if !segment.is_within_bounds(grid) {
            return Err(BoardError::OutOfBounds(segment));
        }
        if !seen.insert(segment) {
            return Err(BoardError::DuplicateSegment(segment));
        }
        if let Some(prev) = previous {
            if prev.direction_to(segment).is_none() {
                return Err(BoardError::Disconnected(prev, segment));
            }
        }
        previous = Some(segment);
    }

    if !board.food.is_within_bounds(grid) || snake.occupies(board.food) {
        return Err(BoardError::InvalidFood(board.food));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::error::BoardError;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{Board, DeathReason, Engine, GameEvent, GameStatus};

    fn playing(
        grid: GridSize,
        segments: Vec<Position>,
        food: Position,
        heading: Direction,
    ) -> Engine {
        let board = Board {
            snake: Snake::from_segments(segments),
            food,
            heading,
        };
        Engine::from_board(grid, board, 0, StdRng::seed_from_u64(5)).expect("board should be valid")
    }

    #[test]
    fn new_engine_waits_in_idle() {
        let mut engine = Engine::new_with_seed(GridSize::DEFAULT, 3, 1);

        assert_eq!(engine.status(), GameStatus::Idle);
        assert!(engine.tick().is_empty());
        assert_eq!(engine.snake().head(), Position { x: 10, y: 10 });
        assert_eq!(engine.high_score(), 3);
    }

    #[test]
    fn start_resets_to_single_cell_heading_right() {
        let mut engine = Engine::new_with_seed(GridSize::DEFAULT, 0, 2);

        assert!(engine.start());

        assert_eq!(engine.status(), GameStatus::Playing);
        assert_eq!(engine.snake().len(), 1);
        assert_eq!(engine.heading(), Direction::Right);
        assert_eq!(engine.score(), 0);
        let food = engine.food().expect("fresh game has food");
        assert!(!engine.snake().occupies(food));
    }

    #[test]
    fn start_and_reset_refuse_while_playing() {
        let mut engine = Engine::new_with_seed(GridSize::DEFAULT, 0, 3);
        assert!(engine.start());

        assert!(!engine.start());
        assert!(!engine.reset());
        assert_eq!(engine.status(), GameStatus::Playing);
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut engine = playing(
            GridSize::square(10),
            vec![Position { x: 1, y: 1 }],
            Position { x: 3, y: 1 },
            Direction::Right,
        );

        engine.tick();
        assert_eq!(engine.snake().len(), 1);

        let events = engine.tick();
        assert_eq!(engine.snake().len(), 2);
        assert_eq!(engine.score(), 1);
        assert_eq!(events.first(), Some(&GameEvent::FoodEaten { score: 1 }));
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut engine = playing(
            GridSize::square(4),
            vec![Position { x: 3, y: 1 }],
            Position { x: 0, y: 0 },
            Direction::Right,
        );

        let events = engine.tick();

        assert_eq!(engine.status(), GameStatus::GameOver);
        assert_eq!(engine.death_reason(), Some(DeathReason::WallCollision));
        let wall = GameEvent::GameOver(DeathReason::WallCollision);
        assert_eq!(events, vec![wall]);
        assert_eq!(engine.snake().head(), Position { x: 3, y: 1 });
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        let mut engine = playing(
            GridSize::square(6),
            vec![
                Position { x: 2, y: 2 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
                Position { x: 1, y: 1 },
            ],
            Position { x: 5, y: 5 },
            Direction::Up,
        );

        engine.submit(Direction::Left);
        engine.tick();

        assert_eq!(engine.status(), GameStatus::GameOver);
        assert_eq!(engine.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn moving_into_vacating_tail_is_fatal() {
        // A 2x2 loop: the head's only forward cell is the tail.
        let mut engine = playing(
            GridSize::square(3),
            vec![
                Position { x: 0, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 1, y: 1 },
                Position { x: 0, y: 1 },
            ],
            Position { x: 2, y: 2 },
            Direction::Left,
        );

        engine.submit(Direction::Down);
        engine.tick();

        assert_eq!(engine.status(), GameStatus::GameOver);
        assert_eq!(engine.death_reason(), Some(DeathReason::SelfCollision));
        assert_eq!(engine.snake().len(), 4);
    }

    #[test]
    fn reversal_request_keeps_going_straight() {
        let mut engine = playing(
            GridSize::DEFAULT,
            vec![Position { x: 5, y: 5 }, Position { x: 4, y: 5 }],
            Position { x: 15, y: 15 },
            Direction::Right,
        );

        engine.submit(Direction::Left);
        engine.tick();

        assert_eq!(engine.status(), GameStatus::Playing);
        assert_eq!(engine.snake().head(), Position { x: 6, y: 5 });
        assert_eq!(engine.heading(), Direction::Right);
        // The rejected request stays latched.
        assert_eq!(engine.pending_direction(), Direction::Left);
    }

    #[test]
    fn single_cell_snake_may_turn_around() {
        let mut engine = playing(
            GridSize::DEFAULT,
            vec![Position { x: 5, y: 5 }],
            Position { x: 15, y: 15 },
            Direction::Right,
        );

        engine.submit(Direction::Left);
        engine.tick();

        assert_eq!(engine.snake().head(), Position { x: 4, y: 5 });
    }

    #[test]
    fn high_score_change_is_reported_once_per_point() {
        let board = Board {
            snake: Snake::new(Position { x: 1, y: 1 }),
            food: Position { x: 2, y: 1 },
            heading: Direction::Right,
        };
        let rng = StdRng::seed_from_u64(9);
        let mut engine =
            Engine::from_board(GridSize::square(8), board, 0, rng).expect("board should be valid");

        let events = engine.tick();

        assert_eq!(
            events,
            vec![
                GameEvent::FoodEaten { score: 1 },
                GameEvent::HighScoreChanged(1)
            ]
        );
        assert_eq!(engine.high_score(), 1);
    }

    #[test]
    fn below_high_score_eating_is_silent_for_persistence() {
        let board = Board {
            snake: Snake::new(Position { x: 1, y: 1 }),
            food: Position { x: 2, y: 1 },
            heading: Direction::Right,
        };
        let rng = StdRng::seed_from_u64(9);
        let mut engine =
            Engine::from_board(GridSize::square(8), board, 10, rng).expect("board should be valid");

        let events = engine.tick();

        assert_eq!(events, vec![GameEvent::FoodEaten { score: 1 }]);
        assert_eq!(engine.high_score(), 10);
    }

    #[test]
    fn invalid_boards_are_rejected() {
        let grid = GridSize::square(5);
        let board = |segments: Vec<Position>, food| Board {
            snake: Snake::from_segments(segments),
            food,
            heading: Direction::Right,
        };
        let build = |b| Engine::from_board(grid, b, 0, StdRng::seed_from_u64(1)).map(|_| ());

        let corner = Position { x: 0, y: 0 };
        let inside = Position { x: 1, y: 1 };
        let outside = Position { x: 5, y: 0 };
        let gap = Position { x: 3, y: 1 };

        assert_eq!(build(board(vec![], corner)), Err(BoardError::EmptySnake));
        assert_eq!(
            build(board(vec![outside], corner)),
            Err(BoardError::OutOfBounds(outside))
        );
        assert_eq!(
            build(board(vec![inside, gap], corner)),
            Err(BoardError::Disconnected(inside, gap))
        );
        assert_eq!(
            build(board(vec![inside], inside)),
            Err(BoardError::InvalidFood(inside))
        );
    }

    #[test]
    fn seeded_board_keeps_given_high_score_until_next_growth() {
        let board = Board {
            snake: Snake::from_segments(vec![
                Position { x: 3, y: 1 },
                Position { x: 2, y: 1 },
                Position { x: 1, y: 1 },
            ]),
            food: Position { x: 4, y: 1 },
            heading: Direction::Right,
        };
        let rng = StdRng::seed_from_u64(9);
        let mut engine =
            Engine::from_board(GridSize::square(8), board, 0, rng).expect("board should be valid");
        assert_eq!(engine.score(), 2);
        assert_eq!(engine.high_score(), 0);

        let events = engine.tick();

        assert_eq!(
            events,
            vec![
                GameEvent::FoodEaten { score: 3 },
                GameEvent::HighScoreChanged(3)
            ]
        );
        assert_eq!(engine.high_score(), 3);
    }
}
