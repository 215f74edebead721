//! Fixed-tick grid Snake.
//!
//! [`game::Engine`] is the simulation core: it owns the snake, food, score and
//! game status and only changes them inside `tick`, `start` and `reset`.
//! [`session::Session`] drives an engine from a periodic [`timer::TickTimer`]
//! and hands high scores to a [`score::HighScoreStore`]. The remaining modules
//! are the terminal front end.

pub mod config;
pub mod error;
pub mod feedback;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod score;
pub mod session;
pub mod snake;
pub mod snapshot;
pub mod terminal_runtime;
pub mod timer;
pub mod ui;
