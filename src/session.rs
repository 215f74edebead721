use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::StdRng;

use crate::config::Settings;
use crate::game::{Engine, GameEvent, GameStatus};
use crate::input::Direction;
use crate::score::HighScoreStore;
use crate::snapshot::Snapshot;
use crate::timer::TickTimer;

/// Single owner of a running game.
///
/// Input and ticks both go through `&mut self`, so they never interleave.
/// The tick timer is armed exactly while the engine is `Playing`.
pub struct Session<R = StdRng> {
    engine: Engine<R>,
    timer: TickTimer,
    store: Box<dyn HighScoreStore>,
}

impl Session<StdRng> {
    /// Opens an idle session; `seed` makes food placement reproducible.
    #[must_use]
    pub fn new(settings: Settings, store: Box<dyn HighScoreStore>, seed: Option<u64>) -> Self {
        let high_score = load_high_score(store.as_ref());
        let engine = match seed {
            Some(seed) => Engine::new_with_seed(settings.grid, high_score, seed),
            None => Engine::new(settings.grid, high_score),
        };

        Self {
            engine,
            timer: TickTimer::new(settings.tick_interval),
            store,
        }
    }
}

impl<R: Rng> Session<R> {
    /// Wraps an existing engine; a playing engine gets its timer armed at `now`.
    #[must_use]
    pub fn with_engine(
        engine: Engine<R>,
        tick_interval: Duration,
        store: Box<dyn HighScoreStore>,
        now: Instant,
    ) -> Self {
        let mut session = Self {
            engine,
            timer: TickTimer::new(tick_interval),
            store,
        };
        session.sync_timer(now);
        session
    }

    /// Forwards a steering intent to the engine's input latch.
    pub fn steer(&mut self, direction: Direction) {
        self.engine.submit(direction);
    }

    pub fn start(&mut self, now: Instant) -> bool {
        let started = self.engine.start();
        self.sync_timer(now);
        started
    }

    pub fn reset(&mut self, now: Instant) -> bool {
        let reset = self.engine.reset();
        self.sync_timer(now);
        reset
    }

    /// Starts from idle or restarts after a finished game.
    pub fn confirm(&mut self, now: Instant) -> bool {
        match self.engine.status() {
            GameStatus::Idle => self.start(now),
            GameStatus::GameOver | GameStatus::Won => self.reset(now),
            GameStatus::Playing => false,
        }
    }

    /// Runs the tick due at `now`, if any, and returns its events.
    pub fn poll(&mut self, now: Instant) -> Vec<GameEvent> {
        if !self.timer.poll(now) {
            return Vec::new();
        }

        let events = self.engine.tick();
        for event in &events {
            if let GameEvent::HighScoreChanged(score) = event {
                self.persist(*score);
            }
        }
        self.sync_timer(now);
        events
    }

    #[must_use]
    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.timer.is_armed()
    }

    /// Time until the next tick; `None` outside `Playing`.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    fn sync_timer(&mut self, now: Instant) {
        let playing = self.engine.status() == GameStatus::Playing;
        if playing && !self.timer.is_armed() {
            self.timer.arm(now);
        } else if !playing {
            self.timer.disarm();
        }
    }

    fn persist(&mut self, score: u32) {
        match self.store.save(score) {
            Ok(()) => log::debug!("high score {score} saved"),
            Err(error) => log::warn!("failed to save high score {score}: {error}"),
        }
    }
}

fn load_high_score(store: &dyn HighScoreStore) -> u32 {
    match store.load() {
        Ok(score) => score,
        Err(error) => {
            log::warn!("could not load high score, starting from 0: {error}");
            0
        }
    }
}
