use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::Settings;
use grid_snake::feedback;
use grid_snake::input::{self, GameInput};
use grid_snake::renderer::{self, FrameInfo};
use grid_snake::score::{HighScoreStore, MemoryStore, ScoreFile};
use grid_snake::session::Session;
use grid_snake::terminal_runtime::{AppTerminal, TerminalGuard, install_panic_hook};

/// Input poll timeout while no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for food placement; the same seed replays the same food cells.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to keep the high score instead of the platform data directory.
    #[arg(long, value_name = "PATH", conflicts_with = "no_save")]
    scores_file: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long = "no-save")]
    no_save: bool,

    /// Append log output to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Ring the terminal bell when food is eaten and when a game ends.
    #[arg(long)]
    bell: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let store: Box<dyn HighScoreStore> = if cli.no_save {
        Box::new(MemoryStore::default())
    } else {
        let file = cli
            .scores_file
            .map_or_else(ScoreFile::at_default_location, ScoreFile::new);
        log::info!("high score file: {}", file.path().display());
        Box::new(file)
    };
    let mut session = Session::new(Settings::default(), store, cli.seed);

    install_panic_hook();
    let mut guard = TerminalGuard::enter()?;
    run(guard.terminal_mut(), &mut session, cli.bell)
}

fn run(terminal: &mut AppTerminal, session: &mut Session, bell: bool) -> io::Result<()> {
    let mut info = FrameInfo {
        high_score_at_start: session.engine().high_score(),
    };

    loop {
        let snapshot = session.snapshot();
        terminal.draw(|frame| renderer::render(frame, &snapshot, info))?;

        let timeout = session
            .time_until_tick(Instant::now())
            .unwrap_or(IDLE_POLL);
        if let Some(game_input) = input::poll_input(timeout)? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Direction(direction) => session.steer(direction),
                GameInput::Confirm => {
                    let high_score = session.engine().high_score();
                    if session.confirm(Instant::now()) {
                        info.high_score_at_start = high_score;
                    }
                }
            }
        }

        for event in session.poll(Instant::now()) {
            feedback::announce(&mut io::stdout(), event, bell);
        }
    }

    Ok(())
}

/// Logs stay off unless `--log-file` or `RUST_LOG` asks for them; stderr
/// shares the screen with the game.
fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let mut builder = env_logger::Builder::from_env(env);

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
