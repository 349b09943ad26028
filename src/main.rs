//! Space Defenders entry point
//!
//! Parses the command line, sets up logging and data files, then either plays
//! a game in the terminal or prints the scoreboard.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use space_defenders::highscores::{SCOREBOARD_PLACES, ordinal};
use space_defenders::platform::{SystemClock, TerminalInput};
use space_defenders::renderer::{TerminalRenderer, TerminalSession};
use space_defenders::{FileScoreStore, FrameDriver, RunOutcome, ScoreStore, Settings, Tuning};

#[derive(Parser, Debug)]
#[command(name = "space-defenders", version, about = "Side-scrolling space shooter for the terminal")]
struct Cli {
    /// Settings file, created with defaults if missing
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Game balance overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Where log output goes; the terminal is busy drawing the game
    #[arg(long, default_value = "game.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game (default)
    Play {
        /// Seed for meteoroid placement
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the high score table
    Scores {
        /// Number of places to show
        #[arg(long, default_value_t = SCOREBOARD_PLACES)]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;
    log::info!("Space Defenders starting...");

    let settings = Settings::load_or_create(&cli.settings)
        .with_context(|| format!("loading settings from {}", cli.settings.display()))?;
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path).with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let mut store = FileScoreStore::open(&settings.scores_path)
        .with_context(|| format!("opening high scores at {}", settings.scores_path.display()))?;

    match cli.command.unwrap_or(Command::Play { seed: None }) {
        Command::Play { seed } => play(&settings, tuning, &mut store, seed),
        Command::Scores { count } => {
            print_scoreboard(&store, count);
            Ok(())
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn play(settings: &Settings, tuning: Tuning, store: &mut FileScoreStore, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or_else(clock_seed);

    let outcome = {
        let _session = TerminalSession::enter().context("setting up the terminal")?;
        let renderer = TerminalRenderer::stdout()?;
        let input = TerminalInput::new(Duration::from_millis(settings.key_hold_ms));
        let mut driver = FrameDriver::new(renderer, input, SystemClock::new(), tuning)
            .with_frame_budget(settings.frame_budget_ms())
            .with_fps_overlay(settings.show_fps);
        driver.play(seed, store)?
    };

    match outcome {
        RunOutcome::GameOver { .. } => {
            println!("Game Over");
            println!("Score: {}", outcome.score());
            println!();
            print_scoreboard(&*store, SCOREBOARD_PLACES);
        }
        RunOutcome::Quit { .. } => log::info!("Exiting with unrecorded score {}", outcome.score()),
    }
    Ok(())
}

fn print_scoreboard(store: &dyn ScoreStore, count: usize) {
    println!("Scoreboard");
    for (i, score) in store.top_scores(count).into_iter().enumerate() {
        println!("{} Place: {}", ordinal(i + 1), score);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
