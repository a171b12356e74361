//! Termtris — classic falling-block puzzle game in the terminal.

mod app;
mod game;
mod input;
mod piece;
mod playfield;
mod render;
mod theme;
mod ui;

use anyhow::Result;
use app::Outcome;
use clap::Parser;
use std::time::Duration;

/// Default gravity / redraw interval.
const DEFAULT_TICK_MS: u64 = 150;

/// Options derived from CLI that affect the running game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed pause between loop iterations.
    pub tick: Duration,
    /// Piece RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl From<&Args> for GameConfig {
    fn from(args: &Args) -> Self {
        Self {
            tick: Duration::from_millis(args.tick_ms.max(1)),
            seed: args.seed,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = theme::Theme::load(args.theme.as_deref()).unwrap_or_default();
    let config = GameConfig::from(&args);
    match app::run(&config, theme)? {
        Outcome::GameOver { score } => println!("{}", game::GameOver { score }),
        Outcome::Quit => {}
    }
    Ok(())
}

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "termtris",
    version,
    about = "Classic falling-block puzzle in the terminal. Clear full rows for 10 points each.",
    long_about = "Termtris is a terminal falling-block puzzle on a 10x20 board.\n\n\
        Pieces fall one row per tick. Fill a row edge to edge to clear it (10 points). \
        The game ends when a piece locks above the top of the board.\n\n\
        CONTROLS:\n  a / Left    Move left     d / Right   Move right\n  \
        s / Down    Drop one row  w / Up      Rotate clockwise\n  q / Esc     Quit"
)]
pub struct Args {
    /// Milliseconds between ticks (one gravity step and redraw per tick).
    #[arg(long, default_value_t = DEFAULT_TICK_MS, value_name = "MS")]
    pub tick_ms: u64,

    /// Seed for the piece sequence (same seed, same pieces).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]="#RRGGBB"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,
}
