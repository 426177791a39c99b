mod config;
mod draw;
mod food;
mod game;
mod grid;
mod input;
mod snake;
mod term;

use std::{fs::OpenOptions, sync::Mutex};

use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use game::SnakeGame;
use term::TermManager;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = Config::from_env().context("invalid configuration")?;
    info!(?config, "configuration loaded");

    let mut term = TermManager::new(config.field())?;
    term.setup()?;

    let mut game = SnakeGame::new(config, StdRng::from_entropy());

    // The game loop returns on CTRL+C
    let res = game.run(&mut term);
    term.restore()?;
    res
}

/// Logs go to a file, stdout belongs to the game while it runs.
fn init_logging() -> anyhow::Result<()> {
    let path = config::log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
