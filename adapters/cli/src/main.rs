#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Siege Defence session.

mod autopilot;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use siege_core::Difficulty;
use siege_engine::{Engine, EngineConfig};
use siege_world::query;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Siege Defence session runner", long_about = None)]
struct Args {
    /// TOML engine configuration; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 10_000)]
    frames: u32,

    /// Frame length passed to each step, in milliseconds.
    #[arg(long, default_value_t = 17)]
    frame_ms: u64,

    /// Difficulty used for pricing.
    #[arg(long, value_enum, default_value_t = DifficultyArg::Normal)]
    difficulty: DifficultyArg,

    /// Print the final frame snapshot as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
    Nightmare,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Nightmare => Difficulty::Nightmare,
        }
    }
}

/// Entry point for the Siege Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load engine config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let mut engine = Engine::new(config);
    engine.change_difficulty(args.difficulty.into());
    if !args.json {
        println!("{}", query::welcome_banner(engine.world()));
    }

    let report = autopilot::run(
        &mut engine,
        args.frames,
        Duration::from_millis(args.frame_ms),
    );

    let snapshot = engine.snapshot();
    if args.json {
        let json = serde_json::to_string_pretty(&snapshot)
            .context("failed to serialise frame snapshot")?;
        println!("{json}");
        return Ok(());
    }

    let game = &snapshot.game;
    println!("{}", snapshot.level.name);
    println!(
        "status {:?} | level {} wave {} | gold {} lives {} score {}",
        game.status, game.level, game.wave, game.gold, game.lives, game.score
    );
    println!(
        "frames {} | towers built {} | waves started {} | levels cleared {}",
        report.frames, report.towers_built, report.waves_started, report.levels_cleared
    );
    println!(
        "player level {} | {} tower kinds unlocked | {} achievements",
        game.player_level,
        game.unlocked_towers.len(),
        game.achievements
            .iter()
            .filter(|achievement| achievement.unlocked)
            .count()
    );
    Ok(())
}
