//! Scripted player that drives a headless session.

use std::time::Duration;

use siege_core::{CellCoord, GameStatus, TowerKind, GRID_COLUMNS, GRID_ROWS};
use siege_engine::Engine;
use tracing::{debug, info};

/// Totals gathered while a scripted session runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionReport {
    pub(crate) frames: u32,
    pub(crate) towers_built: u32,
    pub(crate) waves_started: u32,
    pub(crate) levels_cleared: u32,
}

/// Runs `frames` steps of `frame` length, building towers and starting waves
/// whenever the session is preparing.
pub(crate) fn run(engine: &mut Engine, frames: u32, frame: Duration) -> SessionReport {
    let mut report = SessionReport::default();

    for _ in 0..frames {
        match engine.status() {
            GameStatus::Preparing => {
                report.towers_built += fortify(engine);
                if engine.start_wave().is_ok() {
                    report.waves_started += 1;
                }
            }
            GameStatus::LevelComplete => {
                report.levels_cleared += 1;
                if let Err(reason) = engine.next_level() {
                    debug!(%reason, "next level refused");
                }
                continue;
            }
            GameStatus::GameOver | GameStatus::Victory => break,
            GameStatus::Playing | GameStatus::Paused => {}
        }

        let _ = engine.step(frame);
        report.frames += 1;
    }

    info!(?report, status = ?engine.status(), "scripted session finished");
    report
}

/// Spends gold on basic towers, scanning cells in row-major order.
fn fortify(engine: &mut Engine) -> u32 {
    let price = engine.dynamic_price(TowerKind::Basic.stats().cost);
    let mut built = 0;

    for row in 0..GRID_ROWS {
        for column in 0..GRID_COLUMNS {
            if engine.snapshot().game.gold < price {
                return built;
            }
            if engine
                .place_tower(TowerKind::Basic, CellCoord::new(column, row))
                .is_ok()
            {
                built += 1;
            }
        }
    }
    built
}
