#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves the end of a frame into game over or wave completion.

use siege_core::{Command, GameStatus, SpawnCursor, WaveConfig};

/// Frame resolution system.
#[derive(Debug, Default)]
pub struct Progression;

impl Progression {
    /// Creates a new progression system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits `DeclareGameOver` once lives run out, otherwise `CompleteWave` when
    /// the wave's schedule is exhausted and no enemy remains.
    pub fn handle(
        &mut self,
        status: GameStatus,
        lives: u32,
        enemies_remaining: usize,
        wave: Option<&WaveConfig>,
        cursor: SpawnCursor,
        out: &mut Vec<Command>,
    ) {
        if status != GameStatus::Playing {
            return;
        }

        if lives == 0 {
            out.push(Command::DeclareGameOver);
            return;
        }

        let exhausted = wave.map_or(true, |wave| cursor.is_exhausted(wave));
        if enemies_remaining == 0 && exhausted {
            out.push(Command::CompleteWave);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siege_core::{EnemyKind, SpawnGroup};

    fn wave() -> WaveConfig {
        WaveConfig::new(vec![SpawnGroup::new(EnemyKind::Basic, 2, 500)], 65, false)
    }

    fn run(lives: u32, enemies: usize, cursor: SpawnCursor) -> Vec<Command> {
        let mut out = Vec::new();
        Progression::new().handle(
            GameStatus::Playing,
            lives,
            enemies,
            Some(&wave()),
            cursor,
            &mut out,
        );
        out
    }

    fn exhausted() -> SpawnCursor {
        SpawnCursor {
            group_index: 1,
            ..SpawnCursor::default()
        }
    }

    #[test]
    fn no_lives_ends_the_game() {
        assert_eq!(run(0, 3, exhausted()), vec![Command::DeclareGameOver]);
    }

    #[test]
    fn cleared_and_exhausted_wave_completes() {
        assert_eq!(run(25, 0, exhausted()), vec![Command::CompleteWave]);
    }

    #[test]
    fn pending_spawns_keep_the_wave_running() {
        assert!(run(25, 0, SpawnCursor::default()).is_empty());
        assert!(run(25, 2, exhausted()).is_empty());
    }

    #[test]
    fn outside_play_nothing_resolves() {
        let mut out = Vec::new();
        Progression::new().handle(
            GameStatus::Preparing,
            0,
            0,
            Some(&wave()),
            exhausted(),
            &mut out,
        );
        assert!(out.is_empty());
    }
}
