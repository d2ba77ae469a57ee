#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for walking a wave's spawn schedule.

use std::time::Duration;

use siege_core::{Command, GameStatus, SpawnCursor, WaveConfig};

/// Pure system that emits at most one spawn schedule command per step.
#[derive(Debug, Default)]
pub struct Spawning;

impl Spawning {
    /// Creates a new spawning system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits `SpawnEnemy` while the active group has enemies left, then
    /// `AdvanceSpawnGroup` once the group delay elapsed again.
    pub fn handle(
        &mut self,
        status: GameStatus,
        wave: Option<&WaveConfig>,
        cursor: SpawnCursor,
        now: Duration,
        out: &mut Vec<Command>,
    ) {
        if status != GameStatus::Playing {
            return;
        }

        let Some(group) = wave.and_then(|wave| wave.groups().get(cursor.group_index)) else {
            return;
        };

        if now.saturating_sub(cursor.last_spawn) < group.delay() {
            return;
        }

        if cursor.spawned < group.count() {
            out.push(Command::SpawnEnemy { kind: group.kind() });
        } else {
            out.push(Command::AdvanceSpawnGroup);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siege_core::{EnemyKind, SpawnGroup};

    fn wave() -> WaveConfig {
        WaveConfig::new(
            vec![
                SpawnGroup::new(EnemyKind::Basic, 2, 800),
                SpawnGroup::new(EnemyKind::Fast, 1, 400),
            ],
            65,
            false,
        )
    }

    #[test]
    fn paused_session_is_silent() {
        let mut out = Vec::new();
        Spawning::new().handle(
            GameStatus::Paused,
            Some(&wave()),
            SpawnCursor::default(),
            Duration::from_secs(5),
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn waits_for_group_delay() {
        let mut out = Vec::new();
        let cursor = SpawnCursor {
            group_index: 0,
            spawned: 1,
            last_spawn: Duration::from_millis(1_000),
        };
        Spawning::new().handle(
            GameStatus::Playing,
            Some(&wave()),
            cursor,
            Duration::from_millis(1_799),
            &mut out,
        );
        assert!(out.is_empty());

        Spawning::new().handle(
            GameStatus::Playing,
            Some(&wave()),
            cursor,
            Duration::from_millis(1_800),
            &mut out,
        );
        assert_eq!(
            out,
            vec![Command::SpawnEnemy {
                kind: EnemyKind::Basic
            }]
        );
    }

    #[test]
    fn exhausted_group_advances_cursor() {
        let mut out = Vec::new();
        let cursor = SpawnCursor {
            group_index: 0,
            spawned: 2,
            last_spawn: Duration::ZERO,
        };
        Spawning::new().handle(
            GameStatus::Playing,
            Some(&wave()),
            cursor,
            Duration::from_secs(1),
            &mut out,
        );
        assert_eq!(out, vec![Command::AdvanceSpawnGroup]);
    }

    #[test]
    fn exhausted_schedule_spawns_nothing() {
        let mut out = Vec::new();
        let cursor = SpawnCursor {
            group_index: 2,
            spawned: 0,
            last_spawn: Duration::ZERO,
        };
        Spawning::new().handle(
            GameStatus::Playing,
            Some(&wave()),
            cursor,
            Duration::from_secs(60),
            &mut out,
        );
        assert!(out.is_empty());
    }
}
