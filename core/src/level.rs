//! Level, wave and path descriptions produced by level generation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{EnemyKind, Position};

/// Reasons a path description may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    /// Paths need a start and an end waypoint.
    #[error("a path requires at least two waypoints, got {count}")]
    TooShort {
        /// Number of waypoints supplied.
        count: usize,
    },
}

/// Ordered route enemies traverse from the first to the last waypoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct Path {
    waypoints: Vec<Position>,
}

impl Path {
    /// Creates a path from at least two waypoints.
    pub fn new(waypoints: Vec<Position>) -> Result<Self, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::TooShort {
                count: waypoints.len(),
            });
        }
        Ok(Self { waypoints })
    }

    /// Creates a path from `start` through every waypoint of `via` to `end`.
    #[must_use]
    pub fn through(start: Position, via: &[Position], end: Position) -> Self {
        let mut waypoints = Vec::with_capacity(via.len() + 2);
        waypoints.push(start);
        waypoints.extend_from_slice(via);
        waypoints.push(end);
        Self { waypoints }
    }

    /// Waypoints in traversal order.
    #[must_use]
    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    /// Waypoint at which enemies spawn.
    #[must_use]
    pub fn start(&self) -> Position {
        self.waypoints[0]
    }

    /// Index of the final waypoint.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    /// Waypoint stored at the provided index, if any.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<Position> {
        self.waypoints.get(index).copied()
    }

    /// Shortest distance between the provided point and any path segment.
    #[must_use]
    pub fn distance_to(&self, point: Position) -> f32 {
        self.waypoints
            .windows(2)
            .map(|segment| point.distance_to_segment(segment[0], segment[1]))
            .fold(f32::INFINITY, f32::min)
    }
}

impl TryFrom<Vec<Position>> for Path {
    type Error = PathError;

    fn try_from(waypoints: Vec<Position>) -> Result<Self, Self::Error> {
        Self::new(waypoints)
    }
}

impl From<Path> for Vec<Position> {
    fn from(path: Path) -> Self {
        path.waypoints
    }
}

/// One entry of a wave's spawn schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnGroup {
    kind: EnemyKind,
    count: u32,
    delay_ms: u32,
}

impl SpawnGroup {
    /// Creates a spawn group emitting `count` enemies `delay_ms` apart.
    #[must_use]
    pub const fn new(kind: EnemyKind, count: u32, delay_ms: u32) -> Self {
        Self {
            kind,
            count,
            delay_ms,
        }
    }

    /// Kind of enemy emitted by the group.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Number of enemies emitted by the group.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Time that must elapse between two spawns of the group.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms as u64)
    }
}

/// Scheduled batch of enemies within a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveConfig {
    groups: Vec<SpawnGroup>,
    reward: u32,
    boss_wave: bool,
}

impl WaveConfig {
    /// Creates a wave from its spawn schedule and completion reward.
    #[must_use]
    pub fn new(groups: Vec<SpawnGroup>, reward: u32, boss_wave: bool) -> Self {
        Self {
            groups,
            reward,
            boss_wave,
        }
    }

    /// Spawn groups in emission order.
    #[must_use]
    pub fn groups(&self) -> &[SpawnGroup] {
        &self.groups
    }

    /// Gold granted when the wave is cleared.
    #[must_use]
    pub const fn reward(&self) -> u32 {
        self.reward
    }

    /// Reports whether the wave is a boss wave.
    #[must_use]
    pub const fn is_boss_wave(&self) -> bool {
        self.boss_wave
    }

    /// Total number of enemies scheduled across all groups.
    #[must_use]
    pub fn enemy_count(&self) -> u32 {
        self.groups.iter().map(SpawnGroup::count).sum()
    }
}

/// Complete description of one level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// One-based level identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Background colour as a CSS hex string.
    pub background: String,
    /// Waves in play order.
    pub waves: Vec<WaveConfig>,
    /// Multiplier applied to enemy rewards.
    pub gold_multiplier: f64,
    /// Experience granted when the level is completed.
    pub experience_reward: u32,
    /// Score needed before the level is offered.
    pub unlock_requirement: u32,
    /// Route followed by every enemy of the level.
    pub path: Path,
}

impl LevelConfig {
    /// Wave stored at the provided one-based index.
    #[must_use]
    pub fn wave(&self, wave: u32) -> Option<&WaveConfig> {
        let index = usize::try_from(wave.checked_sub(1)?).ok()?;
        self.waves.get(index)
    }

    /// Number of waves in the level.
    #[must_use]
    pub fn wave_count(&self) -> u32 {
        u32::try_from(self.waves.len()).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_rejects_single_waypoint() {
        let error = Path::new(vec![Position::new(0.0, 0.0)]).unwrap_err();
        assert_eq!(error, PathError::TooShort { count: 1 });
    }

    #[test]
    fn path_distance_measures_nearest_segment() {
        let path = Path::new(vec![
            Position::new(0.0, 0.0),
            Position::new(100.0, 0.0),
            Position::new(100.0, 100.0),
        ])
        .expect("valid path");

        assert!((path.distance_to(Position::new(50.0, 20.0)) - 20.0).abs() < 1e-4);
        assert!((path.distance_to(Position::new(130.0, 50.0)) - 30.0).abs() < 1e-4);
    }

    #[test]
    fn wave_lookup_is_one_based() {
        let path = Path::new(vec![Position::new(0.0, 0.0), Position::new(1.0, 0.0)])
            .expect("valid path");
        let level = LevelConfig {
            id: 1,
            name: String::new(),
            description: String::new(),
            background: String::new(),
            waves: vec![WaveConfig::new(
                vec![SpawnGroup::new(EnemyKind::Basic, 3, 800)],
                65,
                false,
            )],
            gold_multiplier: 1.1,
            experience_reward: 150,
            unlock_requirement: 0,
            path,
        };

        assert!(level.wave(0).is_none());
        assert_eq!(level.wave(1).map(WaveConfig::enemy_count), Some(3));
        assert!(level.wave(2).is_none());
    }
}
