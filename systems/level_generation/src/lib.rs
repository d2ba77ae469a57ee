#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic level generation.
//!
//! Every level is a pure function of its one-based identifier: the wave
//! schedule escalates with the identifier, the path cycles through three fixed
//! layouts and the display metadata cycles through twenty themed entries.

use siege_core::{EnemyKind, LevelConfig, Path, Position, SpawnGroup, WaveConfig};

/// Most waves a single level may schedule.
const MAX_WAVES: u32 = 15;

/// Shortest inter-spawn delay a regular group may use, in milliseconds.
const MIN_SPAWN_DELAY_MS: u32 = 300;

/// Enemy families introduced by regular waves, in introduction order.
const REGULAR_ROSTER: [EnemyKind; 7] = [
    EnemyKind::Basic,
    EnemyKind::Fast,
    EnemyKind::Heavy,
    EnemyKind::Flying,
    EnemyKind::Armored,
    EnemyKind::Stealth,
    EnemyKind::Swarm,
];

const NAMES: [&str; 20] = [
    "Green Fields",
    "Desert Outpost",
    "Frozen Tundra",
    "Volcanic Crater",
    "Dark Forest",
    "Crystal Caves",
    "Sky Fortress",
    "Underwater Base",
    "Space Station",
    "Neon City",
    "Ancient Ruins",
    "Cyber Grid",
    "Toxic Wasteland",
    "Mountain Pass",
    "Jungle Temple",
    "Arctic Base",
    "Lava Flows",
    "Storm Clouds",
    "Crystal Maze",
    "Final Stronghold",
];

const DESCRIPTIONS: [&str; 20] = [
    "A peaceful meadow under attack",
    "Defend the desert outpost from invasion",
    "Survive the frozen wasteland assault",
    "Protect the volcanic research station",
    "Navigate the haunted forest paths",
    "Guard the precious crystal mines",
    "Defend the floating sky fortress",
    "Protect the underwater facility",
    "Secure the orbital space station",
    "Defend the cyberpunk metropolis",
    "Protect the ancient temple ruins",
    "Guard the digital cyber grid",
    "Survive the toxic wasteland",
    "Defend the mountain stronghold",
    "Protect the jungle temple",
    "Guard the arctic research base",
    "Survive the lava field assault",
    "Defend against the storm invasion",
    "Navigate the crystal labyrinth",
    "The final battle for survival",
];

const BACKGROUNDS: [&str; 20] = [
    "#22c55e", "#f59e0b", "#06b6d4", "#ef4444", "#374151", "#8b5cf6", "#3b82f6", "#0891b2",
    "#1e1b4b", "#ec4899", "#92400e", "#7c3aed", "#059669", "#dc2626", "#16a34a", "#0284c7",
    "#ea580c", "#6366f1", "#a855f7", "#7c2d12",
];

/// Fixed route layout: entry waypoint, interior turns and exit waypoint.
struct PathPattern {
    start: Position,
    via: &'static [Position],
    end: Position,
}

const PATTERNS: [PathPattern; 3] = [
    // S-curve
    PathPattern {
        start: Position::new(-40.0, 200.0),
        via: &[
            Position::new(120.0, 200.0),
            Position::new(120.0, 120.0),
            Position::new(280.0, 120.0),
            Position::new(280.0, 280.0),
            Position::new(480.0, 280.0),
            Position::new(480.0, 160.0),
            Position::new(640.0, 160.0),
            Position::new(640.0, 360.0),
        ],
        end: Position::new(840.0, 360.0),
    },
    // zigzag
    PathPattern {
        start: Position::new(-40.0, 300.0),
        via: &[
            Position::new(150.0, 300.0),
            Position::new(150.0, 150.0),
            Position::new(350.0, 150.0),
            Position::new(350.0, 450.0),
            Position::new(550.0, 450.0),
            Position::new(550.0, 200.0),
            Position::new(750.0, 200.0),
        ],
        end: Position::new(840.0, 200.0),
    },
    // spiral
    PathPattern {
        start: Position::new(-40.0, 100.0),
        via: &[
            Position::new(200.0, 100.0),
            Position::new(200.0, 500.0),
            Position::new(600.0, 500.0),
            Position::new(600.0, 200.0),
            Position::new(400.0, 200.0),
            Position::new(400.0, 350.0),
            Position::new(700.0, 350.0),
        ],
        end: Position::new(840.0, 350.0),
    },
];

/// Builds the complete description of the provided level.
///
/// Identifiers start at one; zero is treated as the first level.
#[must_use]
pub fn generate_level(level: u32) -> LevelConfig {
    let id = level.max(1);
    let slot = table_slot(id, NAMES.len());
    let wave_count = wave_count(id);
    let waves = (1..=wave_count)
        .map(|wave| generate_wave(id, wave, wave_count))
        .collect();

    LevelConfig {
        id,
        name: format!("Level {id}: {}", NAMES[slot]),
        description: DESCRIPTIONS[slot].to_owned(),
        background: BACKGROUNDS[slot].to_owned(),
        waves,
        gold_multiplier: 1.0 + f64::from(id) * 0.1,
        experience_reward: id.saturating_mul(50).saturating_add(100),
        unlock_requirement: (id - 1).saturating_mul(1_000),
        path: generate_path(id),
    }
}

/// Number of waves scheduled for the level.
#[must_use]
pub fn wave_count(level: u32) -> u32 {
    (8 + level.max(1) / 2).min(MAX_WAVES)
}

/// Route enemies of the level follow.
#[must_use]
pub fn generate_path(level: u32) -> Path {
    let pattern = &PATTERNS[table_slot(level.max(1), PATTERNS.len())];
    Path::through(pattern.start, pattern.via, pattern.end)
}

fn generate_wave(level: u32, wave: u32, wave_count: u32) -> WaveConfig {
    let reward = wave
        .saturating_mul(15)
        .saturating_add(level.saturating_mul(10))
        .saturating_add(50);
    let boss_wave = wave == wave_count && level % 3 == 0;

    let groups = if boss_wave {
        vec![
            SpawnGroup::new(EnemyKind::Boss, 1 + level / 10, 3_000),
            SpawnGroup::new(EnemyKind::Heavy, 3 + level / 5, 1_500),
        ]
    } else {
        let roster = (3 + level / 3).min(REGULAR_ROSTER.len() as u32) as usize;
        REGULAR_ROSTER[..roster]
            .iter()
            .map(|kind| regular_group(*kind, level, wave))
            .collect()
    };

    WaveConfig::new(groups, reward, boss_wave)
}

fn regular_group(kind: EnemyKind, level: u32, wave: u32) -> SpawnGroup {
    let base_count = match kind {
        EnemyKind::Swarm => 15.0,
        _ => 8.0,
    };
    let count = (base_count + f64::from(wave) * 2.0 + f64::from(level) * 1.5)
        .floor()
        .max(1.0) as u32;

    let base_delay: u32 = match kind {
        EnemyKind::Fast => 400,
        EnemyKind::Heavy => 2_000,
        _ => 800,
    };
    let delay = base_delay
        .saturating_sub(level.saturating_mul(50))
        .max(MIN_SPAWN_DELAY_MS);

    SpawnGroup::new(kind, count, delay)
}

fn table_slot(level: u32, len: usize) -> usize {
    (level as usize - 1) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_level_uses_first_table_entries() {
        let level = generate_level(1);
        assert_eq!(level.name, "Level 1: Green Fields");
        assert_eq!(level.description, "A peaceful meadow under attack");
        assert_eq!(level.background, "#22c55e");
        assert_eq!(level.unlock_requirement, 0);
        assert_eq!(level.experience_reward, 150);
        assert!((level.gold_multiplier - 1.1).abs() < 1e-9);
    }

    #[test]
    fn metadata_tables_wrap_after_twenty_levels() {
        let level = generate_level(21);
        assert_eq!(level.name, "Level 21: Green Fields");
        assert_eq!(level.unlock_requirement, 20_000);
    }

    #[test]
    fn zero_behaves_like_first_level() {
        assert_eq!(generate_level(0), generate_level(1));
    }

    #[test]
    fn regular_group_counts_and_delays_scale_with_level() {
        let basic = regular_group(EnemyKind::Basic, 1, 1);
        assert_eq!(basic.count(), 11);
        assert_eq!(basic.delay().as_millis(), 750);

        let swarm = regular_group(EnemyKind::Swarm, 3, 2);
        assert_eq!(swarm.count(), 23);

        let fast = regular_group(EnemyKind::Fast, 12, 1);
        assert_eq!(fast.delay().as_millis(), u128::from(MIN_SPAWN_DELAY_MS));
    }

    #[test]
    fn path_patterns_cycle_every_three_levels() {
        assert_eq!(generate_path(1), generate_path(4));
        assert_ne!(generate_path(1), generate_path(2));
        assert_eq!(generate_path(3).start(), Position::new(-40.0, 100.0));
        assert_eq!(generate_path(1).waypoints().len(), 10);
    }
}
