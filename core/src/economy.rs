//! Pricing, difficulty, abilities and achievements.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Difficulty selected by the player; scales every dynamic price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Cheaper prices.
    Easy,
    /// Catalog prices.
    #[default]
    Normal,
    /// Inflated prices.
    Hard,
    /// Heavily inflated prices.
    Nightmare,
}

impl Difficulty {
    /// Every difficulty ordered from easiest to hardest.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Nightmare,
    ];

    /// Multiplier applied on top of the level price scaling.
    #[must_use]
    pub const fn price_multiplier(self) -> f64 {
        match self {
            Self::Easy => 0.8,
            Self::Normal => 1.0,
            Self::Hard => 1.3,
            Self::Nightmare => 1.6,
        }
    }
}

/// Scales a catalog cost by the current game level and difficulty.
///
/// The result is `floor(base * (1 + (level - 1) * 0.15) * multiplier)`; a
/// level of zero is priced like the first level.
#[must_use]
pub fn dynamic_price(base_cost: u32, level: u32, difficulty: Difficulty) -> u32 {
    let level_multiplier = 1.0 + f64::from(level.saturating_sub(1)) * 0.15;
    let price = f64::from(base_cost) * level_multiplier * difficulty.price_multiplier();
    price.floor().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Lifecycle of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Between waves; towers may be arranged before starting the next wave.
    #[default]
    Preparing,
    /// The simulation advances every frame.
    Playing,
    /// The simulation is suspended mid-wave.
    Paused,
    /// Every life was lost.
    GameOver,
    /// The final campaign level was cleared.
    Victory,
    /// Every wave of the current level was cleared.
    LevelComplete,
}

impl GameStatus {
    /// Reports whether the status can only be left through reset or next level.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory | Self::LevelComplete)
    }
}

/// Special abilities the player can trigger for gold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    /// Damages every enemy on the field.
    Airstrike,
    /// Freezes every enemy on the field.
    FreezeAll,
    /// Grants a flat amount of gold.
    GoldBoost,
    /// Restores lives up to the starting amount.
    Repair,
}

impl AbilityKind {
    /// Every ability in display order.
    pub const ALL: [AbilityKind; 4] = [
        AbilityKind::Airstrike,
        AbilityKind::FreezeAll,
        AbilityKind::GoldBoost,
        AbilityKind::Repair,
    ];

    /// Position of the kind within [`AbilityKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Airstrike => 0,
            Self::FreezeAll => 1,
            Self::GoldBoost => 2,
            Self::Repair => 3,
        }
    }

    /// Time that must pass between two uses.
    #[must_use]
    pub const fn cooldown(self) -> Duration {
        match self {
            Self::Airstrike => Duration::from_secs(30),
            Self::FreezeAll => Duration::from_secs(45),
            Self::GoldBoost => Duration::from_secs(60),
            Self::Repair => Duration::from_secs(20),
        }
    }

    /// Gold deducted on use.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Airstrike => 100,
            Self::FreezeAll => 150,
            Self::GoldBoost => 75,
            Self::Repair => 50,
        }
    }
}

/// Cooldown bookkeeping for one ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityState {
    /// Ability described by the entry.
    pub kind: AbilityKind,
    /// Time that must pass between two uses.
    pub cooldown: Duration,
    /// Gold deducted on use.
    pub cost: u32,
    /// Session time of the most recent use.
    pub last_used: Option<Duration>,
}

impl AbilityState {
    /// Creates an unused ability entry.
    #[must_use]
    pub const fn new(kind: AbilityKind) -> Self {
        Self {
            kind,
            cooldown: kind.cooldown(),
            cost: kind.cost(),
            last_used: None,
        }
    }

    /// Time left before the ability can be used again.
    #[must_use]
    pub fn ready_in(&self, now: Duration) -> Duration {
        match self.last_used {
            Some(last_used) => self
                .cooldown
                .saturating_sub(now.saturating_sub(last_used)),
            None => Duration::ZERO,
        }
    }
}

/// Identifiers of every achievement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    /// Destroy the first enemy.
    FirstKill,
    /// Build 50 towers.
    TowerMaster,
    /// Complete 100 waves.
    WaveSurvivor,
    /// Earn 10,000 gold from kills.
    GoldCollector,
    /// Complete a level without losing a life.
    PerfectDefense,
    /// Upgrade towers 25 times.
    UpgradeExpert,
    /// Complete 10 levels.
    LevelConqueror,
}

impl AchievementId {
    /// Every achievement in display order.
    pub const ALL: [AchievementId; 7] = [
        AchievementId::FirstKill,
        AchievementId::TowerMaster,
        AchievementId::WaveSurvivor,
        AchievementId::GoldCollector,
        AchievementId::PerfectDefense,
        AchievementId::UpgradeExpert,
        AchievementId::LevelConqueror,
    ];

    /// Progress required to unlock the achievement.
    #[must_use]
    pub const fn target(self) -> u32 {
        match self {
            Self::FirstKill | Self::PerfectDefense => 1,
            Self::TowerMaster => 50,
            Self::WaveSurvivor => 100,
            Self::GoldCollector => 10_000,
            Self::UpgradeExpert => 25,
            Self::LevelConqueror => 10,
        }
    }

    /// Gold granted once on unlock.
    #[must_use]
    pub const fn reward(self) -> u32 {
        match self {
            Self::FirstKill => 50,
            Self::TowerMaster => 200,
            Self::WaveSurvivor => 500,
            Self::GoldCollector => 300,
            Self::PerfectDefense => 400,
            Self::UpgradeExpert => 250,
            Self::LevelConqueror => 1_000,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstKill => "First Blood",
            Self::TowerMaster => "Tower Master",
            Self::WaveSurvivor => "Wave Survivor",
            Self::GoldCollector => "Gold Collector",
            Self::PerfectDefense => "Perfect Defense",
            Self::UpgradeExpert => "Upgrade Expert",
            Self::LevelConqueror => "Level Conqueror",
        }
    }
}

/// Progress record of one achievement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Achievement tracked by the record.
    pub id: AchievementId,
    /// Whether the reward was already granted.
    pub unlocked: bool,
    /// Accumulated progress, never above `target`.
    pub progress: u32,
    /// Progress required to unlock.
    pub target: u32,
    /// Gold granted on unlock.
    pub reward: u32,
}

impl Achievement {
    /// Creates a fresh, locked record.
    #[must_use]
    pub const fn new(id: AchievementId) -> Self {
        Self {
            id,
            unlocked: false,
            progress: 0,
            target: id.target(),
            reward: id.reward(),
        }
    }

    /// Adds progress and returns the reward if this call unlocked the achievement.
    pub fn advance(&mut self, amount: u32) -> Option<u32> {
        if self.unlocked {
            return None;
        }

        self.progress = self.progress.saturating_add(amount).min(self.target);
        if self.progress >= self.target {
            self.unlocked = true;
            return Some(self.reward);
        }
        None
    }
}
