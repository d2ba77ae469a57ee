//! Read-only snapshots handed to systems and presentation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    AbilityState, Achievement, CellCoord, Difficulty, EffectKind, EnemyId, EnemyKind, GameStatus,
    LevelConfig, Position, ProjectileId, ProjectileKind, TowerId, TowerKind, WaveConfig,
};

/// Status effect currently attached to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyEffect {
    /// Kind of effect.
    pub kind: EffectKind,
    /// Time left before the effect expires.
    pub remaining: Duration,
    /// Speed factor or per-tick damage depending on the kind.
    pub strength: f32,
    /// Time accumulated toward the next damage-over-time tick.
    pub tick_progress: Duration,
}

impl EnemyEffect {
    /// Creates an effect with no accumulated tick progress.
    #[must_use]
    pub const fn new(kind: EffectKind, remaining: Duration, strength: f32) -> Self {
        Self {
            kind,
            remaining,
            strength,
            tick_progress: Duration::ZERO,
        }
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Grid cell occupied by the tower.
    pub cell: CellCoord,
    /// Centre of the occupied cell.
    pub position: Position,
    /// Current upgrade level, starting at one.
    pub level: u32,
    /// Damage dealt per projectile.
    pub damage: u32,
    /// Targeting radius in world units.
    pub range: u32,
    /// Minimum time between attacks.
    pub attack_interval: Duration,
    /// Gold spent on placement and upgrades.
    pub cost: u32,
    /// Session time of the most recent attack.
    pub last_attack: Duration,
    /// Enemies destroyed by the tower's projectiles.
    pub kills: u32,
    /// Enemy currently tracked by the tower.
    pub target: Option<EnemyId>,
}

/// Read-only snapshot describing all towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of the provided tower.
    #[must_use]
    pub fn get(&self, tower: TowerId) -> Option<&TowerSnapshot> {
        self.snapshots
            .binary_search_by_key(&tower, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of captured towers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Identifier allocated to the enemy by the world.
    pub id: EnemyId,
    /// Kind of enemy.
    pub kind: EnemyKind,
    /// Current location.
    pub position: Position,
    /// Remaining health, always positive for live enemies.
    pub health: u32,
    /// Health at spawn time.
    pub max_health: u32,
    /// Base speed before effects.
    pub speed: f32,
    /// Gold granted on death before the level multiplier.
    pub reward: u32,
    /// Index of the last waypoint reached.
    pub path_index: usize,
    /// Effects currently attached.
    pub effects: Vec<EnemyEffect>,
    /// Flat damage reduction.
    pub armor: u32,
    /// Whether only anti-air towers may target the enemy.
    pub flying: bool,
}

/// Read-only snapshot describing all enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of the provided enemy.
    #[must_use]
    pub fn get(&self, enemy: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&enemy, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of captured enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Tower that fired the projectile.
    pub tower: TowerId,
    /// Family of the projectile.
    pub kind: ProjectileKind,
    /// Current location.
    pub position: Position,
    /// Enemy the projectile homes in on.
    pub target: EnemyId,
    /// Damage dealt on impact before armor.
    pub damage: u32,
    /// Distance travelled per reference frame.
    pub speed: f32,
    /// Damages enemies near the projectile on impact.
    pub piercing: bool,
    /// Damages enemies near the target on impact.
    pub splash: bool,
}

/// Read-only snapshot describing all projectiles.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectiles in firing order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Progress through the active wave's spawn schedule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnCursor {
    /// Index of the spawn group currently emitting enemies.
    pub group_index: usize,
    /// Enemies emitted by the current group so far.
    pub spawned: u32,
    /// Session time of the most recent spawn.
    pub last_spawn: Duration,
}

impl SpawnCursor {
    /// Reports whether every group of the wave was emitted.
    #[must_use]
    pub fn is_exhausted(&self, wave: &WaveConfig) -> bool {
        self.group_index >= wave.groups().len()
    }
}

/// Read-only copy of the aggregate game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Spendable currency.
    pub gold: u32,
    /// Remaining lives.
    pub lives: u32,
    /// One-based index of the active wave.
    pub wave: u32,
    /// One-based index of the active level.
    pub level: u32,
    /// Accumulated score.
    pub score: u64,
    /// Current lifecycle status.
    pub status: GameStatus,
    /// Difficulty used for pricing.
    pub difficulty: Difficulty,
    /// Experience carried toward the next player level.
    pub experience: u32,
    /// Player level gating tower unlocks.
    pub player_level: u32,
    /// Tower kinds that may be placed, in unlock order.
    pub unlocked_towers: Vec<TowerKind>,
    /// Achievement progress in catalog order.
    pub achievements: Vec<Achievement>,
    /// Ability cooldowns in catalog order.
    pub abilities: Vec<AbilityState>,
    /// Tower highlighted by the player.
    pub selected_tower: Option<TowerId>,
    /// Placement cell under the cursor.
    pub hovered_cell: Option<CellCoord>,
    /// Session time accumulated by the world clock.
    pub clock: Duration,
}

/// Everything presentation needs to render one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Aggregate game state.
    pub game: GameSnapshot,
    /// Towers ordered by identifier.
    pub towers: Vec<TowerSnapshot>,
    /// Enemies ordered by identifier.
    pub enemies: Vec<EnemySnapshot>,
    /// Projectiles ordered by identifier.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Active level description.
    pub level: LevelConfig,
}
