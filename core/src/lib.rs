#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Siege Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable snapshots, and
//! respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod catalog;
mod economy;
mod level;
mod rejection;
mod snapshot;

pub use catalog::{
    DamageOverTimeModel, EffectApplication, EffectKind, EnemyKind, EnemyStats, ProjectileKind,
    TowerKind, TowerStats, DAMAGE_TICK_CHANCE, DAMAGE_TICK_PERIOD, ON_HIT_EFFECT_DURATION,
};
pub use economy::{
    dynamic_price, AbilityKind, AbilityState, Achievement, AchievementId, Difficulty, GameStatus,
};
pub use level::{LevelConfig, Path, PathError, SpawnGroup, WaveConfig};
pub use rejection::{
    AbilityError, PlacementError, SelectionError, TransitionError, UpgradeError,
};
pub use snapshot::{
    EnemyEffect, EnemySnapshot, EnemyView, FrameSnapshot, GameSnapshot, ProjectileSnapshot,
    ProjectileView, SpawnCursor, TowerSnapshot, TowerView,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Siege Defence.";

/// Side length of a square placement cell in world units.
pub const GRID_SIZE: f32 = 40.0;

/// Number of placement columns across the playfield.
pub const GRID_COLUMNS: u32 = 20;

/// Number of placement rows down the playfield.
pub const GRID_ROWS: u32 = 15;

/// Frame period that speeds are expressed against, in milliseconds.
pub const REFERENCE_FRAME_MS: f32 = 16.67;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the prepared wave begins.
    StartWave,
    /// Requests that a running wave pauses, or a paused wave resumes.
    TogglePause,
    /// Requests that the next level is loaded after a completed level.
    NextLevel,
    /// Requests that the whole session is reinitialised.
    Reset,
    /// Requests a new pricing difficulty.
    ChangeDifficulty {
        /// Difficulty to activate.
        difficulty: Difficulty,
    },
    /// Requests placement of a tower in the provided cell.
    PlaceTower {
        /// Type of tower to construct.
        kind: TowerKind,
        /// Cell the tower should occupy.
        cell: CellCoord,
    },
    /// Requests an upgrade of an existing tower.
    UpgradeTower {
        /// Identifier of the tower to upgrade.
        tower: TowerId,
    },
    /// Requests activation of a special ability.
    UseAbility {
        /// Ability to activate.
        ability: AbilityKind,
    },
    /// Requests that the provided tower becomes selected, or clears the selection.
    SelectTower {
        /// Tower to select.
        tower: Option<TowerId>,
    },
    /// Records the placement cell under the cursor.
    SetHoveredCell {
        /// Hovered cell, if the cursor is over the playfield.
        cell: Option<CellCoord>,
    },
    /// Requests that the active spawn group emits one enemy.
    SpawnEnemy {
        /// Kind of enemy to emit.
        kind: EnemyKind,
    },
    /// Requests that the spawn cursor moves on to the next group.
    AdvanceSpawnGroup,
    /// Records an enemy's movement and effect state for the current frame.
    AdvanceEnemy {
        /// Identifier of the enemy that moved.
        enemy: EnemyId,
        /// Location after moving.
        position: Position,
        /// Index of the last waypoint reached after moving.
        path_index: usize,
        /// Effects remaining after decay.
        effects: Vec<EnemyEffect>,
    },
    /// Reports that an enemy reached the end of the path.
    BreachEnemy {
        /// Identifier of the enemy that escaped.
        enemy: EnemyId,
    },
    /// Requests that damage is dealt to an enemy.
    DamageEnemy {
        /// Identifier of the enemy to damage.
        enemy: EnemyId,
        /// Damage before armor.
        damage: u32,
        /// Effect to attach if the enemy survives.
        effect: Option<EffectApplication>,
        /// Tower credited with the kill, if any.
        source: Option<TowerId>,
    },
    /// Records the enemy a tower is tracking.
    AssignTarget {
        /// Identifier of the tower.
        tower: TowerId,
        /// Enemy tracked by the tower, if any is in range.
        target: Option<EnemyId>,
    },
    /// Requests that a tower launches a projectile at an enemy.
    FireProjectile {
        /// Identifier of the firing tower.
        tower: TowerId,
        /// Identifier of the targeted enemy.
        target: EnemyId,
    },
    /// Records a projectile's location after flying for the current frame.
    MoveProjectile {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// Location after flying.
        position: Position,
    },
    /// Requests that a projectile is removed from flight.
    ResolveProjectile {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// How the flight ended.
        outcome: ProjectileOutcome,
    },
    /// Reports that the active wave has been cleared.
    CompleteWave,
    /// Reports that every life has been lost.
    DeclareGameOver,
}

/// How a projectile's flight ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileOutcome {
    /// The projectile reached its target.
    Hit,
    /// The target vanished before impact.
    Miss,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
        /// Session time after the tick.
        now: Duration,
    },
    /// Announces that the session entered a new status.
    StatusChanged {
        /// Status before the transition.
        from: GameStatus,
        /// Status after the transition.
        to: GameStatus,
    },
    /// Reports that a status transition intent was rejected.
    TransitionRejected {
        /// Specific reason the transition failed.
        reason: TransitionError,
    },
    /// Confirms the active pricing difficulty.
    DifficultyChanged {
        /// Difficulty that became active.
        difficulty: Difficulty,
    },
    /// Announces that a level was generated and loaded.
    LevelLoaded {
        /// One-based identifier of the loaded level.
        level: u32,
    },
    /// Confirms that the spawn schedule emitted an enemy.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of the spawned enemy.
        kind: EnemyKind,
    },
    /// Reports damage dealt to a surviving enemy.
    EnemyDamaged {
        /// Identifier of the damaged enemy.
        enemy: EnemyId,
        /// Health removed after armor.
        amount: u32,
        /// Health left.
        remaining: u32,
    },
    /// Reports that an enemy was destroyed.
    EnemyKilled {
        /// Identifier of the destroyed enemy.
        enemy: EnemyId,
        /// Kind of the destroyed enemy.
        kind: EnemyKind,
        /// Gold granted for the kill.
        gold: u32,
        /// Tower credited with the kill, if any.
        tower: Option<TowerId>,
    },
    /// Reports that an enemy escaped at the end of the path.
    EnemyBreached {
        /// Identifier of the escaped enemy.
        enemy: EnemyId,
        /// Lives left after the breach.
        lives: u32,
    },
    /// Confirms that a tower was placed.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: CellCoord,
        /// Gold deducted for the placement.
        cost: u32,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Type of tower requested for placement.
        kind: TowerKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower was upgraded.
    TowerUpgraded {
        /// Identifier of the upgraded tower.
        tower: TowerId,
        /// Level reached by the upgrade.
        level: u32,
        /// Gold deducted for the upgrade.
        cost: u32,
    },
    /// Reports that a tower upgrade request was rejected.
    TowerUpgradeRejected {
        /// Identifier of the tower targeted for upgrade.
        tower: TowerId,
        /// Specific reason the upgrade failed.
        reason: UpgradeError,
    },
    /// Reports that a tower started tracking a different enemy, or none.
    TargetChanged {
        /// Identifier of the tower.
        tower: TowerId,
        /// Newly tracked enemy.
        target: Option<EnemyId>,
    },
    /// Confirms that a projectile was launched.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Identifier of the firing tower.
        tower: TowerId,
        /// Identifier of the targeted enemy.
        target: EnemyId,
    },
    /// Reports that a projectile's flight ended.
    ProjectileResolved {
        /// Identifier of the projectile.
        projectile: ProjectileId,
        /// How the flight ended.
        outcome: ProjectileOutcome,
    },
    /// Confirms that a special ability was activated.
    AbilityUsed {
        /// Ability that was activated.
        ability: AbilityKind,
    },
    /// Reports that a special ability request was rejected.
    AbilityRejected {
        /// Ability requested.
        ability: AbilityKind,
        /// Specific reason the request failed.
        reason: AbilityError,
    },
    /// Confirms the currently selected tower.
    SelectionChanged {
        /// Selected tower, if any.
        tower: Option<TowerId>,
    },
    /// Reports that a selection request was rejected.
    SelectionRejected {
        /// Tower requested for selection.
        tower: TowerId,
        /// Specific reason the selection failed.
        reason: SelectionError,
    },
    /// Confirms the hovered placement cell.
    HoveredCellChanged {
        /// Hovered cell, if any.
        cell: Option<CellCoord>,
    },
    /// Announces that an achievement was unlocked and its reward granted.
    AchievementUnlocked {
        /// Achievement that was unlocked.
        achievement: AchievementId,
        /// Gold granted.
        reward: u32,
    },
    /// Announces that the player reached a new level.
    PlayerLeveledUp {
        /// Player level reached.
        level: u32,
        /// Tower kinds unlocked by the level.
        unlocked: Vec<TowerKind>,
    },
    /// Announces that a wave was cleared.
    WaveCompleted {
        /// One-based index of the cleared wave.
        wave: u32,
        /// Gold granted for the wave.
        reward: u32,
    },
    /// Announces that every wave of a level was cleared.
    LevelCompleted {
        /// One-based identifier of the cleared level.
        level: u32,
    },
    /// Announces that the session was reinitialised.
    GameReset,
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single placement cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Reports whether the cell lies on the playfield.
    #[must_use]
    pub const fn is_on_playfield(&self) -> bool {
        self.column < GRID_COLUMNS && self.row < GRID_ROWS
    }

    /// Centre of the cell in world units.
    #[must_use]
    pub fn center(self) -> Position {
        let half = GRID_SIZE / 2.0;
        Position::new(
            self.column as f32 * GRID_SIZE + half,
            self.row as f32 * GRID_SIZE + half,
        )
    }

    /// Cell containing the provided world position, if it lies on the playfield.
    #[must_use]
    pub fn containing(position: Position) -> Option<Self> {
        if position.x() < 0.0 || position.y() < 0.0 {
            return None;
        }

        let cell = Self::new(
            (position.x() / GRID_SIZE) as u32,
            (position.y() / GRID_SIZE) as u32,
        );
        cell.is_on_playfield().then_some(cell)
    }
}

/// Continuous location expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance(self, other: Position) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Moves toward `target` by at most `max_distance`, never overshooting it.
    #[must_use]
    pub fn step_toward(self, target: Position, max_distance: f32) -> Position {
        let distance = self.distance(target);
        if distance <= max_distance || distance <= f32::EPSILON {
            return target;
        }

        let scale = max_distance / distance;
        Position::new(
            self.x + (target.x - self.x) * scale,
            self.y + (target.y - self.y) * scale,
        )
    }

    /// Shortest distance to the segment between `start` and `end`.
    #[must_use]
    pub fn distance_to_segment(self, start: Position, end: Position) -> f32 {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length_sq = dx * dx + dy * dy;
        if length_sq <= f32::EPSILON {
            return self.distance(start);
        }

        let t = (((self.x - start.x) * dx + (self.y - start.y) * dy) / length_sq).clamp(0.0, 1.0);
        self.distance(Position::new(start.x + dx * t, start.y + dy * t))
    }
}

/// Converts an elapsed duration into distance travelled at `speed` units per reference frame.
#[must_use]
pub fn travel_distance(speed: f32, dt: Duration) -> f32 {
    speed * (dt.as_secs_f32() * 1_000.0 / REFERENCE_FRAME_MS)
}
