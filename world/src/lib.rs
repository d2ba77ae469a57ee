#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Siege Defence.

use std::time::Duration;

use siege_core::{
    dynamic_price, AbilityError, AbilityKind, AchievementId, CellCoord, Command,
    EffectApplication, EffectKind, EnemyId, EnemyKind, Event, GameStatus, LevelConfig,
    PlacementError, ProjectileId, ProjectileOutcome, TowerId, TowerKind, TransitionError,
    UpgradeError, GRID_SIZE, WELCOME_BANNER,
};
use siege_system_level_generation::generate_level;
use tracing::debug;

mod enemies;
mod projectiles;
mod session;
mod towers;

use enemies::EnemyRegistry;
use projectiles::ProjectileRegistry;
use session::Session;
use towers::TowerRegistry;

const AIRSTRIKE_DAMAGE: u32 = 200;
const FREEZE_ALL_DURATION: Duration = Duration::from_millis(5_000);
const FREEZE_ALL_STRENGTH: f32 = 0.1;
const GOLD_BOOST_AMOUNT: u32 = 200;
const REPAIR_LIVES: u32 = 5;

/// Session-wide tuning shared by every level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Gold available when a session starts.
    pub starting_gold: u32,
    /// Lives available when a session or level starts.
    pub starting_lives: u32,
    /// Highest player level experience may reach.
    pub max_player_level: u32,
    /// Level whose completion ends the campaign in victory.
    pub final_level: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_gold: 150,
            starting_lives: 25,
            max_player_level: 50,
            final_level: 20,
        }
    }
}

/// Represents the authoritative Siege Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: Config,
    level: LevelConfig,
    session: Session,
    towers: TowerRegistry,
    enemies: EnemyRegistry,
    projectiles: ProjectileRegistry,
}

impl World {
    /// Creates a new world positioned at the first wave of the first level.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            banner: WELCOME_BANNER,
            level: generate_level(1),
            session: Session::new(config.starting_gold, config.starting_lives),
            towers: TowerRegistry::new(),
            enemies: EnemyRegistry::new(),
            projectiles: ProjectileRegistry::new(),
            config,
        }
    }

    fn price(&self, base_cost: u32) -> u32 {
        dynamic_price(base_cost, self.session.level, self.session.difficulty)
    }

    fn transition(
        &mut self,
        allowed: impl FnOnce(GameStatus) -> Option<GameStatus>,
        out_events: &mut Vec<Event>,
    ) -> Result<(), TransitionError> {
        let status = self.session.status;
        match allowed(status) {
            Some(to) => {
                self.session.set_status(to, out_events);
                Ok(())
            }
            None => Err(Self::reject_transition(status, out_events)),
        }
    }

    fn reject_transition(status: GameStatus, out_events: &mut Vec<Event>) -> TransitionError {
        let reason = TransitionError::InvalidStatus(status);
        debug!(%reason, "transition rejected");
        out_events.push(Event::TransitionRejected { reason });
        reason
    }

    fn place_tower(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
    ) -> Result<(TowerId, u32), PlacementError> {
        let status = self.session.status;
        if status.is_terminal() {
            return Err(PlacementError::InvalidStatus(status));
        }
        if !cell.is_on_playfield() {
            return Err(PlacementError::OutOfBounds);
        }
        if self.towers.occupies(cell) {
            return Err(PlacementError::Occupied);
        }
        if self.level.path.distance_to(cell.center()) < GRID_SIZE {
            return Err(PlacementError::OnPath);
        }
        if !self.session.unlocked_towers.contains(&kind) {
            return Err(PlacementError::Locked);
        }

        let required = self.price(kind.stats().cost);
        if self.session.gold < required {
            return Err(PlacementError::InsufficientGold {
                required,
                available: self.session.gold,
            });
        }

        self.session.gold -= required;
        Ok((self.towers.insert(kind, cell, required), required))
    }

    fn upgrade_tower(&mut self, tower: TowerId) -> Result<(u32, u32), UpgradeError> {
        let status = self.session.status;
        if status.is_terminal() {
            return Err(UpgradeError::InvalidStatus(status));
        }
        let Some(state) = self.towers.get(tower) else {
            return Err(UpgradeError::MissingTower);
        };

        let base = state.kind.stats().upgrade_cost.saturating_mul(state.level);
        let required = self.price(base);
        if self.session.gold < required {
            return Err(UpgradeError::InsufficientGold {
                required,
                available: self.session.gold,
            });
        }

        let Some(state) = self.towers.get_mut(tower) else {
            return Err(UpgradeError::MissingTower);
        };
        state.upgrade(required);
        let level = state.level;
        self.session.gold -= required;
        Ok((level, required))
    }

    fn use_ability(
        &mut self,
        kind: AbilityKind,
        out_events: &mut Vec<Event>,
    ) -> Result<(), AbilityError> {
        let status = self.session.status;
        if status.is_terminal() {
            return Err(AbilityError::InvalidStatus(status));
        }

        let now = self.session.clock;
        let gold = self.session.gold;
        let ability = self.session.ability_mut(kind);
        if gold < ability.cost {
            return Err(AbilityError::InsufficientGold {
                required: ability.cost,
                available: gold,
            });
        }
        let remaining = ability.ready_in(now);
        if !remaining.is_zero() {
            return Err(AbilityError::CoolingDown { remaining });
        }

        ability.last_used = Some(now);
        let cost = ability.cost;
        self.session.gold -= cost;
        out_events.push(Event::AbilityUsed { ability: kind });

        match kind {
            AbilityKind::Airstrike => {
                for enemy in self.enemies.ids() {
                    self.damage_enemy(enemy, AIRSTRIKE_DAMAGE, None, None, out_events);
                }
            }
            AbilityKind::FreezeAll => {
                let freeze = EffectApplication::new(
                    EffectKind::Freeze,
                    FREEZE_ALL_DURATION,
                    FREEZE_ALL_STRENGTH,
                );
                for enemy in self.enemies.iter_mut() {
                    enemy.apply_effect(freeze);
                }
            }
            AbilityKind::GoldBoost => self.session.earn_gold(GOLD_BOOST_AMOUNT),
            AbilityKind::Repair => {
                let restored = self.session.lives.saturating_add(REPAIR_LIVES);
                self.session.lives = restored
                    .min(self.config.starting_lives)
                    .max(self.session.lives);
            }
        }
        Ok(())
    }

    fn spawn_enemy(&mut self, kind: EnemyKind, out_events: &mut Vec<Event>) {
        let enemy = self
            .enemies
            .spawn(kind, self.level.path.start(), self.session.level);
        let cursor = &mut self.session.spawn_cursor;
        cursor.spawned = cursor.spawned.saturating_add(1);
        cursor.last_spawn = self.session.clock;
        out_events.push(Event::EnemySpawned { enemy, kind });
    }

    fn damage_enemy(
        &mut self,
        enemy: EnemyId,
        damage: u32,
        effect: Option<EffectApplication>,
        source: Option<TowerId>,
        out_events: &mut Vec<Event>,
    ) {
        let Some(state) = self.enemies.get_mut(enemy) else {
            return;
        };

        let dealt = damage.saturating_sub(state.armor).max(1);
        if dealt < state.health {
            state.health -= dealt;
            if let Some(effect) = effect {
                state.apply_effect(effect);
            }
            out_events.push(Event::EnemyDamaged {
                enemy,
                amount: dealt,
                remaining: state.health,
            });
            return;
        }

        let Some(killed) = self.enemies.remove(enemy) else {
            return;
        };
        let gold = (f64::from(killed.reward) * self.level.gold_multiplier).floor() as u32;
        self.session.earn_gold(gold);
        self.session.score = self
            .session
            .score
            .saturating_add(u64::from(gold).saturating_mul(10));
        if let Some(tower) = source.and_then(|tower| self.towers.get_mut(tower)) {
            tower.kills = tower.kills.saturating_add(1);
        }

        debug!(enemy = enemy.get(), kind = ?killed.kind, gold, "enemy killed");
        out_events.push(Event::EnemyKilled {
            enemy,
            kind: killed.kind,
            gold,
            tower: source,
        });

        self.session.gain_experience(
            killed.kind.experience(),
            self.config.max_player_level,
            out_events,
        );
        self.session
            .advance_achievement(AchievementId::FirstKill, 1, out_events);
        self.session
            .advance_achievement(AchievementId::GoldCollector, gold, out_events);
    }

    fn breach_enemy(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        if self.enemies.remove(enemy).is_none() {
            return;
        }
        self.session.lives = self.session.lives.saturating_sub(1);
        self.session.lives_lost_this_level = self.session.lives_lost_this_level.saturating_add(1);
        debug!(enemy = enemy.get(), lives = self.session.lives, "enemy breached");
        out_events.push(Event::EnemyBreached {
            enemy,
            lives: self.session.lives,
        });
    }

    fn fire_projectile(&mut self, tower: TowerId, target: EnemyId, out_events: &mut Vec<Event>) {
        if !self.enemies.contains(target) {
            return;
        }
        let Some(state) = self.towers.get_mut(tower) else {
            return;
        };

        state.last_attack = self.session.clock;
        let projectile = self
            .projectiles
            .launch(tower, state.kind, state.position(), target, state.damage);
        out_events.push(Event::ProjectileFired {
            projectile,
            tower,
            target,
        });
    }

    fn resolve_projectile(
        &mut self,
        projectile: ProjectileId,
        outcome: ProjectileOutcome,
        out_events: &mut Vec<Event>,
    ) {
        if self.projectiles.remove(projectile).is_some() {
            out_events.push(Event::ProjectileResolved {
                projectile,
                outcome,
            });
        }
    }

    fn complete_wave(&mut self, out_events: &mut Vec<Event>) {
        let wave = self.session.wave;
        let Some(config) = self.level.wave(wave) else {
            return;
        };

        let reward = config.reward();
        self.session.earn_gold(reward);
        out_events.push(Event::WaveCompleted { wave, reward });
        self.session
            .advance_achievement(AchievementId::WaveSurvivor, 1, out_events);

        if wave < self.level.wave_count() {
            self.session.wave = wave + 1;
            self.session.spawn_cursor = Default::default();
            self.session.set_status(GameStatus::Preparing, out_events);
            return;
        }

        let level = self.level.id;
        out_events.push(Event::LevelCompleted { level });
        self.session.gain_experience(
            self.level.experience_reward,
            self.config.max_player_level,
            out_events,
        );
        self.session
            .advance_achievement(AchievementId::LevelConqueror, 1, out_events);
        if self.session.lives_lost_this_level == 0 {
            self.session
                .advance_achievement(AchievementId::PerfectDefense, 1, out_events);
        }

        let status = if level >= self.config.final_level {
            GameStatus::Victory
        } else {
            GameStatus::LevelComplete
        };
        self.session.set_status(status, out_events);
    }

    fn load_next_level(&mut self, out_events: &mut Vec<Event>) {
        let next = self.session.level.saturating_add(1);
        self.level = generate_level(next);
        self.session.level = next;
        self.session.wave = 1;
        self.session.lives = self.config.starting_lives;
        self.session.lives_lost_this_level = 0;
        self.session.spawn_cursor = Default::default();
        self.session.selected_tower = None;
        self.towers.clear();
        self.enemies.clear();
        self.projectiles.clear();
        out_events.push(Event::LevelLoaded { level: next });
        self.session.set_status(GameStatus::Preparing, out_events);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let playing = world.session.status == GameStatus::Playing;

    match command {
        Command::Tick { dt } => {
            world.session.clock = world.session.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced {
                dt,
                now: world.session.clock,
            });
        }
        Command::StartWave => {
            let _ = intent::start_wave(world, out_events);
        }
        Command::TogglePause => {
            let _ = intent::toggle_pause(world, out_events);
        }
        Command::NextLevel => {
            let _ = intent::next_level(world, out_events);
        }
        Command::Reset => {
            *world = World::new(world.config.clone());
            out_events.push(Event::GameReset);
        }
        Command::ChangeDifficulty { difficulty } => {
            world.session.difficulty = difficulty;
            out_events.push(Event::DifficultyChanged { difficulty });
        }
        Command::PlaceTower { kind, cell } => {
            let _ = intent::place_tower(world, kind, cell, out_events);
        }
        Command::UpgradeTower { tower } => {
            let _ = intent::upgrade_tower(world, tower, out_events);
        }
        Command::UseAbility { ability } => {
            let _ = intent::use_ability(world, ability, out_events);
        }
        Command::SelectTower { tower } => {
            let _ = intent::select_tower(world, tower, out_events);
        }
        Command::SetHoveredCell { cell } => {
            world.session.hovered_cell = cell;
            out_events.push(Event::HoveredCellChanged { cell });
        }
        Command::SpawnEnemy { kind } => {
            if playing {
                world.spawn_enemy(kind, out_events);
            }
        }
        Command::AdvanceSpawnGroup => {
            if playing {
                let cursor = &mut world.session.spawn_cursor;
                cursor.group_index = cursor.group_index.saturating_add(1);
                cursor.spawned = 0;
            }
        }
        Command::AdvanceEnemy {
            enemy,
            position,
            path_index,
            effects,
        } => {
            if let Some(state) = world.enemies.get_mut(enemy) {
                state.position = position;
                state.path_index = path_index;
                state.effects = effects;
            }
        }
        Command::BreachEnemy { enemy } => world.breach_enemy(enemy, out_events),
        Command::DamageEnemy {
            enemy,
            damage,
            effect,
            source,
        } => world.damage_enemy(enemy, damage, effect, source, out_events),
        Command::AssignTarget { tower, target } => {
            if let Some(state) = world.towers.get_mut(tower) {
                if state.target != target {
                    state.target = target;
                    out_events.push(Event::TargetChanged { tower, target });
                }
            }
        }
        Command::FireProjectile { tower, target } => {
            if playing {
                world.fire_projectile(tower, target, out_events);
            }
        }
        Command::MoveProjectile {
            projectile,
            position,
        } => {
            if let Some(state) = world.projectiles.get_mut(projectile) {
                state.position = position;
            }
        }
        Command::ResolveProjectile {
            projectile,
            outcome,
        } => world.resolve_projectile(projectile, outcome, out_events),
        Command::CompleteWave => {
            if playing && world.enemies.is_empty() {
                world.complete_wave(out_events);
            }
        }
        Command::DeclareGameOver => {
            if playing && world.session.lives == 0 {
                world.session.set_status(GameStatus::GameOver, out_events);
            }
        }
    }
}

/// Typed entry points for player intents.
///
/// Each function performs the same mutation as the matching [`Command`] passed
/// to [`apply`], broadcasts the same events, and also returns the outcome.
pub mod intent {
    use siege_core::{
        AbilityError, AbilityKind, AchievementId, CellCoord, Event, GameStatus, PlacementError,
        SelectionError, TowerId, TowerKind, TransitionError, UpgradeError,
    };
    use tracing::debug;

    use super::World;

    /// Moves a prepared session into play.
    pub fn start_wave(
        world: &mut World,
        out_events: &mut Vec<Event>,
    ) -> Result<(), TransitionError> {
        world.transition(
            |status| (status == GameStatus::Preparing).then_some(GameStatus::Playing),
            out_events,
        )
    }

    /// Pauses a running wave or resumes a paused one.
    pub fn toggle_pause(
        world: &mut World,
        out_events: &mut Vec<Event>,
    ) -> Result<(), TransitionError> {
        world.transition(
            |status| match status {
                GameStatus::Playing => Some(GameStatus::Paused),
                GameStatus::Paused => Some(GameStatus::Playing),
                _ => None,
            },
            out_events,
        )
    }

    /// Loads the level after a completed one.
    pub fn next_level(
        world: &mut World,
        out_events: &mut Vec<Event>,
    ) -> Result<(), TransitionError> {
        let status = world.session.status;
        if status != GameStatus::LevelComplete {
            return Err(World::reject_transition(status, out_events));
        }
        world.load_next_level(out_events);
        Ok(())
    }

    /// Places a tower, paying its dynamic price.
    pub fn place_tower(
        world: &mut World,
        kind: TowerKind,
        cell: CellCoord,
        out_events: &mut Vec<Event>,
    ) -> Result<TowerId, PlacementError> {
        match world.place_tower(kind, cell) {
            Ok((tower, cost)) => {
                out_events.push(Event::TowerPlaced {
                    tower,
                    kind,
                    cell,
                    cost,
                });
                debug!(tower = tower.get(), kind = kind.name(), cost, "tower placed");
                world
                    .session
                    .advance_achievement(AchievementId::TowerMaster, 1, out_events);
                Ok(tower)
            }
            Err(reason) => {
                debug!(?kind, ?cell, %reason, "tower placement rejected");
                out_events.push(Event::TowerPlacementRejected { kind, cell, reason });
                Err(reason)
            }
        }
    }

    /// Upgrades a tower, returning its new level.
    pub fn upgrade_tower(
        world: &mut World,
        tower: TowerId,
        out_events: &mut Vec<Event>,
    ) -> Result<u32, UpgradeError> {
        match world.upgrade_tower(tower) {
            Ok((level, cost)) => {
                out_events.push(Event::TowerUpgraded { tower, level, cost });
                world
                    .session
                    .advance_achievement(AchievementId::UpgradeExpert, 1, out_events);
                Ok(level)
            }
            Err(reason) => {
                debug!(tower = tower.get(), %reason, "tower upgrade rejected");
                out_events.push(Event::TowerUpgradeRejected { tower, reason });
                Err(reason)
            }
        }
    }

    /// Triggers a special ability.
    pub fn use_ability(
        world: &mut World,
        ability: AbilityKind,
        out_events: &mut Vec<Event>,
    ) -> Result<(), AbilityError> {
        world.use_ability(ability, out_events).map_err(|reason| {
            debug!(?ability, %reason, "ability rejected");
            out_events.push(Event::AbilityRejected { ability, reason });
            reason
        })
    }

    /// Highlights a tower, or clears the selection with `None`.
    pub fn select_tower(
        world: &mut World,
        tower: Option<TowerId>,
        out_events: &mut Vec<Event>,
    ) -> Result<(), SelectionError> {
        if let Some(id) = tower.filter(|id| !world.towers.contains(*id)) {
            let reason = SelectionError::MissingTower;
            out_events.push(Event::SelectionRejected { tower: id, reason });
            return Err(reason);
        }
        world.session.selected_tower = tower;
        out_events.push(Event::SelectionChanged { tower });
        Ok(())
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{Config, World};
    use siege_core::{
        Difficulty, EnemyView, FrameSnapshot, GameSnapshot, GameStatus, LevelConfig,
        ProjectileView, SpawnCursor, TowerView, WaveConfig,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Session-wide tuning the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &Config {
        &world.config
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.session.status
    }

    /// Session time accumulated by the world clock.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.session.clock
    }

    /// Difficulty used for pricing.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        world.session.difficulty
    }

    /// Remaining lives.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.session.lives
    }

    /// Lives lost since the current level was loaded.
    #[must_use]
    pub fn lives_lost_this_level(world: &World) -> u32 {
        world.session.lives_lost_this_level
    }

    /// Description of the active level.
    #[must_use]
    pub fn level(world: &World) -> &LevelConfig {
        &world.level
    }

    /// Schedule of the active wave, if the wave index lies within the level.
    #[must_use]
    pub fn current_wave(world: &World) -> Option<&WaveConfig> {
        world.level.wave(world.session.wave)
    }

    /// Progress through the active wave's spawn schedule.
    #[must_use]
    pub fn spawn_cursor(world: &World) -> SpawnCursor {
        world.session.spawn_cursor
    }

    /// Scales a catalog cost by the active level and difficulty.
    #[must_use]
    pub fn dynamic_price(world: &World, base_cost: u32) -> u32 {
        world.price(base_cost)
    }

    /// Captures a read-only copy of the aggregate game state.
    #[must_use]
    pub fn game_snapshot(world: &World) -> GameSnapshot {
        world.session.snapshot()
    }

    /// Captures a read-only view of every placed tower.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Captures a read-only view of every live enemy.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures a read-only view of every projectile in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// Captures everything presentation needs to render one frame.
    #[must_use]
    pub fn frame_snapshot(world: &World) -> FrameSnapshot {
        FrameSnapshot {
            game: game_snapshot(world),
            towers: tower_view(world).into_vec(),
            enemies: enemy_view(world).into_vec(),
            projectiles: projectile_view(world).into_vec(),
            level: world.level.clone(),
        }
    }
}
