#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Siege Defence engine: owns the world and every system, and runs the frame pipeline.
//!
//! Adapters drive the engine through [`Engine::step`] and the intent methods.
//! Each step applies the commands of one stage before the next stage observes
//! the world, so later stages always see the committed results of earlier ones.

mod config;

use std::time::Duration;

use siege_core::{
    AbilityError, AbilityKind, CellCoord, Command, Difficulty, Event, FrameSnapshot, GameStatus,
    PlacementError, Position, SelectionError, TowerId, TowerKind, TransitionError, UpgradeError,
};
use siege_system_movement::Movement;
use siege_system_progression::Progression;
use siege_system_projectiles::Projectiles;
use siege_system_spawning::Spawning;
use siege_system_tower_combat::TowerCombat;
use siege_system_tower_targeting::TowerTargeting;
use siege_world::{self as world, intent, query, World};
use tracing::{debug, trace};

pub use config::{ConfigError, EngineConfig};

/// Authoritative simulation together with the systems that drive it.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    world: World,
    spawning: Spawning,
    movement: Movement,
    targeting: TowerTargeting,
    combat: TowerCombat,
    projectiles: Projectiles,
    progression: Progression,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Engine {
    /// Creates an engine whose world starts on the first level.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            world: World::new(config.world_config()),
            spawning: Spawning::new(),
            movement: Movement::new(config.movement_config()),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            projectiles: Projectiles::new(),
            progression: Progression::new(),
            events: Vec::new(),
            commands: Vec::new(),
            config,
        }
    }

    /// Configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read access to the world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Advances the simulation by one frame and returns the events it produced.
    ///
    /// `dt` is clamped to the configured maximum frame delta.
    pub fn step(&mut self, dt: Duration) -> &[Event] {
        let dt = match self.config.max_frame_delta() {
            Some(max) => dt.min(max),
            None => dt,
        };

        self.events.clear();
        world::apply(&mut self.world, Command::Tick { dt }, &mut self.events);

        self.spawning.handle(
            query::status(&self.world),
            query::current_wave(&self.world),
            query::spawn_cursor(&self.world),
            query::clock(&self.world),
            &mut self.commands,
        );
        self.flush("spawning");

        self.movement.handle(
            &self.events,
            query::status(&self.world),
            &query::enemy_view(&self.world),
            &query::level(&self.world).path,
            &mut self.commands,
        );
        self.flush("movement");

        self.targeting.handle(
            query::status(&self.world),
            &query::tower_view(&self.world),
            &query::enemy_view(&self.world),
            &mut self.commands,
        );
        self.flush("targeting");

        self.combat.handle(
            query::status(&self.world),
            &query::tower_view(&self.world),
            query::clock(&self.world),
            &mut self.commands,
        );
        self.flush("combat");

        self.projectiles.handle(
            &self.events,
            query::status(&self.world),
            &query::projectile_view(&self.world),
            &query::enemy_view(&self.world),
            &mut self.commands,
        );
        self.flush("projectiles");

        self.progression.handle(
            query::status(&self.world),
            query::lives(&self.world),
            query::enemy_view(&self.world).len(),
            query::current_wave(&self.world),
            query::spawn_cursor(&self.world),
            &mut self.commands,
        );
        self.flush("progression");

        &self.events
    }

    fn flush(&mut self, stage: &'static str) {
        trace!(stage, commands = self.commands.len(), "stage resolved");
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn submit(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut Vec::new());
    }

    /// Places a tower of `kind` on `cell`, paying its dynamic price.
    pub fn place_tower(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
    ) -> Result<TowerId, PlacementError> {
        intent::place_tower(&mut self.world, kind, cell, &mut Vec::new())
    }

    /// Upgrades `tower`, returning its new level.
    pub fn upgrade_tower(&mut self, tower: TowerId) -> Result<u32, UpgradeError> {
        intent::upgrade_tower(&mut self.world, tower, &mut Vec::new())
    }

    /// Triggers a special ability.
    pub fn use_ability(&mut self, ability: AbilityKind) -> Result<(), AbilityError> {
        intent::use_ability(&mut self.world, ability, &mut Vec::new())
    }

    /// Starts the prepared wave.
    pub fn start_wave(&mut self) -> Result<(), TransitionError> {
        intent::start_wave(&mut self.world, &mut Vec::new())
    }

    /// Pauses a running wave or resumes a paused one.
    pub fn toggle_pause(&mut self) -> Result<(), TransitionError> {
        intent::toggle_pause(&mut self.world, &mut Vec::new())
    }

    /// Loads the next level after a completed one.
    pub fn next_level(&mut self) -> Result<(), TransitionError> {
        intent::next_level(&mut self.world, &mut Vec::new())
    }

    /// Highlights `tower`, or clears the selection with `None`.
    pub fn select_tower(&mut self, tower: Option<TowerId>) -> Result<(), SelectionError> {
        intent::select_tower(&mut self.world, tower, &mut Vec::new())
    }

    /// Records the placement cell under the cursor.
    pub fn set_hovered_cell(&mut self, cell: Option<CellCoord>) {
        self.submit(Command::SetHoveredCell { cell });
    }

    /// Hovers the cell containing a pointer `position`, clearing the hover
    /// when the pointer leaves the playfield.
    pub fn hover_at(&mut self, position: Position) {
        self.set_hovered_cell(CellCoord::containing(position));
    }

    /// Switches the difficulty used for pricing.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.submit(Command::ChangeDifficulty { difficulty });
    }

    /// Reinitialises the session, keeping the engine configuration.
    pub fn reset(&mut self) {
        debug!("session reset");
        self.submit(Command::Reset);
        self.movement = Movement::new(self.config.movement_config());
        self.targeting = TowerTargeting::new();
        self.combat = TowerCombat::new();
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        query::status(&self.world)
    }

    /// Dynamic price of `base_cost` at the current level and difficulty.
    #[must_use]
    pub fn dynamic_price(&self, base_cost: u32) -> u32 {
        query::dynamic_price(&self.world, base_cost)
    }

    /// Everything presentation needs to render the current frame.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        query::frame_snapshot(&self.world)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_delta_is_clamped() {
        let mut engine = Engine::default();
        let _ = engine.step(Duration::from_secs(10));
        assert_eq!(query::clock(engine.world()), Duration::from_millis(100));
    }

    #[test]
    fn clamp_can_be_disabled() {
        let mut engine = Engine::new(EngineConfig {
            max_frame_delta_ms: None,
            ..EngineConfig::default()
        });
        let _ = engine.step(Duration::from_secs(10));
        assert_eq!(query::clock(engine.world()), Duration::from_secs(10));
    }

    #[test]
    fn transitions_surface_rejections() {
        let mut engine = Engine::default();
        assert_eq!(
            engine.toggle_pause(),
            Err(TransitionError::InvalidStatus(GameStatus::Preparing))
        );
        assert_eq!(engine.start_wave(), Ok(()));
        assert_eq!(engine.toggle_pause(), Ok(()));
        assert_eq!(engine.status(), GameStatus::Paused);
        assert_eq!(
            engine.next_level(),
            Err(TransitionError::InvalidStatus(GameStatus::Paused))
        );
    }

    #[test]
    fn unknown_tower_selection_is_rejected() {
        let mut engine = Engine::default();
        assert_eq!(
            engine.select_tower(Some(TowerId::new(9))),
            Err(SelectionError::MissingTower)
        );
        assert_eq!(engine.select_tower(None), Ok(()));
    }
}
