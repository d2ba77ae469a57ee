#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy movement system: effect decay, damage over time and path following.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use siege_core::{
    travel_distance, Command, DamageOverTimeModel, EnemyEffect, EnemySnapshot, EnemyView, Event,
    GameStatus, Path, DAMAGE_TICK_CHANCE, DAMAGE_TICK_PERIOD,
};

/// Distance below which an enemy snaps onto its next waypoint.
const WAYPOINT_SNAP_DISTANCE: f32 = 5.0;

/// Configuration parameters required to construct the movement system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    damage_over_time: DamageOverTimeModel,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided damage model and seed.
    #[must_use]
    pub const fn new(damage_over_time: DamageOverTimeModel, rng_seed: u64) -> Self {
        Self {
            damage_over_time,
            rng_seed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DamageOverTimeModel::Periodic, 0)
    }
}

/// Pure system that advances every enemy along the path once per step.
#[derive(Debug)]
pub struct Movement {
    damage_over_time: DamageOverTimeModel,
    rng: ChaCha8Rng,
    effects: Vec<EnemyEffect>,
    damage_ticks: Vec<u32>,
}

impl Movement {
    /// Creates a new movement system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            damage_over_time: config.damage_over_time,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            effects: Vec::new(),
            damage_ticks: Vec::new(),
        }
    }

    /// Consumes time events and the enemy view to emit movement, damage and breach commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        status: GameStatus,
        enemies: &EnemyView,
        path: &Path,
        out: &mut Vec<Command>,
    ) {
        if status != GameStatus::Playing {
            return;
        }

        let mut dt = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt: step, .. } = event {
                dt = dt.saturating_add(*step);
            }
        }

        if dt.is_zero() {
            return;
        }

        for enemy in enemies.iter() {
            self.advance(enemy, dt, path, out);
        }
    }

    fn advance(
        &mut self,
        enemy: &EnemySnapshot,
        dt: Duration,
        path: &Path,
        out: &mut Vec<Command>,
    ) {
        if enemy.path_index >= path.last_index() {
            out.push(Command::BreachEnemy { enemy: enemy.id });
            return;
        }

        let speed = enemy.speed
            * enemy
                .effects
                .iter()
                .filter(|effect| effect.kind.scales_speed())
                .map(|effect| effect.strength)
                .product::<f32>();

        self.effects.clear();
        self.damage_ticks.clear();
        for effect in &enemy.effects {
            let mut next = *effect;
            if effect.kind.deals_damage() {
                let ticks = self.damage_ticks_for(&mut next, dt);
                let damage = effect.strength.max(0.0) as u32;
                self.damage_ticks
                    .extend(std::iter::repeat(damage).take(ticks as usize));
            }
            next.remaining = next.remaining.saturating_sub(dt);
            if !next.remaining.is_zero() {
                self.effects.push(next);
            }
        }

        let (position, path_index) = match path.waypoint(enemy.path_index + 1) {
            Some(waypoint) if enemy.position.distance(waypoint) < WAYPOINT_SNAP_DISTANCE => {
                (waypoint, enemy.path_index + 1)
            }
            Some(waypoint) => (
                enemy
                    .position
                    .step_toward(waypoint, travel_distance(speed, dt)),
                enemy.path_index,
            ),
            None => (enemy.position, enemy.path_index),
        };

        out.push(Command::AdvanceEnemy {
            enemy: enemy.id,
            position,
            path_index,
            effects: self.effects.clone(),
        });

        for damage in self.damage_ticks.drain(..) {
            out.push(Command::DamageEnemy {
                enemy: enemy.id,
                damage,
                effect: None,
                source: None,
            });
        }

        if path_index >= path.last_index() {
            out.push(Command::BreachEnemy { enemy: enemy.id });
        }
    }

    fn damage_ticks_for(&mut self, effect: &mut EnemyEffect, dt: Duration) -> u32 {
        match self.damage_over_time {
            DamageOverTimeModel::Periodic => {
                let mut progress = effect.tick_progress.saturating_add(dt.min(effect.remaining));
                let mut ticks = 0;
                while progress >= DAMAGE_TICK_PERIOD {
                    progress -= DAMAGE_TICK_PERIOD;
                    ticks += 1;
                }
                effect.tick_progress = progress;
                ticks
            }
            DamageOverTimeModel::Stochastic => u32::from(self.rng.gen_bool(DAMAGE_TICK_CHANCE)),
        }
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
