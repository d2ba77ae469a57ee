#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits projectile firing commands from targeting data.

use std::time::Duration;

use siege_core::{Command, GameStatus, TowerSnapshot, TowerView};

/// Tower combat system that queues firing commands for ready towers.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireProjectile` for every targeting tower whose attack interval elapsed.
    pub fn handle(
        &mut self,
        status: GameStatus,
        towers: &TowerView,
        now: Duration,
        out: &mut Vec<Command>,
    ) {
        if status != GameStatus::Playing {
            return;
        }

        self.scratch.clear();

        for tower in towers.iter() {
            let Some(target) = tower.target else {
                continue;
            };
            if is_ready(tower, now) {
                self.scratch.push(Command::FireProjectile {
                    tower: tower.id,
                    target,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

fn is_ready(tower: &TowerSnapshot, now: Duration) -> bool {
    now.saturating_sub(tower.last_attack) >= tower.attack_interval
}
