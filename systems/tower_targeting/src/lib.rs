#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use siege_core::{Command, EnemyId, EnemyView, GameStatus, Position, TowerView};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `AssignTarget` for every tower whose preferred target changed.
    ///
    /// Towers prefer the eligible enemy furthest along the path; ties go to the
    /// earliest spawned enemy. Towers without an eligible enemy lose their target.
    pub fn handle(
        &mut self,
        status: GameStatus,
        towers: &TowerView,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if status != GameStatus::Playing {
            return;
        }

        self.prepare_enemy_workspace(enemies);

        for tower in towers.iter() {
            let range = tower.range as f32;
            let mut best: Option<EnemyCandidate> = None;

            for candidate in &self.enemy_workspace {
                if candidate.flying && !tower.kind.is_anti_air() {
                    continue;
                }
                if tower.position.distance(candidate.position) > range {
                    continue;
                }

                match &mut best {
                    Some(existing) => {
                        if candidate.precedes(existing) {
                            *existing = *candidate;
                        }
                    }
                    None => best = Some(*candidate),
                }
            }

            let target = best.map(|candidate| candidate.id);
            if target != tower.target {
                out.push(Command::AssignTarget {
                    tower: tower.id,
                    target,
                });
            }
        }
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace
            .extend(enemies.iter().map(|snapshot| EnemyCandidate {
                id: snapshot.id,
                position: snapshot.position,
                path_index: snapshot.path_index,
                flying: snapshot.flying,
            }));
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EnemyCandidate {
    id: EnemyId,
    position: Position,
    path_index: usize,
    flying: bool,
}

impl EnemyCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.path_index != other.path_index {
            return self.path_index > other.path_index;
        }
        self.id < other.id
    }
}
