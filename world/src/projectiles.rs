//! Projectiles in flight.

use std::collections::BTreeMap;

use siege_core::{EnemyId, Position, ProjectileId, ProjectileSnapshot, TowerId, TowerKind};

#[derive(Clone, Debug)]
pub(crate) struct ProjectileState {
    pub(crate) id: ProjectileId,
    pub(crate) tower: TowerId,
    pub(crate) kind: TowerKind,
    pub(crate) position: Position,
    pub(crate) target: EnemyId,
    pub(crate) damage: u32,
}

impl ProjectileState {
    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            tower: self.tower,
            kind: self.kind.projectile_kind(),
            position: self.position,
            target: self.target,
            damage: self.damage,
            speed: self.kind.projectile_speed(),
            piercing: self.kind.pierces(),
            splash: self.kind.splashes(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct ProjectileRegistry {
    entries: BTreeMap<ProjectileId, ProjectileState>,
    next_projectile_id: ProjectileId,
}

impl ProjectileRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_projectile_id: ProjectileId::new(0),
        }
    }

    /// Launches a projectile from the firing tower's position.
    pub(crate) fn launch(
        &mut self,
        tower: TowerId,
        kind: TowerKind,
        position: Position,
        target: EnemyId,
        damage: u32,
    ) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().saturating_add(1));
        let _ = self.entries.insert(
            id,
            ProjectileState {
                id,
                tower,
                kind,
                position,
                target,
                damage,
            },
        );
        id
    }

    pub(crate) fn get_mut(&mut self, id: ProjectileId) -> Option<&mut ProjectileState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: ProjectileId) -> Option<ProjectileState> {
        self.entries.remove(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &ProjectileState> {
        self.entries.values()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
