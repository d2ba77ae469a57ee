//! Authoritative tower state management utilities.

use std::{collections::BTreeMap, time::Duration};

use siege_core::{CellCoord, EnemyId, Position, TowerId, TowerKind, TowerSnapshot};

/// Snapshot of a tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Cell occupied by the tower.
    pub(crate) cell: CellCoord,
    pub(crate) level: u32,
    pub(crate) damage: u32,
    pub(crate) range: u32,
    pub(crate) attack_interval: Duration,
    /// Gold spent on placement and upgrades.
    pub(crate) cost: u32,
    pub(crate) last_attack: Duration,
    pub(crate) kills: u32,
    pub(crate) target: Option<EnemyId>,
}

impl TowerState {
    fn new(id: TowerId, kind: TowerKind, cell: CellCoord, cost: u32) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            cell,
            level: 1,
            damage: stats.damage,
            range: stats.range,
            attack_interval: Duration::from_millis(u64::from(stats.attack_interval_ms)),
            cost,
            last_attack: Duration::ZERO,
            kills: 0,
            target: None,
        }
    }

    /// Centre of the occupied cell.
    pub(crate) fn position(&self) -> Position {
        self.cell.center()
    }

    /// Raises the tower one level and scales its combat statistics.
    pub(crate) fn upgrade(&mut self, price: u32) {
        self.level = self.level.saturating_add(1);
        self.damage = scale_floor(self.damage, 1.4);
        self.range = scale_floor(self.range, 1.1);
        let interval_ms = u32::try_from(self.attack_interval.as_millis()).unwrap_or(u32::MAX);
        self.attack_interval = Duration::from_millis(u64::from(scale_floor(interval_ms, 0.85)));
        self.cost = self.cost.saturating_add(price);
    }

    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            position: self.position(),
            level: self.level,
            damage: self.damage,
            range: self.range,
            attack_interval: self.attack_interval,
            cost: self.cost,
            last_attack: self.last_attack,
            kills: self.kills,
            target: self.target,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Inserts a freshly placed tower and returns its identifier.
    pub(crate) fn insert(&mut self, kind: TowerKind, cell: CellCoord, cost: u32) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let _ = self
            .entries
            .insert(id, TowerState::new(id, kind, cell, cost));
        id
    }

    pub(crate) fn get(&self, id: TowerId) -> Option<&TowerState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn contains(&self, id: TowerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Reports whether any tower occupies the provided cell.
    pub(crate) fn occupies(&self, cell: CellCoord) -> bool {
        self.entries.values().any(|tower| tower.cell == cell)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

fn scale_floor(value: u32, factor: f64) -> u32 {
    (f64::from(value) * factor).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_starts_empty_with_zero_identifier() {
        let registry = TowerRegistry::new();
        assert!(registry.entries.is_empty());
        assert_eq!(registry.next_tower_id.get(), 0);
    }

    #[test]
    fn identifiers_increase_with_each_placement() {
        let mut registry = TowerRegistry::new();
        let first = registry.insert(TowerKind::Basic, CellCoord::new(0, 0), 20);
        let second = registry.insert(TowerKind::Cannon, CellCoord::new(1, 0), 45);
        assert!(first < second);
        assert!(registry.occupies(CellCoord::new(1, 0)));
        assert!(!registry.occupies(CellCoord::new(2, 0)));
    }

    #[test]
    fn upgrade_scales_statistics() {
        let mut registry = TowerRegistry::new();
        let id = registry.insert(TowerKind::Basic, CellCoord::new(0, 0), 20);
        let tower = registry.get_mut(id).expect("tower exists");
        tower.upgrade(15);

        assert_eq!(tower.level, 2);
        assert_eq!(tower.damage, 35);
        assert_eq!(tower.range, 88);
        assert_eq!(tower.attack_interval, Duration::from_millis(850));
        assert_eq!(tower.cost, 35);
    }

    #[test]
    fn snapshot_reports_cell_centre() {
        let mut registry = TowerRegistry::new();
        let id = registry.insert(TowerKind::Ice, CellCoord::new(2, 1), 35);
        let snapshot = registry.get(id).expect("tower exists").snapshot();
        assert_eq!(snapshot.position, Position::new(100.0, 60.0));
        assert_eq!(snapshot.target, None);
    }
}
