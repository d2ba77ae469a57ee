//! Authoritative enemy state management utilities.

use std::collections::BTreeMap;

use siege_core::{EffectApplication, EnemyEffect, EnemyId, EnemyKind, EnemySnapshot, Position};

#[derive(Clone, Debug)]
pub(crate) struct EnemyState {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) position: Position,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) speed: f32,
    pub(crate) reward: u32,
    pub(crate) path_index: usize,
    pub(crate) effects: Vec<EnemyEffect>,
    pub(crate) armor: u32,
    pub(crate) flying: bool,
}

impl EnemyState {
    /// Attaches the effect, or extends the duration of an attached effect of the same kind.
    pub(crate) fn apply_effect(&mut self, application: EffectApplication) {
        match self
            .effects
            .iter_mut()
            .find(|effect| effect.kind == application.kind)
        {
            Some(existing) => {
                existing.remaining = existing.remaining.max(application.duration);
            }
            None => self.effects.push(EnemyEffect::new(
                application.kind,
                application.duration,
                application.strength,
            )),
        }
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            health: self.health,
            max_health: self.max_health,
            speed: self.speed,
            reward: self.reward,
            path_index: self.path_index,
            effects: self.effects.clone(),
            armor: self.armor,
            flying: self.flying,
        }
    }
}

/// Health of an enemy spawned on the provided level.
pub(crate) fn scaled_health(kind: EnemyKind, level: u32) -> u32 {
    let multiplier = 1.0 + f64::from(level.saturating_sub(1)) * 0.2;
    (f64::from(kind.stats().health) * multiplier).floor() as u32
}

#[derive(Debug)]
pub(crate) struct EnemyRegistry {
    entries: BTreeMap<EnemyId, EnemyState>,
    next_enemy_id: EnemyId,
}

impl EnemyRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_enemy_id: EnemyId::new(0),
        }
    }

    /// Creates an enemy of the kind at the provided location.
    pub(crate) fn spawn(&mut self, kind: EnemyKind, position: Position, level: u32) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));

        let stats = kind.stats();
        let health = scaled_health(kind, level).max(1);
        let _ = self.entries.insert(
            id,
            EnemyState {
                id,
                kind,
                position,
                health,
                max_health: health,
                speed: stats.speed,
                reward: stats.reward,
                path_index: 0,
                effects: Vec::new(),
                armor: stats.armor,
                flying: stats.flying,
            },
        );
        id
    }

    pub(crate) fn get_mut(&mut self, id: EnemyId) -> Option<&mut EnemyState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn contains(&self, id: EnemyId) -> bool {
        self.entries.contains_key(&id)
    }

    pub(crate) fn remove(&mut self, id: EnemyId) -> Option<EnemyState> {
        self.entries.remove(&id)
    }

    pub(crate) fn ids(&self) -> Vec<EnemyId> {
        self.entries.keys().copied().collect()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &EnemyState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut EnemyState> {
        self.entries.values_mut()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
