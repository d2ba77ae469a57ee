//! Aggregate game state: economy, progression and player bookkeeping.

use std::time::Duration;

use siege_core::{
    AbilityKind, AbilityState, Achievement, AchievementId, CellCoord, Difficulty, Event,
    GameSnapshot, GameStatus, SpawnCursor, TowerId, TowerKind,
};
use tracing::info;

/// Experience needed per player level before the next level is reached.
const EXPERIENCE_PER_LEVEL: u32 = 200;

/// Gold granted every time the player gains a level.
const LEVEL_UP_BONUS: u32 = 100;

#[derive(Clone, Debug)]
pub(crate) struct Session {
    pub(crate) gold: u32,
    pub(crate) lives: u32,
    pub(crate) wave: u32,
    pub(crate) level: u32,
    pub(crate) score: u64,
    pub(crate) status: GameStatus,
    pub(crate) difficulty: Difficulty,
    pub(crate) experience: u32,
    pub(crate) player_level: u32,
    pub(crate) unlocked_towers: Vec<TowerKind>,
    pub(crate) achievements: Vec<Achievement>,
    pub(crate) abilities: [AbilityState; 4],
    pub(crate) selected_tower: Option<TowerId>,
    pub(crate) hovered_cell: Option<CellCoord>,
    pub(crate) clock: Duration,
    pub(crate) lives_lost_this_level: u32,
    pub(crate) spawn_cursor: SpawnCursor,
}

impl Session {
    pub(crate) fn new(starting_gold: u32, starting_lives: u32) -> Self {
        Self {
            gold: starting_gold,
            lives: starting_lives,
            wave: 1,
            level: 1,
            score: 0,
            status: GameStatus::Preparing,
            difficulty: Difficulty::Normal,
            experience: 0,
            player_level: 1,
            unlocked_towers: TowerKind::STARTER.to_vec(),
            achievements: AchievementId::ALL.map(Achievement::new).to_vec(),
            abilities: AbilityKind::ALL.map(AbilityState::new),
            selected_tower: None,
            hovered_cell: None,
            clock: Duration::ZERO,
            lives_lost_this_level: 0,
            spawn_cursor: SpawnCursor::default(),
        }
    }

    pub(crate) fn set_status(&mut self, to: GameStatus, out_events: &mut Vec<Event>) {
        let from = self.status;
        if from == to {
            return;
        }
        self.status = to;
        info!(?from, ?to, "status changed");
        out_events.push(Event::StatusChanged { from, to });
    }

    pub(crate) fn earn_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Adds achievement progress and grants the reward when the target is reached.
    pub(crate) fn advance_achievement(
        &mut self,
        id: AchievementId,
        amount: u32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(achievement) = self
            .achievements
            .iter_mut()
            .find(|achievement| achievement.id == id)
        else {
            return;
        };

        if let Some(reward) = achievement.advance(amount) {
            self.gold = self.gold.saturating_add(reward);
            info!(achievement = id.name(), reward, "achievement unlocked");
            out_events.push(Event::AchievementUnlocked {
                achievement: id,
                reward,
            });
        }
    }

    /// Adds experience, resolving every level-up it pays for.
    pub(crate) fn gain_experience(
        &mut self,
        amount: u32,
        max_player_level: u32,
        out_events: &mut Vec<Event>,
    ) {
        self.experience = self.experience.saturating_add(amount);

        loop {
            let threshold = self.player_level.saturating_mul(EXPERIENCE_PER_LEVEL);
            if self.experience < threshold || self.player_level >= max_player_level {
                break;
            }

            self.experience -= threshold;
            self.player_level += 1;
            self.gold = self.gold.saturating_add(LEVEL_UP_BONUS);

            let unlocked: Vec<TowerKind> = TowerKind::ALL
                .into_iter()
                .filter(|kind| kind.stats().unlock_level <= self.player_level)
                .filter(|kind| !self.unlocked_towers.contains(kind))
                .collect();
            self.unlocked_towers.extend_from_slice(&unlocked);

            info!(level = self.player_level, ?unlocked, "player levelled up");
            out_events.push(Event::PlayerLeveledUp {
                level: self.player_level,
                unlocked,
            });
        }
    }

    pub(crate) fn ability_mut(&mut self, kind: AbilityKind) -> &mut AbilityState {
        &mut self.abilities[kind.index()]
    }

    pub(crate) fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            gold: self.gold,
            lives: self.lives,
            wave: self.wave,
            level: self.level,
            score: self.score,
            status: self.status,
            difficulty: self.difficulty,
            experience: self.experience,
            player_level: self.player_level,
            unlocked_towers: self.unlocked_towers.clone(),
            achievements: self.achievements.clone(),
            abilities: self.abilities.to_vec(),
            selected_tower: self.selected_tower,
            hovered_cell: self.hovered_cell,
            clock: self.clock,
        }
    }
}
