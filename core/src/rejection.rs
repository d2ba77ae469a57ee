//! Reasons the world may refuse an intent.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::GameStatus;

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The session is in a status that does not accept placements.
    #[error("towers cannot be placed while the game is {0:?}")]
    InvalidStatus(GameStatus),
    /// The requested cell lies outside the playfield.
    #[error("cell lies outside the playfield")]
    OutOfBounds,
    /// Another tower already occupies the cell.
    #[error("cell is already occupied by a tower")]
    Occupied,
    /// The cell overlaps the enemy path.
    #[error("cell overlaps the enemy path")]
    OnPath,
    /// The player has not unlocked the tower kind yet.
    #[error("tower kind is not unlocked")]
    Locked,
    /// The player cannot afford the dynamic price.
    #[error("placement costs {required} gold but only {available} is available")]
    InsufficientGold {
        /// Dynamic price of the placement.
        required: u32,
        /// Gold held by the player.
        available: u32,
    },
}

/// Reasons a tower upgrade request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum UpgradeError {
    /// The session is in a status that does not accept upgrades.
    #[error("towers cannot be upgraded while the game is {0:?}")]
    InvalidStatus(GameStatus),
    /// No tower with the provided identifier exists.
    #[error("tower does not exist")]
    MissingTower,
    /// The player cannot afford the dynamic upgrade price.
    #[error("upgrade costs {required} gold but only {available} is available")]
    InsufficientGold {
        /// Dynamic price of the upgrade.
        required: u32,
        /// Gold held by the player.
        available: u32,
    },
}

/// Reasons a special ability request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum AbilityError {
    /// The session is in a status that does not accept abilities.
    #[error("abilities cannot be used while the game is {0:?}")]
    InvalidStatus(GameStatus),
    /// The player cannot afford the ability.
    #[error("ability costs {required} gold but only {available} is available")]
    InsufficientGold {
        /// Cost of the ability.
        required: u32,
        /// Gold held by the player.
        available: u32,
    },
    /// The ability was used too recently.
    #[error("ability is ready in {remaining:?}")]
    CoolingDown {
        /// Time left on the cooldown.
        remaining: Duration,
    },
}

/// Reasons a status transition intent may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum TransitionError {
    /// The requested transition does not leave the current status.
    #[error("transition is not available while the game is {0:?}")]
    InvalidStatus(GameStatus),
}

/// Reasons a tower selection request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SelectionError {
    /// No tower with the provided identifier exists.
    #[error("tower does not exist")]
    MissingTower,
}
