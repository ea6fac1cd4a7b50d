//! What the engine reports back after a command, and how a game ends.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Equal scores.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// How a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEnd {
    /// Pools still hold tiles; this player moves next.
    NextPlayer(PlayerId),
    /// The round was scored and a new one prepared.
    NextRound {
        /// Rounds completed so far.
        round: u32,
        /// Player opening the new round.
        starter: PlayerId,
    },
    /// A grid row was completed during tiling.
    GameOver(GameResult),
}

/// Result of a draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftOutcome {
    /// The tiles are in hand, waiting for `place`.
    Held {
        /// Colored tiles drafted.
        taken: u8,
        /// Whether the marker came along.
        marker: bool,
    },
    /// No line could take the tiles; they went to the overflow track and the
    /// turn is over.
    Forced(TurnEnd),
}

/// Where the first-player marker currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerLocation {
    /// Not yet released by the tile supply.
    Supply,
    /// In the overflow pool.
    Pool,
    /// In the current hand of this player.
    Hand(PlayerId),
    /// On this player's overflow track.
    Track(PlayerId),
}

impl MarkerLocation {
    /// Player owning the marker, if any.
    #[must_use]
    pub fn holder(self) -> Option<PlayerId> {
        match self {
            MarkerLocation::Hand(p) | MarkerLocation::Track(p) => Some(p),
            MarkerLocation::Supply | MarkerLocation::Pool => None,
        }
    }
}
