//! Move records for game history.
//!
//! Every command that changes the board is appended to the engine's history
//! as a `MoveRecord`. Forced discards are recorded too, so the history is a
//! complete account of where each hand went.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::{LineId, PoolId};
use crate::tiles::Color;

/// What happened in a single recorded step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Tiles of `color` taken from `pool` into the hand.
    Draft {
        /// Source pool.
        pool: PoolId,
        /// Drafted color.
        color: Color,
        /// Colored tiles taken.
        taken: u8,
        /// Whether the first-player marker came along.
        marker: bool,
    },
    /// Hand committed to a staging lane.
    Place {
        /// Target lane.
        line: LineId,
        /// Tiles that landed in the lane.
        staged: u8,
        /// Tiles routed to the overflow track.
        overflowed: u8,
    },
    /// Unplayable hand dumped to the overflow track.
    Forced {
        /// Tiles routed to the overflow track.
        discarded: u8,
    },
}

/// A recorded step with metadata for history tracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who acted.
    pub player: PlayerId,

    /// What they did.
    pub kind: MoveKind,

    /// Round number (0-based) when the step was taken.
    pub round: u32,

    /// Sequence number within the round (for ordering).
    pub sequence: u32,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(player: PlayerId, kind: MoveKind, round: u32, sequence: u32) -> Self {
        Self {
            player,
            kind,
            round,
            sequence,
        }
    }

    /// True if this step ended the player's turn.
    #[must_use]
    pub fn ends_turn(&self) -> bool {
        !matches!(self.kind, MoveKind::Draft { .. })
    }
}
