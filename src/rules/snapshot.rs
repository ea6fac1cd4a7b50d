//! Read-only pictures of the game for display layers.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::outcome::MarkerLocation;
use crate::board::{GridCells, Lane, PlayerBoard, LINE_COUNT, TRACK_CAPACITY};
use crate::core::{Phase, PlayerId, PlayerMap};
use crate::tiles::Tile;

/// One player's board at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Staging lanes, `line1` first.
    pub lanes: [Lane; LINE_COUNT],
    /// Scoring grid, `[row][column]`.
    pub grid: GridCells,
    /// Overflow track, newest tile first.
    pub track: [Option<Tile>; TRACK_CAPACITY],
    /// Penalty the track would cost right now.
    pub penalty: i32,
    pub score: u32,
}

impl From<&PlayerBoard> for PlayerSnapshot {
    fn from(board: &PlayerBoard) -> Self {
        Self {
            lanes: board.rack().snapshot(),
            grid: board.grid().snapshot(),
            track: board.track().snapshot(),
            penalty: board.track().penalty(),
            score: board.score(),
        }
    }
}

/// The whole table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub current_player: PlayerId,
    /// Rounds completed.
    pub rounds_played: u32,
    pub moves_this_round: u32,
    pub moves_this_game: u32,
    /// Tiles drafted but not yet placed.
    pub hand: Vector<Tile>,
    /// Pool contents indexed by pool number; index 0 is the overflow pool.
    pub pools: Vector<Vector<Tile>>,
    pub players: PlayerMap<PlayerSnapshot>,
    pub marker: MarkerLocation,
}

impl GameSnapshot {
    /// Snapshot of one player's board.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerSnapshot {
        &self.players[player]
    }
}
