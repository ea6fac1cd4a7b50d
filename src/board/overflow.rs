//! Per-player overflow (penalty) track.
//!
//! Seven slots. Tiles that do not fit anywhere else land here and cost
//! points at the end of the round according to a fixed curve. Tiles beyond
//! the seventh are discarded; the first-player marker is the exception and
//! always keeps a slot.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Result, RulesError};
use crate::tiles::Tile;

/// Slots on the track.
pub const TRACK_CAPACITY: usize = 7;

/// Penalty by number of occupied slots.
pub const PENALTY: [i32; TRACK_CAPACITY + 1] = [0, -1, -2, -4, -6, -8, -11, -14];

/// One player's overflow track.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowTrack {
    /// Newest tile first.
    tiles: VecDeque<Tile>,
    discarded: u32,
}

impl OverflowTrack {
    /// An empty track.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add tiles in order and return how many were discarded.
    ///
    /// A full track discards further colored tiles. The marker is never
    /// discarded: on a full track it replaces the newest colored tile.
    pub fn add<I>(&mut self, tiles: I) -> usize
    where
        I: IntoIterator<Item = Tile>,
    {
        let mut dropped = 0;
        for tile in tiles {
            if self.tiles.len() < TRACK_CAPACITY {
                self.tiles.push_front(tile);
                continue;
            }
            if tile.is_marker() {
                if let Some(pos) = self.tiles.iter().position(|t| !t.is_marker()) {
                    self.tiles.remove(pos);
                    self.tiles.push_front(tile);
                }
            }
            dropped += 1;
        }
        if dropped > 0 {
            self.discarded += dropped as u32;
            warn!(dropped, total = self.discarded, "overflow track full, tiles discarded");
        }
        dropped
    }

    /// Points lost for the current occupancy. Never positive.
    #[must_use]
    pub fn penalty(&self) -> i32 {
        PENALTY[self.tiles.len()]
    }

    /// Occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True when no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// True if the first-player marker sits on this track.
    #[must_use]
    pub fn has_marker(&self) -> bool {
        self.tiles.iter().any(|t| t.is_marker())
    }

    /// Remove and return the marker.
    pub fn take_marker(&mut self) -> Result<Tile> {
        let pos = self
            .tiles
            .iter()
            .position(|t| t.is_marker())
            .ok_or(RulesError::MarkerNotFound)?;
        self.tiles.remove(pos).ok_or(RulesError::MarkerNotFound)
    }

    /// Empty every slot. The discard counter is kept.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Slot contents, newest first, empty slots last.
    #[must_use]
    pub fn snapshot(&self) -> [Option<Tile>; TRACK_CAPACITY] {
        std::array::from_fn(|i| self.tiles.get(i).copied())
    }

    /// Tiles discarded beyond capacity over the whole game.
    #[must_use]
    pub fn discarded(&self) -> u32 {
        self.discarded
    }
}

impl std::fmt::Display for OverflowTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots: Vec<String> = self
            .snapshot()
            .iter()
            .map(|s| s.map_or_else(|| "[ ]".to_string(), |t| t.to_string()))
            .collect();
        write!(f, "Overflow: {} ({})", slots.join(" "), self.penalty())
    }
}
