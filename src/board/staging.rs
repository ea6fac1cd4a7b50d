//! Per-player staging lanes.
//!
//! Lane `n` holds up to `n` tiles of a single color. Tiles enter from the
//! right-hand end and shift left, so a lane is full once its leftmost slot is
//! occupied. At the end of a round a full lane gives up its rightmost tile to
//! the scoring grid; lanes that did so are wiped by `clear`, partly filled
//! lanes carry over to the next round untouched.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::draft::Hand;
use super::ids::{LineId, LINE_COUNT};
use crate::core::{Result, RulesError};
use crate::tiles::{Color, Tile};

/// Color lock of a lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneState {
    /// No tiles; any color may start the lane.
    Empty,
    /// Partly filled with this color.
    Locked(Color),
    /// At capacity. Stays full until `clear`, even after the transfer tile leaves.
    Full(Color),
}

/// One staging lane. Also serves as its own read-only snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    slots: SmallVec<[Option<Color>; LINE_COUNT]>,
    state: LaneState,
}

impl Lane {
    fn new(capacity: usize) -> Self {
        Self {
            slots: SmallVec::from_elem(None, capacity),
            state: LaneState::Empty,
        }
    }

    /// Slot contents, left to right.
    #[must_use]
    pub fn slots(&self) -> &[Option<Color>] {
        &self.slots
    }

    /// Current color lock.
    #[must_use]
    pub fn state(&self) -> LaneState {
        self.state
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True once the lane reached capacity this round.
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self.state, LaneState::Full(_))
    }

    /// Colors this lane would still accept.
    #[must_use]
    pub fn possible_colors(&self) -> SmallVec<[Color; 5]> {
        match self.state {
            LaneState::Empty => SmallVec::from_slice(&Color::ALL),
            LaneState::Locked(c) => SmallVec::from_slice(&[c]),
            LaneState::Full(_) => SmallVec::new(),
        }
    }

    fn has_room(&self) -> bool {
        self.slots[0].is_none()
    }

    fn push(&mut self, color: Color) {
        self.slots.remove(0);
        self.slots.push(Some(color));
        self.state = if self.has_room() {
            LaneState::Locked(color)
        } else {
            LaneState::Full(color)
        };
    }
}

/// The five lanes of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingRack {
    lanes: [Lane; LINE_COUNT],
}

impl StagingRack {
    /// Five empty lanes with capacities 1 through 5.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lanes: std::array::from_fn(|i| Lane::new(i + 1)),
        }
    }

    /// Stage a hand on `line` and return the tiles that did not fit.
    ///
    /// Colored tiles fill the lane until it is full; the rest overflow.
    /// The marker always overflows. Rejects a full lane, and any colored tile
    /// that differs from the lane's color (or from the hand's first color on
    /// an empty lane), before anything is staged.
    pub fn place(&mut self, hand: &[Tile], line: LineId) -> Result<Hand> {
        let lane = &self.lanes[line.index()];
        if lane.is_full() {
            return Err(RulesError::LaneFull(line));
        }

        let expected = match lane.state {
            LaneState::Locked(c) => Some(c),
            _ => hand.iter().find_map(|t| t.color()),
        };
        if let Some(locked) = expected {
            if let Some(offered) = hand.iter().filter_map(|t| t.color()).find(|&c| c != locked) {
                return Err(RulesError::ColorMismatch {
                    line,
                    locked,
                    offered,
                });
            }
        }

        let lane = &mut self.lanes[line.index()];
        let mut overflow = Hand::new();
        for &tile in hand {
            match tile {
                Tile::Colored(color) if lane.has_room() => lane.push(color),
                other => overflow.push(other),
            }
        }
        Ok(overflow)
    }

    /// True if `line` is full.
    #[must_use]
    pub fn is_complete(&self, line: LineId) -> bool {
        self.lanes[line.index()].is_full()
    }

    /// Colors `line` would accept.
    #[must_use]
    pub fn possible_colors(&self, line: LineId) -> SmallVec<[Color; 5]> {
        self.lanes[line.index()].possible_colors()
    }

    /// Pop the rightmost tile of a full lane for the grid.
    ///
    /// Incomplete lanes (and lanes already emptied this round) yield `None`.
    pub fn select_for_transfer(&mut self, line: LineId) -> Option<Tile> {
        let lane = &mut self.lanes[line.index()];
        if !lane.is_full() {
            return None;
        }
        lane.slots.last_mut().and_then(Option::take).map(Tile::Colored)
    }

    /// Reset every lane whose rightmost slot is empty.
    pub fn clear(&mut self) {
        for lane in &mut self.lanes {
            if lane.slots.last().is_some_and(Option::is_none) {
                *lane = Lane::new(lane.capacity());
            }
        }
    }

    /// Read-only view of one lane.
    #[must_use]
    pub fn lane(&self, line: LineId) -> &Lane {
        &self.lanes[line.index()]
    }

    /// Copy of every lane, top to bottom.
    #[must_use]
    pub fn snapshot(&self) -> [Lane; LINE_COUNT] {
        self.lanes.clone()
    }

    /// Colored tiles currently staged.
    #[must_use]
    pub fn staged_tiles(&self) -> usize {
        self.lanes.iter().map(Lane::filled).sum()
    }
}

impl Default for StagingRack {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StagingRack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Staging lanes:")?;
        for (line, lane) in LineId::all().zip(&self.lanes) {
            let pad = LINE_COUNT - lane.capacity();
            let cells: Vec<String> = lane
                .slots
                .iter()
                .map(|s| s.map_or_else(|| "[ ]".to_string(), |c| Tile::Colored(c).to_string()))
                .collect();
            writeln!(f, "{line}: {}{}", "    ".repeat(pad), cells.join(" "))?;
        }
        Ok(())
    }
}
