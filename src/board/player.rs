//! Everything one player owns: staging lanes, scoring grid, overflow track
//! and score.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::ScoringGrid;
use super::ids::LineId;
use super::overflow::OverflowTrack;
use super::staging::StagingRack;
use crate::core::{Result, RulesError};
use crate::tiles::{Color, Tile};

/// Effect of staging a hand on one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Colored tiles that entered the lane.
    pub staged: u8,
    /// Tiles (marker included) sent to the overflow track.
    pub overflowed: u8,
}

/// Points from one round's tiling phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    /// Points scored by tiles moved to the grid.
    pub gained: u32,
    /// Overflow penalty applied (zero or negative).
    pub penalty: i32,
    /// Score after the round, never below zero.
    pub total: u32,
}

/// One player's side of the table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBoard {
    rack: StagingRack,
    grid: ScoringGrid,
    track: OverflowTrack,
    score: u32,
}

impl PlayerBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `color` may go on `line`: the lane accepts it and the grid row
    /// does not hold it yet.
    #[must_use]
    pub fn accepts(&self, line: LineId, color: Color) -> bool {
        self.rack.possible_colors(line).contains(&color)
            && self.grid.possible_colors(line).contains(&color)
    }

    /// True if `color` may go on at least one line.
    #[must_use]
    pub fn can_place(&self, color: Color) -> bool {
        LineId::all().any(|line| self.accepts(line, color))
    }

    /// Lines on which some colored tile of `hand` may go.
    #[must_use]
    pub fn legal_lines(&self, hand: &[Tile]) -> SmallVec<[LineId; 5]> {
        LineId::all()
            .filter(|&line| {
                hand.iter()
                    .filter_map(|t| t.color())
                    .any(|c| self.accepts(line, c))
            })
            .collect()
    }

    /// Stage `hand` on `line`, routing whatever does not fit to the track.
    pub fn stage(&mut self, hand: &[Tile], line: LineId) -> Result<Placement> {
        if self.legal_lines(hand).iter().all(|&l| l != line) {
            return Err(RulesError::IllegalMove { line });
        }
        let overflow = self.rack.place(hand, line)?;
        let colored_in = hand.iter().filter(|t| !t.is_marker()).count();
        let colored_out = overflow.iter().filter(|t| !t.is_marker()).count();
        let overflowed = overflow.len();
        self.track.add(overflow);
        Ok(Placement {
            staged: (colored_in - colored_out) as u8,
            overflowed: overflowed as u8,
        })
    }

    /// Send a whole hand to the overflow track.
    pub fn discard(&mut self, hand: &[Tile]) {
        self.track.add(hand.iter().copied());
    }

    /// Move every full lane's tile to the grid, then apply the overflow
    /// penalty. Lanes and track are left for `reset_for_round`.
    pub fn score_round(&mut self) -> Result<RoundScore> {
        let mut gained = 0;
        for line in LineId::all() {
            if let Some(tile) = self.rack.select_for_transfer(line) {
                gained += self.grid.place(tile, line)?;
            }
        }
        let penalty = self.track.penalty();
        let total = (i64::from(self.score) + i64::from(gained) + i64::from(penalty)).max(0);
        self.score = total as u32;
        Ok(RoundScore {
            gained,
            penalty,
            total: self.score,
        })
    }

    /// Clear the track and every transferred lane.
    pub fn reset_for_round(&mut self) {
        self.track.clear();
        self.rack.clear();
    }

    #[must_use]
    pub fn rack(&self) -> &StagingRack {
        &self.rack
    }

    #[must_use]
    pub fn grid(&self) -> &ScoringGrid {
        &self.grid
    }

    #[must_use]
    pub fn track(&self) -> &OverflowTrack {
        &self.track
    }

    pub(crate) fn track_mut(&mut self) -> &mut OverflowTrack {
        &mut self.track
    }

    #[cfg(test)]
    pub(crate) fn rack_mut(&mut self) -> &mut StagingRack {
        &mut self.rack
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }
}

impl std::fmt::Display for PlayerBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        write!(f, "{}", self.rack)?;
        write!(f, "{}", self.grid)?;
        writeln!(f, "{}", self.track)
    }
}
