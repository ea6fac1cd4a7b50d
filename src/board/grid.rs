//! Per-player 5x5 scoring grid.
//!
//! Each row admits every color exactly once, at a column fixed by
//! `Color::grid_column`. Cells are write-once for the whole game.
//!
//! ## Scoring
//!
//! A tile placed at (row, col) scores from two sweeps:
//! - horizontal: filled cells from `col` rightward to the first gap
//! - vertical: filled cells downward from `row`, plus upward above it,
//!   each direction stopping at the first gap
//!
//! An isolated tile scores 1; if only one sweep is longer than 1 it scores
//! that sweep; otherwise it scores the sum of both.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::error;

use super::ids::LineId;
use crate::core::{Result, RulesError};
use crate::tiles::{Color, Tile};

/// Rows and columns of the grid.
pub const GRID_SIZE: usize = 5;

/// Grid contents indexed `[row][column]`.
pub type GridCells = [[Option<Color>; GRID_SIZE]; GRID_SIZE];

/// One player's scoring grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringGrid {
    cells: GridCells,
}

impl ScoringGrid {
    /// An empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors not yet placed in `row`.
    #[must_use]
    pub fn possible_colors(&self, row: LineId) -> SmallVec<[Color; 5]> {
        let cells = &self.cells[row.index()];
        Color::ALL
            .into_iter()
            .filter(|c| !cells.contains(&Some(*c)))
            .collect()
    }

    /// Place a colored tile on `row` and return the points it scores.
    ///
    /// An occupied target cell means a lane was allowed to complete with a
    /// color the row already holds; that is reported as an invariant violation.
    pub fn place(&mut self, tile: Tile, row: LineId) -> Result<u32> {
        let color = Color::try_from(tile)?;
        let column = color.grid_column(row);
        let cell = &mut self.cells[row.index()][column];
        if cell.is_some() {
            error!(%row, column, %color, "grid cell filled twice");
            return Err(RulesError::CellOccupied { row, column });
        }
        *cell = Some(color);
        Ok(self.score_at(row.index(), column))
    }

    fn score_at(&self, row: usize, column: usize) -> u32 {
        let filled = |r: usize, c: usize| self.cells[r][c].is_some();

        let horizontal = (column..GRID_SIZE).take_while(|&c| filled(row, c)).count();
        let below = (row..GRID_SIZE).take_while(|&r| filled(r, column)).count();
        let above = (0..row).rev().take_while(|&r| filled(r, column)).count();
        let vertical = below + above;

        let points = match (horizontal, vertical) {
            (1, 1) => 1,
            (1, v) => v,
            (h, 1) => h,
            (h, v) => h + v,
        };
        points as u32
    }

    /// True once any row is completely filled (the game-over signal).
    #[must_use]
    pub fn is_row_complete(&self) -> bool {
        self.cells.iter().any(|row| row.iter().all(Option::is_some))
    }

    /// Contents of a single cell.
    #[must_use]
    pub fn cell(&self, row: LineId, column: usize) -> Option<Color> {
        self.cells[row.index()].get(column).copied().flatten()
    }

    /// Copy of the whole grid.
    #[must_use]
    pub fn snapshot(&self) -> GridCells {
        self.cells
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl std::fmt::Display for ScoringGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid:")?;
        for row in &self.cells {
            let cells: Vec<String> = row
                .iter()
                .map(|c| c.map_or_else(|| "[ ]".to_string(), |c| Tile::Colored(c).to_string()))
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
