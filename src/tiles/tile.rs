//! Tile colors and the tile sum type.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::board::LineId;
use crate::core::{Result, RulesError};

/// Number of tile colors.
pub const COLOR_COUNT: usize = 5;

/// Tile colors (order fixed: it defines the first grid row).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue = 0,
    Yellow = 1,
    Red = 2,
    Black = 3,
    White = 4,
}

impl Color {
    /// All colors in canonical order.
    pub const ALL: [Color; COLOR_COUNT] = [
        Color::Blue,
        Color::Yellow,
        Color::Red,
        Color::Black,
        Color::White,
    ];

    /// Position in `Color::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name, as accepted by `FromStr`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Black => "black",
            Color::White => "white",
        }
    }

    /// Grid column this color occupies in `row`.
    ///
    /// The first row is the identity mapping; each following row shifts every
    /// color one column to the left, wrapping around. The 5x5 grid is
    /// therefore a Latin square.
    #[must_use]
    pub const fn grid_column(self, row: LineId) -> usize {
        (self.index() + COLOR_COUNT - row.index()) % COLOR_COUNT
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self> {
        Color::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RulesError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<Tile> for Color {
    type Error = RulesError;

    fn try_from(tile: Tile) -> Result<Self> {
        tile.color().ok_or(RulesError::InvalidTile(tile))
    }
}

impl TryFrom<&Tile> for Color {
    type Error = RulesError;

    fn try_from(tile: &Tile) -> Result<Self> {
        Color::try_from(*tile)
    }
}

/// A tile on the table.
///
/// Equality is by variant and color: a colored tile never equals the marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    /// One of the 100 colored tiles.
    Colored(Color),
    /// The single first-player marker. Never placed on a lane or grid.
    Marker,
}

impl Tile {
    /// Color of a colored tile, `None` for the marker.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Tile::Colored(c) => Some(c),
            Tile::Marker => None,
        }
    }

    /// True for the first-player marker.
    #[must_use]
    pub const fn is_marker(self) -> bool {
        matches!(self, Tile::Marker)
    }

    /// True if this is a colored tile of `color`.
    #[must_use]
    pub fn is(self, color: Color) -> bool {
        self.color() == Some(color)
    }
}

impl From<Color> for Tile {
    fn from(color: Color) -> Self {
        Tile::Colored(color)
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tile::Colored(c) => write!(f, "[{c}]"),
            Tile::Marker => f.write_str("[first]"),
        }
    }
}
