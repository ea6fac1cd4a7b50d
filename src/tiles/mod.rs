//! Tiles and the tile supply.
//!
//! - `Color`: the five tile colors
//! - `Tile`: a colored tile or the first-player marker
//! - `TileSupply`: the shuffled bag plus the one-shot marker

pub mod tile;
pub mod supply;

pub use tile::{Color, Tile, COLOR_COUNT};
pub use supply::{TileSupply, BAG_SIZE, TILES_PER_COLOR};
