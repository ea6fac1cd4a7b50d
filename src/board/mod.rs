//! Table components: the shared draft pools and each player's board.

pub mod ids;
pub mod draft;
pub mod staging;
pub mod grid;
pub mod overflow;
pub mod player;

pub use ids::{LineId, PoolId, LINE_COUNT, SATELLITE_COUNT};
pub use draft::{DraftPool, Hand, SATELLITE_SIZE};
pub use staging::{Lane, LaneState, StagingRack};
pub use grid::{GridCells, ScoringGrid, GRID_SIZE};
pub use overflow::{OverflowTrack, PENALTY, TRACK_CAPACITY};
pub use player::{Placement, PlayerBoard, RoundScore};
