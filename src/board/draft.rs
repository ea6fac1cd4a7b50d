//! The shared draft area: five satellite pools and the overflow pool.
//!
//! Satellites are filled with four tiles each at the start of every round.
//! Drafting from a satellite takes every tile of one color and pushes the
//! rest into the overflow pool. Drafting from the overflow pool takes every
//! tile of one color plus the first-player marker if it is still there.

use im::Vector;
use smallvec::SmallVec;
use tracing::debug;

use super::ids::{PoolId, SATELLITE_COUNT};
use crate::core::{Result, RulesError};
use crate::tiles::{Color, Tile, TileSupply};

/// Tiles per satellite after a refill.
pub const SATELLITE_SIZE: usize = 4;

/// Tiles drafted and not yet placed. At most 16 colored tiles plus the marker.
pub type Hand = SmallVec<[Tile; 16]>;

/// Satellites plus overflow, backed by the tile supply.
#[derive(Clone, Debug)]
pub struct DraftPool {
    supply: TileSupply,
    satellites: [SmallVec<[Color; SATELLITE_SIZE]>; SATELLITE_COUNT],
    overflow: Vec<Tile>,
}

impl DraftPool {
    /// Fill the satellites and put the supply's marker in the overflow pool.
    pub fn new(supply: TileSupply) -> Result<Self> {
        let mut pool = Self {
            supply,
            satellites: Default::default(),
            overflow: Vec::new(),
        };
        pool.reset()?;
        let marker = pool.supply.take_marker()?;
        pool.overflow.push(marker);
        Ok(pool)
    }

    /// True when nothing is left to draft.
    ///
    /// An overflow pool holding only the marker still counts as empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let overflow_clear = matches!(self.overflow.as_slice(), [] | [Tile::Marker]);
        overflow_clear && self.satellites.iter().all(|s| s.is_empty())
    }

    /// Refill every satellite with four tiles from the supply.
    pub fn reset(&mut self) -> Result<()> {
        if !self.is_empty() {
            return Err(RulesError::PoolNotEmpty);
        }
        for satellite in &mut self.satellites {
            for _ in 0..SATELLITE_SIZE {
                satellite.push(self.supply.draw());
            }
        }
        debug!(bag_remaining = self.supply.remaining(), "satellite pools refilled");
        Ok(())
    }

    /// Snapshot of a pool's contents.
    #[must_use]
    pub fn show(&self, pool: PoolId) -> Vector<Tile> {
        match pool.satellite_index() {
            None => self.overflow.iter().copied().collect(),
            Some(i) => self.satellites[i].iter().copied().map(Tile::Colored).collect(),
        }
    }

    /// Take every tile of `color` from `pool`.
    ///
    /// From the overflow pool the marker comes along if present. From a
    /// satellite the remaining tiles move to the overflow pool. Fails without
    /// touching the pools if no tile of `color` is there.
    pub fn take(&mut self, pool: PoolId, color: Color) -> Result<Hand> {
        let hand: Hand = match pool.satellite_index() {
            None => self
                .overflow
                .iter()
                .copied()
                .filter(|t| t.is(color) || t.is_marker())
                .collect(),
            Some(i) => self.satellites[i]
                .iter()
                .copied()
                .filter(|&c| c == color)
                .map(Tile::Colored)
                .collect(),
        };

        if !hand.iter().any(|t| t.is(color)) {
            return Err(RulesError::NoSuchTiles { pool, color });
        }

        match pool.satellite_index() {
            None => self.overflow.retain(|t| !(t.is(color) || t.is_marker())),
            Some(i) => {
                let leftovers = std::mem::take(&mut self.satellites[i]);
                self.overflow
                    .extend(leftovers.into_iter().filter(|&c| c != color).map(Tile::Colored));
            }
        }

        Ok(hand)
    }

    /// Put the marker back into an empty overflow pool for the next round.
    pub fn return_marker(&mut self, tile: Tile) -> Result<()> {
        if !tile.is_marker() {
            return Err(RulesError::InvalidTile(tile));
        }
        if !self.overflow.is_empty() {
            return Err(RulesError::MarkerNotReturnable);
        }
        self.overflow.push(tile);
        Ok(())
    }

    /// True if the marker is waiting in the overflow pool.
    #[must_use]
    pub fn has_marker(&self) -> bool {
        self.overflow.contains(&Tile::Marker)
    }

    /// Distinct colors that can be drafted from `pool`, in canonical order.
    #[must_use]
    pub fn colors_in(&self, pool: PoolId) -> SmallVec<[Color; 5]> {
        let present = self.show(pool);
        Color::ALL
            .into_iter()
            .filter(|&c| present.iter().any(|t| t.is(c)))
            .collect()
    }

    /// Colored tiles left across all pools.
    #[must_use]
    pub fn colored_tiles(&self) -> usize {
        let satellites: usize = self.satellites.iter().map(|s| s.len()).sum();
        satellites + self.overflow.iter().filter(|t| !t.is_marker()).count()
    }

    /// The backing supply.
    #[must_use]
    pub fn supply(&self) -> &TileSupply {
        &self.supply
    }
}

impl std::fmt::Display for DraftPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for pool in PoolId::satellites().chain(std::iter::once(PoolId::OVERFLOW)) {
            let tiles: Vec<String> = self.show(pool).iter().map(Tile::to_string).collect();
            writeln!(f, "{:<14} {}", format!("{pool}:"), tiles.join(" "))?;
        }
        Ok(())
    }
}
