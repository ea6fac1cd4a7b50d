//! The tile bag and the first-player marker.
//!
//! The bag holds 100 colored tiles (20 per color) in shuffled order. When it
//! runs dry it silently refills to a fresh 100; tiles already on the table
//! are not counted against it, so a long game may see more than 100 tiles.
//!
//! The marker is not kept in the bag. The supply releases it exactly once.

use tracing::debug;

use super::tile::{Color, Tile, COLOR_COUNT};
use crate::core::{GameRng, Result, RulesError};

/// Tiles of each color in a full bag.
pub const TILES_PER_COLOR: usize = 20;

/// Tiles in a full bag.
pub const BAG_SIZE: usize = TILES_PER_COLOR * COLOR_COUNT;

/// Shuffle-backed source of colored tiles.
#[derive(Clone, Debug)]
pub struct TileSupply {
    /// Remaining tiles; the next draw is the last element.
    bag: Vec<Color>,
    rng: GameRng,
    marker_released: bool,
    refills: u32,
}

impl TileSupply {
    /// Create a full, shuffled bag.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        let mut supply = Self {
            bag: Vec::with_capacity(BAG_SIZE),
            rng,
            marker_released: false,
            refills: 0,
        };
        supply.fill();
        supply
    }

    /// Create a full bag whose first draws are `order`, in order.
    ///
    /// The rest of the bag is shuffled beneath the stacked tiles. Fails if
    /// `order` asks for more than 20 tiles of one color.
    pub fn stacked(rng: GameRng, order: &[Color]) -> Result<Self> {
        let mut counts = [0usize; COLOR_COUNT];
        for color in order {
            counts[color.index()] += 1;
        }
        if let Some(color) = Color::ALL
            .into_iter()
            .find(|c| counts[c.index()] > TILES_PER_COLOR)
        {
            return Err(RulesError::InvalidDrawOrder {
                color,
                count: counts[color.index()],
                limit: TILES_PER_COLOR,
            });
        }

        let mut bag: Vec<Color> = Color::ALL
            .into_iter()
            .flat_map(|c| std::iter::repeat(c).take(TILES_PER_COLOR - counts[c.index()]))
            .collect();
        let mut rng = rng;
        rng.shuffle(&mut bag);
        bag.extend(order.iter().rev());

        Ok(Self {
            bag,
            rng,
            marker_released: false,
            refills: 0,
        })
    }

    fn fill(&mut self) {
        self.bag.clear();
        for color in Color::ALL {
            self.bag.extend(std::iter::repeat(color).take(TILES_PER_COLOR));
        }
        self.rng.shuffle(&mut self.bag);
    }

    /// Draw one tile. Refills the bag first if it is empty; never fails.
    pub fn draw(&mut self) -> Color {
        loop {
            if let Some(color) = self.bag.pop() {
                return color;
            }
            self.fill();
            self.refills += 1;
            debug!(refills = self.refills, "tile bag refilled");
        }
    }

    /// Release the first-player marker. Only succeeds once per supply.
    pub fn take_marker(&mut self) -> Result<Tile> {
        if self.marker_released {
            return Err(RulesError::MarkerAlreadyTaken);
        }
        self.marker_released = true;
        Ok(Tile::Marker)
    }

    /// Tiles left in the current bag.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }

    /// Tiles drawn from the current bag.
    #[must_use]
    pub fn drawn(&self) -> usize {
        BAG_SIZE - self.bag.len()
    }

    /// How many times the bag has been refilled.
    #[must_use]
    pub fn refills(&self) -> u32 {
        self.refills
    }

    /// True once the marker has been handed out.
    #[must_use]
    pub fn marker_released(&self) -> bool {
        self.marker_released
    }
}

impl std::fmt::Display for TileSupply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TileSupply: {} tiles, marker {}",
            self.remaining(),
            if self.marker_released { "released" } else { "held" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bag_is_full() {
        let supply = TileSupply::new(GameRng::new(1));
        assert_eq!(supply.remaining(), BAG_SIZE);
        assert_eq!(supply.drawn(), 0);
    }

    #[test]
    fn test_drawn_plus_remaining_is_constant() {
        let mut supply = TileSupply::new(GameRng::new(1));
        for _ in 0..37 {
            supply.draw();
            assert_eq!(supply.drawn() + supply.remaining(), BAG_SIZE);
        }
        assert_eq!(supply.drawn(), 37);
    }

    #[test]
    fn test_full_bag_composition() {
        let mut supply = TileSupply::new(GameRng::new(3));
        let mut counts = [0usize; COLOR_COUNT];
        for _ in 0..BAG_SIZE {
            counts[supply.draw().index()] += 1;
        }
        assert_eq!(counts, [TILES_PER_COLOR; COLOR_COUNT]);
        assert_eq!(supply.remaining(), 0);
    }

    #[test]
    fn test_refills_when_empty() {
        let mut supply = TileSupply::new(GameRng::new(3));
        for _ in 0..BAG_SIZE {
            supply.draw();
        }
        supply.draw();
        assert_eq!(supply.refills(), 1);
        assert_eq!(supply.remaining(), BAG_SIZE - 1);
    }

    #[test]
    fn test_stacked_draws_come_first() {
        let order = [Color::Blue, Color::Blue, Color::Blue, Color::Yellow, Color::Red];
        let mut supply = TileSupply::stacked(GameRng::new(5), &order).unwrap();

        assert_eq!(supply.remaining(), BAG_SIZE);
        let drawn: Vec<_> = (0..order.len()).map(|_| supply.draw()).collect();
        assert_eq!(drawn, order);
    }

    #[test]
    fn test_stacked_bag_keeps_composition() {
        let order = [Color::White; 20];
        let mut supply = TileSupply::stacked(GameRng::new(5), &order).unwrap();
        let mut counts = [0usize; COLOR_COUNT];
        for _ in 0..BAG_SIZE {
            counts[supply.draw().index()] += 1;
        }
        assert_eq!(counts, [TILES_PER_COLOR; COLOR_COUNT]);
    }

    #[test]
    fn test_stacked_rejects_too_many_of_a_color() {
        let order = [Color::Red; 21];
        let err = TileSupply::stacked(GameRng::new(5), &order).unwrap_err();
        assert_eq!(
            err,
            RulesError::InvalidDrawOrder {
                color: Color::Red,
                count: 21,
                limit: TILES_PER_COLOR,
            }
        );
    }

    #[test]
    fn test_marker_released_once() {
        let mut supply = TileSupply::new(GameRng::new(1));
        assert_eq!(supply.take_marker(), Ok(Tile::Marker));
        assert!(supply.marker_released());
        assert_eq!(supply.take_marker(), Err(RulesError::MarkerAlreadyTaken));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = TileSupply::new(GameRng::new(11));
        let mut b = TileSupply::new(GameRng::new(11));
        for _ in 0..150 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
