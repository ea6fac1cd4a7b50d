//! Game configuration.
//!
//! Rules are fixed (no variants); configuration only controls the tile
//! stream: the RNG seed, and optionally a stacked draw order that the supply
//! yields before its shuffled remainder.

use serde::{Deserialize, Serialize};

use crate::tiles::Color;

/// Complete game configuration.
///
/// ```
/// use azul_rules::core::GameConfig;
/// use azul_rules::tiles::Color;
///
/// let config = GameConfig::new(42)
///     .with_draw_order([Color::Blue, Color::Blue, Color::Blue, Color::Yellow]);
/// assert_eq!(config.seed, 42);
/// assert_eq!(config.draw_order.len(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for every shuffle of the tile bag.
    pub seed: u64,

    /// Tiles the first bag yields in order before its shuffled remainder.
    ///
    /// Satellite pools are filled in order (pool 1 first, four tiles each),
    /// so the first 20 entries fix the opening pools.
    pub draw_order: Vec<Color>,
}

impl GameConfig {
    /// Create a configuration with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            draw_order: Vec::new(),
        }
    }

    /// Create a configuration seeded from OS entropy.
    #[must_use]
    pub fn random() -> Self {
        Self::new(rand::random())
    }

    /// Stack the bag so these tiles are drawn first.
    #[must_use]
    pub fn with_draw_order(mut self, order: impl IntoIterator<Item = Color>) -> Self {
        self.draw_order = order.into_iter().collect();
        self
    }

    /// Replace the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
