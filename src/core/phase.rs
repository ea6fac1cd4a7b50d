//! Game phases.

use serde::{Deserialize, Serialize};

/// Phase of the round state machine.
///
/// `Tiling` and `Preparing` only exist while the engine is running its
/// end-of-round sequence. Between commands callers observe `Drafting`
/// or `GameOver`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players take tiles from the pools and stage them.
    Drafting,
    /// Completed lanes move to the scoring grid.
    Tiling,
    /// Marker returns, boards reset and pools refill.
    Preparing,
    /// Terminal.
    GameOver,
}

impl Phase {
    /// Public ordinal (1-4) used by presentation layers.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Phase::Drafting => 1,
            Phase::Tiling => 2,
            Phase::Preparing => 3,
            Phase::GameOver => 4,
        }
    }

    /// Stable upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Drafting => "DRAFTING",
            Phase::Tiling => "TILING",
            Phase::Preparing => "PREPARING",
            Phase::GameOver => "GAMEOVER",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
