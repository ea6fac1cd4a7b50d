//! # azul-rules
//!
//! Rules engine for a two-player tile-drafting game.
//!
//! Players take turns drafting every tile of one color from a shared pool
//! and staging them on one of five lanes. When the pools run dry, each full
//! lane moves one tile onto the player's scoring grid, adjacent tiles score,
//! and tiles that did not fit cost points on the overflow track. The game
//! ends after the round in which someone completes a grid row.
//!
//! ## Design Principles
//!
//! 1. **Typed Commands**: pools, lines, colors and players are validated
//!    newtypes; a command holding them can only fail on game state.
//!
//! 2. **No Partial Moves**: a rejected command leaves the engine exactly as
//!    it was.
//!
//! 3. **Deterministic**: one seed (plus an optional stacked draw order)
//!    fixes the whole tile stream.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, phases, move history, errors
//! - `tiles`: colors, tiles and the tile supply
//! - `board`: draft pools, staging lanes, scoring grid, overflow track
//! - `rules`: the `RoundEngine` state machine and its snapshots
//!
//! ## Example
//!
//! ```
//! use azul_rules::{DraftOutcome, GameConfig, LineId, PoolId, RoundEngine, TurnEnd};
//! use azul_rules::tiles::Color;
//!
//! let config = GameConfig::new(7)
//!     .with_draw_order([Color::Blue, Color::Blue, Color::Blue, Color::Yellow]);
//! let mut engine = RoundEngine::new(config)?;
//!
//! let pool = PoolId::new(1)?;
//! let outcome = engine.draft(pool, "blue".parse()?)?;
//! assert_eq!(outcome, DraftOutcome::Held { taken: 3, marker: false });
//!
//! let end = engine.place("line3".parse::<LineId>()?)?;
//! assert!(matches!(end, TurnEnd::NextPlayer(_)));
//! # Ok::<(), azul_rules::RulesError>(())
//! ```

pub mod core;
pub mod tiles;
pub mod board;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ErrorKind, GameConfig, GameRng, MoveKind, MoveRecord, Phase, PlayerId, PlayerMap, Result,
    RulesError,
};

pub use crate::tiles::{Color, Tile, TileSupply};

pub use crate::board::{
    DraftPool, Lane, LaneState, LineId, OverflowTrack, PlayerBoard, PoolId, ScoringGrid,
    StagingRack,
};

pub use crate::rules::{
    DraftOutcome, GameResult, GameSnapshot, MarkerLocation, PlayerSnapshot, RoundEngine, TurnEnd,
};
