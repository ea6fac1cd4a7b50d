//! The rules engine facade.
//!
//! `RoundEngine` sequences everything: drafting, placement, forced moves and
//! the automatic end-of-round sequence. Callers only ever issue `draft` and
//! `place` and read state back through queries or a `GameSnapshot`.

pub mod engine;
pub mod outcome;
pub mod snapshot;

pub use engine::RoundEngine;
pub use outcome::{DraftOutcome, GameResult, MarkerLocation, TurnEnd};
pub use snapshot::{GameSnapshot, PlayerSnapshot};
