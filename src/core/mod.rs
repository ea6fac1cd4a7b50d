//! Core engine types: players, RNG, configuration, phases, history, errors.

pub mod player;
pub mod rng;
pub mod config;
pub mod phase;
pub mod action;
pub mod error;

pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::GameConfig;
pub use phase::Phase;
pub use action::{MoveKind, MoveRecord};
pub use error::{ErrorKind, Result, RulesError};
