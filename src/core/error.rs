//! Error types for the rules engine.
//!
//! Every failure is a `RulesError` variant. Variants are grouped into an
//! `ErrorKind` so callers can tell user mistakes (wrong phase, bad argument,
//! illegal move) apart from `InvariantViolation`s, which mean the engine's
//! own bookkeeping is broken.
//!
//! A rejected command leaves the engine exactly as it was before the call.

use crate::board::{LineId, PoolId};
use crate::core::phase::Phase;
use crate::tiles::{Color, Tile};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RulesError>;

/// Category of a `RulesError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Command issued in the wrong phase.
    Phase,
    /// Malformed argument: unknown color, line, pool, player or tile.
    Validation,
    /// Argument is well formed but conflicts with the current state.
    StateConflict,
    /// The chosen line cannot take any tile in the hand.
    IllegalMove,
    /// Internal bookkeeping is inconsistent. Indicates a bug, not user error.
    InvariantViolation,
}

impl ErrorKind {
    /// Returns a human-readable name for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Phase => "phase",
            Self::Validation => "validation",
            Self::StateConflict => "state-conflict",
            Self::IllegalMove => "illegal-move",
            Self::InvariantViolation => "invariant-violation",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All failures raised by the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// Command called outside the phase it belongs to.
    #[error("{action} is only allowed during {expected} (current phase: {actual})")]
    WrongPhase {
        /// The rejected command.
        action: &'static str,
        /// Phase the command requires.
        expected: Phase,
        /// Phase the game is in.
        actual: Phase,
    },

    /// Unknown color name.
    #[error("'{0}' is not a tile color (expected blue, yellow, red, black or white)")]
    InvalidColor(String),

    /// Unknown line name or index.
    #[error("'{0}' is not a line (expected line1..line5)")]
    InvalidLine(String),

    /// Pool id outside 0..=5.
    #[error("pool {0} does not exist (0 = overflow, 1-5 = satellites)")]
    InvalidPool(usize),

    /// Player number other than 1 or 2.
    #[error("player {0} does not exist (expected 1 or 2)")]
    InvalidPlayer(u8),

    /// A marker was offered where a colored tile is required.
    #[error("{0} is not a colored tile")]
    InvalidTile(Tile),

    /// Stacked draw order asks for more tiles of a color than the bag holds.
    #[error("draw order stacks {count} {color} tiles but the bag only holds {limit}")]
    InvalidDrawOrder {
        /// Over-requested color.
        color: Color,
        /// Number requested.
        count: usize,
        /// Tiles of that color in a full bag.
        limit: usize,
    },

    /// The pool holds no tiles of the requested color.
    #[error("{pool} holds no {color} tiles")]
    NoSuchTiles {
        /// Pool drafted from.
        pool: PoolId,
        /// Requested color.
        color: Color,
    },

    /// Draft attempted while a hand is still held.
    #[error("place the tiles in hand before drafting again")]
    HandNotEmpty,

    /// Placement attempted without a hand.
    #[error("draft tiles before placing them")]
    EmptyHand,

    /// Pool refill attempted before the round's tiles were all drafted.
    #[error("pools still hold tiles and cannot be refilled")]
    PoolNotEmpty,

    /// The supply's single marker was requested a second time.
    #[error("the first-player marker has already been released")]
    MarkerAlreadyTaken,

    /// Marker returned to an overflow pool that is not empty, or already holds it.
    #[error("the first-player marker can only return to an empty overflow pool")]
    MarkerNotReturnable,

    /// Marker requested from an overflow track that does not hold it.
    #[error("the overflow track does not hold the first-player marker")]
    MarkerNotFound,

    /// Lane already full.
    #[error("{0} is already full")]
    LaneFull(LineId),

    /// Lane locked to a different color than the offered tiles.
    #[error("{line} holds {locked} tiles and cannot take {offered}")]
    ColorMismatch {
        /// Target lane.
        line: LineId,
        /// Color the lane is locked to.
        locked: Color,
        /// Offending color.
        offered: Color,
    },

    /// No tile in the hand may go on the chosen line.
    #[error("no tile in hand can be placed on {line}")]
    IllegalMove {
        /// Rejected line.
        line: LineId,
    },

    /// A grid cell was filled twice.
    #[error("grid cell {row} column {column} is already filled")]
    CellOccupied {
        /// Grid row.
        row: LineId,
        /// Grid column (0-based).
        column: usize,
    },

    /// Round preparation found no holder for the first-player marker.
    #[error("neither overflow track holds the first-player marker")]
    NoMarkerHolder,
}

impl RulesError {
    /// Category of this error.
    pub const fn kind(&self) -> ErrorKind {
        use RulesError::*;
        match self {
            WrongPhase { .. } => ErrorKind::Phase,

            InvalidColor(_)
            | InvalidLine(_)
            | InvalidPool(_)
            | InvalidPlayer(_)
            | InvalidTile(_)
            | InvalidDrawOrder { .. }
            | NoSuchTiles { .. } => ErrorKind::Validation,

            HandNotEmpty
            | EmptyHand
            | PoolNotEmpty
            | MarkerAlreadyTaken
            | MarkerNotReturnable
            | MarkerNotFound => ErrorKind::StateConflict,

            LaneFull(_) | ColorMismatch { .. } | IllegalMove { .. } => ErrorKind::IllegalMove,

            CellOccupied { .. } | NoMarkerHolder => ErrorKind::InvariantViolation,
        }
    }

    /// True for errors that mean the game state can no longer be trusted.
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvariantViolation)
    }

    /// Stable identifier for logs and assertions.
    pub const fn code(&self) -> &'static str {
        use RulesError::*;
        match self {
            WrongPhase { .. } => "RULES_WRONG_PHASE",
            InvalidColor(_) => "RULES_INVALID_COLOR",
            InvalidLine(_) => "RULES_INVALID_LINE",
            InvalidPool(_) => "RULES_INVALID_POOL",
            InvalidPlayer(_) => "RULES_INVALID_PLAYER",
            InvalidTile(_) => "RULES_INVALID_TILE",
            InvalidDrawOrder { .. } => "RULES_INVALID_DRAW_ORDER",
            NoSuchTiles { .. } => "RULES_NO_SUCH_TILES",
            HandNotEmpty => "RULES_HAND_NOT_EMPTY",
            EmptyHand => "RULES_EMPTY_HAND",
            PoolNotEmpty => "RULES_POOL_NOT_EMPTY",
            MarkerAlreadyTaken => "RULES_MARKER_ALREADY_TAKEN",
            MarkerNotReturnable => "RULES_MARKER_NOT_RETURNABLE",
            MarkerNotFound => "RULES_MARKER_NOT_FOUND",
            LaneFull(_) => "RULES_LANE_FULL",
            ColorMismatch { .. } => "RULES_COLOR_MISMATCH",
            IllegalMove { .. } => "RULES_ILLEGAL_MOVE",
            CellOccupied { .. } => "RULES_CELL_OCCUPIED",
            NoMarkerHolder => "RULES_NO_MARKER_HOLDER",
        }
    }
}
