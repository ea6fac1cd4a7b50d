//! Validated identifiers for lines and pools.
//!
//! Both are constructed through fallible constructors or `FromStr`, so a
//! `LineId` or `PoolId` held anywhere in the engine is always in range.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::{Result, RulesError};

/// Number of staging lanes per player, and rows in the scoring grid.
pub const LINE_COUNT: usize = 5;

/// Number of satellite pools.
pub const SATELLITE_COUNT: usize = 5;

/// One of the five lines: a staging lane and the grid row it feeds.
///
/// Lane `n` (1-based) has capacity `n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineId(u8);

impl LineId {
    /// `line1`, capacity 1.
    pub const FIRST: LineId = LineId(0);
    /// `line5`, capacity 5.
    pub const LAST: LineId = LineId(LINE_COUNT as u8 - 1);

    /// Line from a 0-based index.
    pub fn new(index: usize) -> Result<Self> {
        if index < LINE_COUNT {
            Ok(LineId(index as u8))
        } else {
            Err(RulesError::InvalidLine(index.to_string()))
        }
    }

    /// 0-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based number, as in `line3`.
    #[must_use]
    pub const fn number(self) -> usize {
        self.0 as usize + 1
    }

    /// Capacity of the staging lane on this line.
    #[must_use]
    pub const fn capacity(self) -> usize {
        self.number()
    }

    /// All lines, top to bottom.
    pub fn all() -> impl Iterator<Item = LineId> {
        (0..LINE_COUNT as u8).map(LineId)
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line{}", self.number())
    }
}

impl FromStr for LineId {
    type Err = RulesError;

    /// Parses `line1` .. `line5`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RulesError::InvalidLine(s.to_string());
        let digits = s
            .trim()
            .strip_prefix("line")
            .ok_or_else(invalid)?;
        let number: usize = digits.parse().map_err(|_| invalid())?;
        if number == 0 {
            return Err(invalid());
        }
        LineId::new(number - 1).map_err(|_| invalid())
    }
}

/// A draft source: 0 is the shared overflow pool, 1-5 are satellites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PoolId(u8);

impl PoolId {
    /// The shared overflow pool.
    pub const OVERFLOW: PoolId = PoolId(0);

    /// Pool from its public number (0-5).
    pub fn new(id: usize) -> Result<Self> {
        if id <= SATELLITE_COUNT {
            Ok(PoolId(id as u8))
        } else {
            Err(RulesError::InvalidPool(id))
        }
    }

    /// Public number (0-5).
    #[must_use]
    pub const fn number(self) -> usize {
        self.0 as usize
    }

    /// True for pool 0.
    #[must_use]
    pub const fn is_overflow(self) -> bool {
        self.0 == 0
    }

    /// 0-based satellite slot, `None` for the overflow pool.
    #[must_use]
    pub const fn satellite_index(self) -> Option<usize> {
        if self.is_overflow() {
            None
        } else {
            Some(self.0 as usize - 1)
        }
    }

    /// Every pool, overflow first.
    pub fn all() -> impl Iterator<Item = PoolId> {
        (0..=SATELLITE_COUNT as u8).map(PoolId)
    }

    /// The five satellite pools.
    pub fn satellites() -> impl Iterator<Item = PoolId> {
        (1..=SATELLITE_COUNT as u8).map(PoolId)
    }
}

impl std::fmt::Display for PoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_overflow() {
            f.write_str("overflow pool")
        } else {
            write!(f, "pool {}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_bounds() {
        assert_eq!(LineId::new(0), Ok(LineId::FIRST));
        assert_eq!(LineId::new(4), Ok(LineId::LAST));
        assert_eq!(LineId::new(5), Err(RulesError::InvalidLine("5".to_string())));
        assert_eq!(LineId::all().count(), LINE_COUNT);
    }

    #[test]
    fn test_line_capacity() {
        let caps: Vec<_> = LineId::all().map(LineId::capacity).collect();
        assert_eq!(caps, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_line_parse() {
        assert_eq!("line1".parse::<LineId>(), Ok(LineId::FIRST));
        assert_eq!("line5".parse::<LineId>(), Ok(LineId::LAST));
        assert_eq!(
            "line0".parse::<LineId>(),
            Err(RulesError::InvalidLine("line0".to_string()))
        );
        assert_eq!(
            "line6".parse::<LineId>(),
            Err(RulesError::InvalidLine("line6".to_string()))
        );
        assert!("row2".parse::<LineId>().is_err());
        assert_eq!(LineId::LAST.to_string(), "line5");
    }

    #[test]
    fn test_pool_ids() {
        assert_eq!(PoolId::new(0), Ok(PoolId::OVERFLOW));
        assert!(PoolId::new(5).is_ok());
        assert_eq!(PoolId::new(6), Err(RulesError::InvalidPool(6)));
        assert_eq!(PoolId::OVERFLOW.satellite_index(), None);
        assert_eq!(PoolId::new(3).unwrap().satellite_index(), Some(2));
        assert_eq!(PoolId::all().count(), 6);
        assert_eq!(PoolId::satellites().count(), SATELLITE_COUNT);
    }

    #[test]
    fn test_pool_display() {
        assert_eq!(PoolId::OVERFLOW.to_string(), "overflow pool");
        assert_eq!(PoolId::new(2).unwrap().to_string(), "pool 2");
    }
}
