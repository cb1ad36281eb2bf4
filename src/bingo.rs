//! 5×5 bingo over a `1..=N` universe split into five B-I-N-G-O columns.

pub mod card;
pub mod draw;
pub mod pattern;
pub mod round;

pub use card::{BingoCard, Cell, MarkedSet};
pub use draw::DrawSequence;
pub use pattern::{has_win, winning_patterns, PatternKind, WinPattern};

use crate::rng::RngError;
use std::fmt;

/// Width and height of a card.
pub const GRID: usize = 5;
/// Column and row of the free cell.
pub const CENTER: usize = 2;
pub const COLUMN_LETTERS: [char; GRID] = ['B', 'I', 'N', 'G', 'O'];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BingoError {
    #[error("universe size {0} must be a positive multiple of 5 with at least 5 numbers per column")]
    InvalidUniverse(u16),
    #[error("column {column} range {min}..={max} is invalid")]
    InvalidRange { column: usize, min: u8, max: u8 },
    #[error("column {column} range {min}..={max} holds fewer than 5 numbers")]
    ColumnTooNarrow { column: usize, min: u8, max: u8 },
    #[error("column ranges {0} and {1} overlap")]
    OverlappingRanges(usize, usize),
    #[error("number {number} in column {column} is outside {min}..={max}")]
    OutOfRange { column: usize, number: u8, min: u8, max: u8 },
    #[error("number {number} repeats in column {column}")]
    DuplicateNumber { column: usize, number: u8 },
    #[error("all {size} numbers have been drawn")]
    DrawUniverseExhausted { size: u8 },
    #[error(transparent)]
    Rng(#[from] RngError),
}

/// Inclusive number range feeding one card column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub min: u8,
    pub max: u8,
}

impl ColumnRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, n: u8) -> bool {
        (self.min..=self.max).contains(&n)
    }

    pub fn len(&self) -> usize {
        if self.max < self.min {
            0
        } else {
            (self.max - self.min) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn overlaps(&self, other: &ColumnRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Check a set of column ranges can produce a card of distinct numbers.
pub fn validate_ranges(ranges: &[ColumnRange; GRID]) -> Result<(), BingoError> {
    for (column, r) in ranges.iter().enumerate() {
        if r.min == 0 || r.max < r.min {
            return Err(BingoError::InvalidRange { column, min: r.min, max: r.max });
        }
        if r.len() < GRID {
            return Err(BingoError::ColumnTooNarrow { column, min: r.min, max: r.max });
        }
    }
    for a in 0..GRID {
        for b in (a + 1)..GRID {
            if ranges[a].overlaps(&ranges[b]) {
                return Err(BingoError::OverlappingRanges(a, b));
            }
        }
    }
    Ok(())
}

/// The numbers `1..=N` a round draws from.
///
/// ```
/// use bingo_poker::bingo::{BingoUniverse, ColumnRange};
///
/// let u = BingoUniverse::standard();
/// assert_eq!(u.columns()[0], ColumnRange::new(1, 15));
/// assert_eq!(u.columns()[4], ColumnRange::new(61, 75));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BingoUniverse {
    size: u8,
}

impl BingoUniverse {
    pub const STANDARD_SIZE: u8 = 75;

    pub fn new(size: u16) -> Result<Self, BingoError> {
        let valid = size % GRID as u16 == 0 && size >= (GRID * GRID) as u16 && size <= 250;
        if !valid {
            return Err(BingoError::InvalidUniverse(size));
        }
        Ok(Self { size: size as u8 })
    }

    pub fn standard() -> Self {
        Self { size: Self::STANDARD_SIZE }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn contains(&self, n: u8) -> bool {
        (1..=self.size).contains(&n)
    }

    /// Five equal-width ranges: B gets `1..=N/5`, I the next N/5, and so on.
    pub fn columns(&self) -> [ColumnRange; GRID] {
        let width = self.size / GRID as u8;
        std::array::from_fn(|c| {
            let min = c as u8 * width + 1;
            ColumnRange::new(min, min + width - 1)
        })
    }

    /// Column a number belongs to, if it is in the universe.
    pub fn column_of(&self, n: u8) -> Option<usize> {
        self.contains(n).then(|| (n as usize - 1) / (self.size as usize / GRID))
    }

    /// Ball call label such as `B7` or `O61`.
    pub fn call_label(&self, n: u8) -> Option<String> {
        self.column_of(n).map(|c| format!("{}{}", COLUMN_LETTERS[c], n))
    }
}

impl Default for BingoUniverse {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universe_size_rules() {
        assert!(BingoUniverse::new(75).is_ok());
        assert!(BingoUniverse::new(90).is_ok());
        assert_eq!(BingoUniverse::new(74), Err(BingoError::InvalidUniverse(74)));
        assert_eq!(BingoUniverse::new(20), Err(BingoError::InvalidUniverse(20)));
        assert_eq!(BingoUniverse::new(0), Err(BingoError::InvalidUniverse(0)));
        assert_eq!(BingoUniverse::new(300), Err(BingoError::InvalidUniverse(300)));
    }

    #[test]
    fn columns_partition_the_universe() {
        let u = BingoUniverse::new(90).unwrap();
        let cols = u.columns();
        assert_eq!(cols[0], ColumnRange::new(1, 18));
        assert_eq!(cols[4], ColumnRange::new(73, 90));
        for n in 1..=90u8 {
            let c = u.column_of(n).unwrap();
            assert!(cols[c].contains(n));
        }
        assert_eq!(u.column_of(0), None);
        assert_eq!(u.column_of(91), None);
    }

    #[test]
    fn call_labels() {
        let u = BingoUniverse::standard();
        assert_eq!(u.call_label(7).as_deref(), Some("B7"));
        assert_eq!(u.call_label(31).as_deref(), Some("N31"));
        assert_eq!(u.call_label(75).as_deref(), Some("O75"));
        assert_eq!(u.call_label(76), None);
    }

    #[test]
    fn range_validation() {
        let mut ranges = BingoUniverse::standard().columns();
        assert_eq!(validate_ranges(&ranges), Ok(()));

        ranges[1] = ColumnRange::new(16, 19);
        assert!(matches!(validate_ranges(&ranges), Err(BingoError::ColumnTooNarrow { column: 1, .. })));

        ranges[1] = ColumnRange::new(10, 30);
        assert_eq!(validate_ranges(&ranges), Err(BingoError::OverlappingRanges(0, 1)));

        ranges[1] = ColumnRange::new(0, 30);
        assert!(matches!(validate_ranges(&ranges), Err(BingoError::InvalidRange { column: 1, .. })));
    }
}
