use super::{validate_ranges, BingoError, ColumnRange, CENTER, GRID};
use crate::rng::RandomSource;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Number(u8),
    Free,
}

impl Cell {
    pub fn number(self) -> Option<u8> {
        match self {
            Cell::Number(n) => Some(n),
            Cell::Free => None,
        }
    }
}

/// Set of marked card coordinates, one bit per cell (`col * 5 + row`).
///
/// A fresh set already holds the free cell. Marks are only ever added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkedSet(u32);

impl MarkedSet {
    const fn bit(col: usize, row: usize) -> u32 {
        1 << (col * GRID + row)
    }

    pub const fn new() -> Self {
        Self(Self::bit(CENTER, CENTER))
    }

    pub fn mark(&mut self, col: usize, row: usize) {
        if col < GRID && row < GRID {
            self.0 |= Self::bit(col, row);
        }
    }

    pub fn is_marked(&self, col: usize, row: usize) -> bool {
        col < GRID && row < GRID && self.0 & Self::bit(col, row) != 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Marked coordinates as `(col, row)`, column-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..GRID * GRID).filter(|i| self.0 & (1 << i) != 0).map(|i| (i / GRID, i % GRID))
    }
}

impl Default for MarkedSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A 5×5 card stored column-major: `columns[col][row]`.
///
/// Column `c` holds five distinct numbers from its range; the centre is
/// always [`Cell::Free`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BingoCard {
    columns: [[Cell; GRID]; GRID],
}

impl BingoCard {
    /// Draw five distinct values per column, uniformly and without
    /// replacement, then free the centre.
    ///
    /// ```
    /// use bingo_poker::bingo::{BingoCard, BingoUniverse, Cell};
    /// use bingo_poker::rng::RngSource;
    ///
    /// let ranges = BingoUniverse::standard().columns();
    /// let card = BingoCard::generate(&ranges, &mut RngSource::seeded(5)).unwrap();
    /// assert_eq!(card.cell(2, 2), Some(Cell::Free));
    /// ```
    pub fn generate<S>(ranges: &[ColumnRange; GRID], rng: &mut S) -> Result<Self, BingoError>
    where
        S: RandomSource + ?Sized,
    {
        validate_ranges(ranges)?;
        let mut columns = [[Cell::Free; GRID]; GRID];
        for (col, range) in ranges.iter().enumerate() {
            let mut pool: Vec<u8> = (range.min..=range.max).collect();
            // Partial Fisher–Yates: only the first GRID slots are needed.
            let last = pool.len() - 1;
            for i in 0..GRID {
                let j = i + rng.uniform_index(last - i)?;
                pool.swap(i, j);
            }
            for (row, &n) in pool[..GRID].iter().enumerate() {
                columns[col][row] = Cell::Number(n);
            }
        }
        columns[CENTER][CENTER] = Cell::Free;
        Ok(Self { columns })
    }

    /// Build a card from explicit numbers, validating them against `ranges`.
    /// The centre value is ignored and replaced by the free cell.
    pub fn from_columns(
        numbers: [[u8; GRID]; GRID],
        ranges: &[ColumnRange; GRID],
    ) -> Result<Self, BingoError> {
        validate_ranges(ranges)?;
        let mut columns = [[Cell::Free; GRID]; GRID];
        for (col, values) in numbers.iter().enumerate() {
            let range = ranges[col];
            for (row, &n) in values.iter().enumerate() {
                if (col, row) == (CENTER, CENTER) {
                    continue;
                }
                if !range.contains(n) {
                    return Err(BingoError::OutOfRange {
                        column: col,
                        number: n,
                        min: range.min,
                        max: range.max,
                    });
                }
                if columns[col][..row].contains(&Cell::Number(n)) {
                    return Err(BingoError::DuplicateNumber { column: col, number: n });
                }
                columns[col][row] = Cell::Number(n);
            }
        }
        Ok(Self { columns })
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        self.columns.get(col).and_then(|c| c.get(row)).copied()
    }

    pub fn column(&self, col: usize) -> Option<&[Cell; GRID]> {
        self.columns.get(col)
    }

    /// Coordinates of `number`, if the card holds it.
    pub fn position_of(&self, number: u8) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(col, cells)| {
            cells.iter().position(|&c| c == Cell::Number(number)).map(|row| (col, row))
        })
    }

    pub fn contains(&self, number: u8) -> bool {
        self.position_of(number).is_some()
    }

    /// Every number on the card, column-major, free cell skipped.
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.columns.iter().flat_map(|c| c.iter().filter_map(|cell| cell.number()))
    }

    /// Mark the cell holding `number`, returning its coordinates.
    pub fn mark(&self, number: u8, marked: &mut MarkedSet) -> Option<(usize, usize)> {
        let pos = self.position_of(number)?;
        marked.mark(pos.0, pos.1);
        Some(pos)
    }
}

impl fmt::Display for BingoCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID {
            for col in 0..GRID {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match self.columns[col][row] {
                    Cell::Number(n) => write!(f, "{n:>2}")?,
                    Cell::Free => f.write_str("**")?,
                }
            }
            if row + 1 < GRID {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
