use super::{MarkedSet, GRID};
use std::fmt;

/// One of the twelve lines that complete a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinPattern {
    Row(u8),
    Column(u8),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

/// Pattern family used as a pay-table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternKind {
    Row,
    Column,
    Diagonal,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [PatternKind::Row, PatternKind::Column, PatternKind::Diagonal];

    pub const fn label(self) -> &'static str {
        match self {
            PatternKind::Row => "Row",
            PatternKind::Column => "Column",
            PatternKind::Diagonal => "Diagonal",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl WinPattern {
    /// Detection order: rows, then columns, then both diagonals.
    pub const ALL: [WinPattern; 12] = [
        WinPattern::Row(0),
        WinPattern::Row(1),
        WinPattern::Row(2),
        WinPattern::Row(3),
        WinPattern::Row(4),
        WinPattern::Column(0),
        WinPattern::Column(1),
        WinPattern::Column(2),
        WinPattern::Column(3),
        WinPattern::Column(4),
        WinPattern::Diagonal,
        WinPattern::AntiDiagonal,
    ];

    pub const fn kind(self) -> PatternKind {
        match self {
            WinPattern::Row(_) => PatternKind::Row,
            WinPattern::Column(_) => PatternKind::Column,
            WinPattern::Diagonal | WinPattern::AntiDiagonal => PatternKind::Diagonal,
        }
    }

    /// The five `(col, row)` coordinates of the line.
    pub fn cells(self) -> [(usize, usize); GRID] {
        std::array::from_fn(|i| match self {
            WinPattern::Row(r) => (i, r as usize),
            WinPattern::Column(c) => (c as usize, i),
            WinPattern::Diagonal => (i, i),
            WinPattern::AntiDiagonal => (i, GRID - 1 - i),
        })
    }

    pub fn is_complete(self, marked: &MarkedSet) -> bool {
        self.cells().iter().all(|&(c, r)| marked.is_marked(c, r))
    }
}

impl fmt::Display for WinPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WinPattern::Row(r) => write!(f, "row {}", r + 1),
            WinPattern::Column(c) => write!(f, "column {}", super::COLUMN_LETTERS[*c as usize]),
            WinPattern::Diagonal => f.write_str("diagonal"),
            WinPattern::AntiDiagonal => f.write_str("anti-diagonal"),
        }
    }
}

/// Every completed line, in detection order.
pub fn winning_patterns(marked: &MarkedSet) -> Vec<WinPattern> {
    WinPattern::ALL.iter().copied().filter(|p| p.is_complete(marked)).collect()
}

pub fn has_win(marked: &MarkedSet) -> bool {
    WinPattern::ALL.iter().any(|p| p.is_complete(marked))
}
