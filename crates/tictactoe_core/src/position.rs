//! Board positions labelled by row letter and column digit.

use serde::{Deserialize, Serialize};

/// A cell on the 3x3 board, named `A1` (top-left) through `C3` (bottom-right).
///
/// Rows are lettered `A`-`C` top to bottom, columns numbered `1`-`3`
/// left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    /// Top-left.
    A1,
    /// Top-center.
    A2,
    /// Top-right.
    A3,
    /// Middle-left.
    B1,
    /// Center.
    B2,
    /// Middle-right.
    B3,
    /// Bottom-left.
    C1,
    /// Bottom-center.
    C2,
    /// Bottom-right.
    C3,
}

impl Position {
    /// All 9 positions in canonical order (row-major).
    pub const ALL: [Position; 9] = [
        Position::A1,
        Position::A2,
        Position::A3,
        Position::B1,
        Position::B2,
        Position::B3,
        Position::C1,
        Position::C2,
        Position::C3,
    ];

    /// The middle of the board.
    pub const CENTER: Position = Position::B2;

    /// Corners in the order the strategic AI prefers them.
    pub const CORNERS: [Position; 4] = [Position::A1, Position::A3, Position::C1, Position::C3];

    /// Edge midpoints in the order the strategic AI prefers them.
    pub const SIDES: [Position; 4] = [Position::A2, Position::B1, Position::B3, Position::C2];

    /// Parses a label such as `"b2"` or `"C3"`.
    ///
    /// Matching is case-insensitive. Anything other than a row letter
    /// followed by a column digit yields `None`; a bad label is never an error.
    pub fn parse(label: &str) -> Option<Position> {
        let mut chars = label.chars();
        let (row, col) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }

        let row = match row.to_ascii_uppercase() {
            'A' => 0,
            'B' => 1,
            'C' => 2,
            _ => return None,
        };
        let col = match col {
            '1' => 0,
            '2' => 1,
            '3' => 2,
            _ => return None,
        };

        Self::from_coords(row, col)
    }

    /// Creates a position from zero-based `(row, col)` coordinates.
    pub fn from_coords(row: usize, col: usize) -> Option<Position> {
        if row >= 3 || col >= 3 {
            return None;
        }
        Self::ALL.get(row * 3 + col).copied()
    }

    /// Zero-based row index.
    pub fn row(self) -> usize {
        self.index() / 3
    }

    /// Zero-based column index.
    pub fn col(self) -> usize {
        self.index() % 3
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical upper-case label.
    pub fn label(self) -> &'static str {
        match self {
            Position::A1 => "A1",
            Position::A2 => "A2",
            Position::A3 => "A3",
            Position::B1 => "B1",
            Position::B2 => "B2",
            Position::B3 => "B3",
            Position::C1 => "C1",
            Position::C2 => "C2",
            Position::C3 => "C3",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
