//! Square definitions for the 8x8 board.
//!
//! Squares are indexed `rank * 8 + file` with a1 = 0 and h8 = 63, so a
//! square can be used directly as an index into the board's placement array.

use std::fmt;

/// The number of squares on the board.
pub const SQUARE_COUNT: usize = 64;

/// File letters in index order.
const FILE_CHARS: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square::at(0, 0);
    pub const C1: Square = Square::at(2, 0);
    pub const D1: Square = Square::at(3, 0);
    pub const E1: Square = Square::at(4, 0);
    pub const F1: Square = Square::at(5, 0);
    pub const G1: Square = Square::at(6, 0);
    pub const H1: Square = Square::at(7, 0);
    pub const A8: Square = Square::at(0, 7);
    pub const C8: Square = Square::at(2, 7);
    pub const D8: Square = Square::at(3, 7);
    pub const E8: Square = Square::at(4, 7);
    pub const F8: Square = Square::at(5, 7);
    pub const G8: Square = Square::at(6, 7);
    pub const H8: Square = Square::at(7, 7);

    /// Builds a square from zero-based file and rank. Both must be below 8.
    pub const fn at(file: u8, rank: u8) -> Square {
        Square(rank * 8 + file)
    }

    /// Builds a square from zero-based file and rank, or None if off the board.
    pub fn new(file: i8, rank: i8) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::at(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Builds a square from its array index.
    pub fn from_index(idx: usize) -> Option<Square> {
        if idx < SQUARE_COUNT {
            Some(Square(idx as u8))
        } else {
            None
        }
    }

    /// Parses a square from its algebraic name, e.g. `e4`.
    pub fn from_name(name: &str) -> Option<Square> {
        let mut chars = name.chars();
        let file = file_from_char(chars.next()?)?;
        let rank = rank_from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Square::at(file, rank))
    }

    /// Returns the array index of this square.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Zero-based file (0 = a).
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Zero-based rank (0 = first rank).
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Returns the square displaced by the given file and rank deltas.
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        Square::new(self.file() as i8 + df, self.rank() as i8 + dr)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", FILE_CHARS[self.file() as usize], self.rank() + 1)
    }
}

/// Parses a file letter `a`-`h` into a zero-based file.
pub fn file_from_char(c: char) -> Option<u8> {
    match c {
        'a'..='h' => Some(c as u8 - b'a'),
        _ => None,
    }
}

/// Parses a rank digit `1`-`8` into a zero-based rank.
pub fn rank_from_char(c: char) -> Option<u8> {
    match c {
        '1'..='8' => Some(c as u8 - b'1'),
        _ => None,
    }
}

/// All squares in index order.
pub fn all_squares() -> impl Iterator<Item = Square> {
    (0..SQUARE_COUNT as u8).map(Square)
}
