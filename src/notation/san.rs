//! SAN (Standard Algebraic Notation) half-move decoding.
//!
//! Turns a single half-move token such as `Nbd7`, `exd5`, `e8=Q+` or
//! `O-O-O` into a structured `SanMove`. Decoding is purely syntactic: which
//! piece actually moves is decided later against a board state.

use std::fmt;

use thiserror::Error;

use crate::board::{file_from_char, rank_from_char, PieceKind, Square};

/// Errors that can occur when decoding a SAN token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SanError {
    #[error("empty move token")]
    EmptyToken,

    #[error("invalid destination square in '{0}'")]
    BadSquare(String),

    #[error("invalid disambiguation in '{0}'")]
    BadDisambiguation(String),

    #[error("invalid promotion in '{0}'")]
    BadPromotion(String),
}

/// Which wing a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    /// File the king lands on.
    pub const fn king_to_file(self) -> u8 {
        match self {
            CastleSide::King => 6,
            CastleSide::Queen => 2,
        }
    }

    /// File the rook starts on.
    pub const fn rook_from_file(self) -> u8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }

    /// File the rook lands on.
    pub const fn rook_to_file(self) -> u8 {
        match self {
            CastleSide::King => 5,
            CastleSide::Queen => 3,
        }
    }
}

/// A decoded half-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SanMove {
    /// `O-O` or `O-O-O`
    Castle(CastleSide),

    /// Any piece or pawn move: `Nf3`, `Rad1`, `exd5`, `e8=Q`
    Normal {
        kind: PieceKind,
        from_file: Option<u8>,
        from_rank: Option<u8>,
        capture: bool,
        to: Square,
        promotion: Option<PieceKind>,
    },
}

/// Returns true if the token spells a castling move anywhere in it.
///
/// This is a raw text check on the token; it does not consult a board.
pub fn is_castling_token(token: &str) -> bool {
    token.contains("O-O") || token.contains("0-0")
}

/// Decodes a single SAN token.
pub fn parse_san(token: &str) -> Result<SanMove, SanError> {
    let body = token
        .trim()
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));
    if body.is_empty() {
        return Err(SanError::EmptyToken);
    }

    match body {
        "O-O" | "0-0" => return Ok(SanMove::Castle(CastleSide::King)),
        "O-O-O" | "0-0-0" => return Ok(SanMove::Castle(CastleSide::Queen)),
        _ => {}
    }

    let chars: Vec<char> = body.chars().collect();

    let (kind, mut rest) = match PieceKind::from_san_char(chars[0]) {
        Some(kind) => (kind, &chars[1..]),
        None => (PieceKind::Pawn, &chars[..]),
    };

    // Promotion suffix: "=Q" or a bare trailing piece letter on a pawn move.
    let mut promotion = None;
    if kind == PieceKind::Pawn {
        if let Some(eq) = rest.iter().position(|&c| c == '=') {
            if eq + 2 != rest.len() {
                return Err(SanError::BadPromotion(token.to_string()));
            }
            promotion = Some(promotion_kind(rest[eq + 1], token)?);
            rest = &rest[..eq];
        } else if let Some(&last) = rest.last() {
            if last.is_ascii_uppercase() {
                promotion = Some(promotion_kind(last, token)?);
                rest = &rest[..rest.len() - 1];
            }
        }
    }

    let capture = rest.contains(&'x');
    let stripped: Vec<char> = rest
        .iter()
        .copied()
        .filter(|&c| c != 'x' && c != '-' && c != ':')
        .collect();
    if stripped.len() < 2 {
        return Err(SanError::BadSquare(token.to_string()));
    }

    let (hint, dest) = stripped.split_at(stripped.len() - 2);
    let to = match (file_from_char(dest[0]), rank_from_char(dest[1])) {
        (Some(f), Some(r)) => Square::at(f, r),
        _ => return Err(SanError::BadSquare(token.to_string())),
    };

    let mut from_file = None;
    let mut from_rank = None;
    if hint.len() > 2 {
        return Err(SanError::BadDisambiguation(token.to_string()));
    }
    for &c in hint {
        if let Some(f) = file_from_char(c) {
            if from_file.replace(f).is_some() {
                return Err(SanError::BadDisambiguation(token.to_string()));
            }
        } else if let Some(r) = rank_from_char(c) {
            if from_rank.replace(r).is_some() {
                return Err(SanError::BadDisambiguation(token.to_string()));
            }
        } else {
            return Err(SanError::BadDisambiguation(token.to_string()));
        }
    }

    Ok(SanMove::Normal {
        kind,
        from_file,
        from_rank,
        capture,
        to,
        promotion,
    })
}

fn promotion_kind(c: char, token: &str) -> Result<PieceKind, SanError> {
    match PieceKind::from_san_char(c) {
        Some(PieceKind::King) | None => Err(SanError::BadPromotion(token.to_string())),
        Some(kind) => Ok(kind),
    }
}

impl fmt::Display for SanMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanMove::Castle(CastleSide::King) => write!(f, "O-O"),
            SanMove::Castle(CastleSide::Queen) => write!(f, "O-O-O"),
            SanMove::Normal {
                kind,
                from_file,
                from_rank,
                capture,
                to,
                promotion,
            } => {
                if let Some(c) = kind.san_char() {
                    write!(f, "{}", c)?;
                }
                if let Some(file) = from_file {
                    write!(f, "{}", char::from(b'a' + file))?;
                }
                if let Some(rank) = from_rank {
                    write!(f, "{}", rank + 1)?;
                }
                if *capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", to)?;
                if let Some(c) = promotion.and_then(|p| p.san_char()) {
                    write!(f, "={}", c)?;
                }
                Ok(())
            }
        }
    }
}
