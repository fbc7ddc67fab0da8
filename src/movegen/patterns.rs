//! Movement patterns per piece kind.
//!
//! Leapers (knight, king) are described by fixed step tables; sliders
//! (bishop, rook, queen) by ray directions that stop at the first
//! occupied square.

use crate::board::{BoardState, PieceKind, Square};

pub const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Fixed step table for leaping kinds.
fn steps(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Knight => &KNIGHT_STEPS,
        PieceKind::King => &KING_STEPS,
        _ => &[],
    }
}

/// Ray directions for sliding kinds.
fn rays(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Bishop => &DIAGONALS,
        PieceKind::Rook => &ORTHOGONALS,
        PieceKind::Queen => &KING_STEPS,
        _ => &[],
    }
}

/// Walks from `from` along `dir` and returns true if `to` is reached before
/// any occupied square.
pub fn ray_reaches(state: &BoardState, from: Square, to: Square, dir: (i8, i8)) -> bool {
    let mut cur = from;
    while let Some(next) = cur.offset(dir.0, dir.1) {
        if next == to {
            return true;
        }
        if state.piece_at(next).is_some() {
            return false;
        }
        cur = next;
    }
    false
}

/// Returns whether a non-pawn piece of `kind` on `from` could move to `to`
/// on the current placement, ignoring what stands on `to`.
pub fn piece_reaches(state: &BoardState, kind: PieceKind, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let leaps = steps(kind)
        .iter()
        .any(|&(df, dr)| from.offset(df, dr) == Some(to));
    leaps
        || rays(kind)
            .iter()
            .any(|&dir| ray_reaches(state, from, to, dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let state = BoardState::initial();
        assert!(piece_reaches(&state, PieceKind::Knight, sq("g1"), sq("f3")));
        assert!(!piece_reaches(&state, PieceKind::Knight, sq("g1"), sq("g3")));
    }

    #[test]
    fn sliders_are_blocked() {
        let state = BoardState::initial();
        assert!(!piece_reaches(&state, PieceKind::Bishop, sq("f1"), sq("c4")));
        assert!(!piece_reaches(&state, PieceKind::Rook, sq("a1"), sq("a3")));
        assert!(!piece_reaches(&state, PieceKind::Queen, sq("d1"), sq("h5")));
    }

    #[test]
    fn sliders_on_open_board() {
        let state = BoardState::from_placement("8/8/8/8/8/8/8/R2Q1B2", Color::White).unwrap();
        assert!(piece_reaches(&state, PieceKind::Rook, sq("a1"), sq("a8")));
        assert!(!piece_reaches(&state, PieceKind::Rook, sq("a1"), sq("e1")));
        assert!(piece_reaches(&state, PieceKind::Rook, sq("a1"), sq("d1")));
        assert!(piece_reaches(&state, PieceKind::Queen, sq("d1"), sq("h5")));
        assert!(piece_reaches(&state, PieceKind::Bishop, sq("f1"), sq("a6")));
        assert!(!piece_reaches(&state, PieceKind::Bishop, sq("f1"), sq("f2")));
    }

    #[test]
    fn king_steps_one_square() {
        let state = BoardState::empty(Color::White);
        assert!(piece_reaches(&state, PieceKind::King, sq("e1"), sq("f2")));
        assert!(!piece_reaches(&state, PieceKind::King, sq("e1"), sq("g1")));
    }
}
