//! Center occupancy.
//!
//! Counts pieces standing on a fixed table of squares per piece kind. A
//! piece of that kind on one of its squares bears on the center from
//! there, including pieces that have never moved. This is placement only;
//! no attacks are generated.

use crate::board::{BoardState, Color, PieceKind, Square};
use crate::notation::movetext::TurnSequence;
use crate::resolve::replay;

const fn s(file: u8, rank: u8) -> Square {
    Square::at(file, rank - 1)
}

const A: u8 = 0;
const B: u8 = 1;
const C: u8 = 2;
const D: u8 = 3;
const E: u8 = 4;
const F: u8 = 5;
const G: u8 = 6;
const H: u8 = 7;

#[rustfmt::skip]
const PAWN_SQUARES: [Square; 12] = [
    s(C, 7), s(D, 7), s(E, 7), s(F, 7),
    s(D, 6), s(E, 6),
    s(D, 4), s(E, 4),
    s(C, 3), s(D, 3), s(E, 3), s(F, 3),
];

// c6, f6, c3 and f3 are listed twice: a knight there covers two center squares.
#[rustfmt::skip]
const KNIGHT_SQUARES: [Square; 30] = [
    s(C, 7), s(D, 7), s(E, 7), s(F, 7),
    s(B, 6), s(C, 6), s(D, 6), s(E, 6), s(F, 6), s(G, 6),
    s(B, 5), s(C, 5), s(F, 5), s(G, 5),
    s(B, 4), s(C, 4), s(F, 4), s(G, 4),
    s(C, 3), s(D, 3), s(E, 3), s(F, 3),
    s(C, 2), s(D, 2), s(E, 2), s(F, 2),
    s(C, 6), s(F, 6), s(C, 3), s(F, 3),
];

#[rustfmt::skip]
const BISHOP_SQUARES: [Square; 8] = [
    s(B, 7), s(G, 7),
    s(C, 6), s(F, 6),
    s(C, 3), s(F, 3),
    s(B, 2), s(G, 2),
];

#[rustfmt::skip]
const QUEEN_SQUARES: [Square; 19] = [
    s(D, 8),
    s(C, 7), s(D, 7), s(E, 7),
    s(B, 6), s(D, 6), s(F, 6),
    s(A, 5), s(G, 5), s(H, 5),
    s(A, 4), s(G, 4), s(H, 4),
    s(B, 3), s(D, 3), s(F, 3),
    s(D, 2), s(E, 2),
    s(D, 1),
];

fn table(kind: PieceKind) -> &'static [Square] {
    match kind {
        PieceKind::Pawn => &PAWN_SQUARES,
        PieceKind::Knight => &KNIGHT_SQUARES,
        PieceKind::Bishop => &BISHOP_SQUARES,
        PieceKind::Queen => &QUEEN_SQUARES,
        PieceKind::Rook | PieceKind::King => &[],
    }
}

/// Counts table entries occupied by a `color` piece of the matching kind.
pub fn center_occupancy(board: &BoardState, color: Color) -> i32 {
    [PieceKind::Pawn, PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen]
        .into_iter()
        .map(|kind| {
            table(kind)
                .iter()
                .filter(|&&sq| {
                    matches!(board.piece_at(sq), Some(p) if p.color == color && p.kind == kind)
                })
                .count() as i32
        })
        .sum()
}

/// Center occupancy for (white, black) after replaying `horizon` turns.
pub fn center_squares_controlled(turns: &TurnSequence, horizon: usize) -> (i32, i32) {
    let board = replay(turns, horizon).board;
    (
        center_occupancy(&board, Color::White),
        center_occupancy(&board, Color::Black),
    )
}
