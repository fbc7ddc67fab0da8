//! Attack detection.
//!
//! Used only to tell apart otherwise ambiguous SAN candidates: a pinned
//! piece is never named with disambiguation, so candidates whose move would
//! expose their own king are dropped before giving up.

use crate::board::{BoardState, Color, Piece, PieceKind, Square};

use super::patterns::{DIAGONALS, KING_STEPS, KNIGHT_STEPS, ORTHOGONALS};

/// Returns true if any piece of color `by` attacks `target`.
pub fn is_attacked(state: &BoardState, target: Square, by: Color) -> bool {
    let holds = |sq: Option<Square>, kinds: &[PieceKind]| -> bool {
        sq.and_then(|s| state.piece_at(s))
            .map_or(false, |p| p.color == by && kinds.contains(&p.kind))
    };

    if KNIGHT_STEPS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), &[PieceKind::Knight]))
    {
        return true;
    }
    if KING_STEPS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), &[PieceKind::King]))
    {
        return true;
    }

    // Pawns of `by` attack diagonally forward, so look one rank behind the target.
    let back = -by.forward();
    if holds(target.offset(-1, back), &[PieceKind::Pawn])
        || holds(target.offset(1, back), &[PieceKind::Pawn])
    {
        return true;
    }

    let slider_hit = |dirs: &[(i8, i8)], kinds: &[PieceKind]| -> bool {
        dirs.iter().any(|&(df, dr)| {
            let mut cur = target;
            while let Some(next) = cur.offset(df, dr) {
                if let Some(p) = state.piece_at(next) {
                    return p.color == by && kinds.contains(&p.kind);
                }
                cur = next;
            }
            false
        })
    };

    slider_hit(&DIAGONALS, &[PieceKind::Bishop, PieceKind::Queen])
        || slider_hit(&ORTHOGONALS, &[PieceKind::Rook, PieceKind::Queen])
}

/// Returns true if moving `piece` from `from` to `to` would leave its own
/// king attacked. A side without a king is never considered exposed.
pub fn exposes_king(state: &BoardState, piece: Piece, from: Square, to: Square) -> bool {
    let mut scratch = state.clone();
    scratch.take_piece(from);
    if piece.kind == PieceKind::Pawn {
        if let Some(victim) = state.en_passant_victim(piece.color, to) {
            scratch.take_piece(victim);
        }
    }
    scratch.squares[to.index()] = Some(piece);

    match scratch.king_square(piece.color) {
        Some(king) => is_attacked(&scratch, king, piece.color.opposite()),
        None => false,
    }
}
