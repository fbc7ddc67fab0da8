//! Candidate origin search.
//!
//! Given a destination square and the kind of piece a SAN token names,
//! finds every square a piece of that kind could have come from under the
//! standard movement rules. Check and mate are not considered.

pub mod attacks;
pub mod patterns;

pub use attacks::{exposes_king, is_attacked};
pub use patterns::piece_reaches;

use crate::board::{BoardState, Color, Piece, PieceKind, Square};

/// Returns every square holding a `color` piece of `kind` that could move
/// to `to` on the current placement.
///
/// `capture` only matters for pawns, whose capturing and non-capturing
/// moves differ. Squares occupied by the mover's own pieces are never
/// reachable.
pub fn candidate_origins(
    state: &BoardState,
    color: Color,
    kind: PieceKind,
    to: Square,
    capture: bool,
) -> Vec<Square> {
    if matches!(state.piece_at(to), Some(p) if p.color == color) {
        return Vec::new();
    }

    match kind {
        PieceKind::Pawn => pawn_origins(state, color, to, capture),
        _ => {
            let piece = Piece::new(color, kind);
            state
                .occupied()
                .filter(|&(from, p)| p == piece && piece_reaches(state, kind, from, to))
                .map(|(from, _)| from)
                .collect()
        }
    }
}

/// Pawn origins: single and double pushes, diagonal captures, en passant.
fn pawn_origins(state: &BoardState, color: Color, to: Square, capture: bool) -> Vec<Square> {
    let pawn = Some(Piece::new(color, PieceKind::Pawn));
    let fwd = color.forward();
    let mut origins = Vec::new();

    if capture {
        let takes_enemy = matches!(state.piece_at(to), Some(p) if p.color != color);
        if !takes_enemy && state.en_passant_victim(color, to).is_none() {
            return origins;
        }
        for df in [-1, 1] {
            if let Some(from) = to.offset(df, -fwd) {
                if state.piece_at(from) == pawn {
                    origins.push(from);
                }
            }
        }
        return origins;
    }

    if state.piece_at(to).is_some() {
        return origins;
    }
    if let Some(one) = to.offset(0, -fwd) {
        if state.piece_at(one) == pawn {
            origins.push(one);
        } else if state.piece_at(one).is_none()
            && to.rank() as i8 == color.pawn_rank() as i8 + 2 * fwd
        {
            if let Some(two) = one.offset(0, -fwd) {
                if state.piece_at(two) == pawn {
                    origins.push(two);
                }
            }
        }
    }
    origins
}
