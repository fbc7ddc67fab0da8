//! Half-move application.
//!
//! Resolves one SAN token against the current placement and, when exactly
//! one piece can carry it out, moves that piece. A token that cannot be
//! resolved leaves the board untouched.

use thiserror::Error;

use crate::board::{BoardState, Color, Piece, PieceKind, Square};
use crate::movegen::{candidate_origins, exposes_king};
use crate::notation::san::{parse_san, CastleSide, SanError, SanMove};

/// Reasons a half-move token could not be applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error(transparent)]
    Notation(#[from] SanError),

    #[error("no {color} piece can play '{token}'")]
    NoCandidate { color: &'static str, token: String },

    #[error("'{token}' is ambiguous between {count} pieces")]
    Ambiguous { token: String, count: usize },

    #[error("{color} cannot castle with '{token}'")]
    CastlingUnavailable { color: &'static str, token: String },

    #[error("'{0}' reaches the last rank without promoting")]
    MissingPromotion(String),

    #[error("'{0}' promotes away from the last rank")]
    UnexpectedPromotion(String),
}

/// The outcome of a successfully applied half-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub color: Color,
    pub from: Square,
    pub to: Square,
    /// Set for castling moves.
    pub castle: Option<CastleSide>,
    /// Home square of the rook that castled alongside the king.
    pub rook_from: Option<Square>,
    pub captured: Option<Piece>,
}

/// Applies one half-move for the side to move.
///
/// On success the board is updated (placement, castling rights, en passant
/// target, side to move) and the move's origin is reported. On failure the
/// board is left exactly as it was.
pub fn apply(state: &mut BoardState, token: &str) -> Result<AppliedMove, ResolveError> {
    let color = state.side_to_move;
    match parse_san(token)? {
        SanMove::Castle(side) => castle(state, color, side, token),
        SanMove::Normal {
            kind,
            from_file,
            from_rank,
            capture,
            to,
            promotion,
        } => {
            let pawn_capture =
                kind == PieceKind::Pawn && (capture || from_file.map_or(false, |f| f != to.file()));
            let mut origins: Vec<Square> = candidate_origins(state, color, kind, to, pawn_capture)
                .into_iter()
                .filter(|sq| from_file.map_or(true, |f| sq.file() == f))
                .filter(|sq| from_rank.map_or(true, |r| sq.rank() == r))
                .collect();

            let piece = Piece::new(color, kind);
            if origins.len() > 1 {
                origins.retain(|&from| !exposes_king(state, piece, from, to));
            }

            let from = match origins.as_slice() {
                [only] => *only,
                [] => {
                    return Err(ResolveError::NoCandidate {
                        color: color.name(),
                        token: token.to_string(),
                    })
                }
                many => {
                    return Err(ResolveError::Ambiguous {
                        token: token.to_string(),
                        count: many.len(),
                    })
                }
            };

            let placed = if kind == PieceKind::Pawn {
                let last_rank = to.rank() == Color::opposite(color).back_rank();
                match (last_rank, promotion) {
                    (true, Some(p)) => Piece::new(color, p),
                    (true, None) => return Err(ResolveError::MissingPromotion(token.to_string())),
                    (false, Some(_)) => {
                        return Err(ResolveError::UnexpectedPromotion(token.to_string()))
                    }
                    (false, None) => piece,
                }
            } else {
                piece
            };

            Ok(move_piece(state, piece, placed, from, to))
        }
    }
}

/// Moves a resolved piece and updates the bookkeeping around it.
fn move_piece(
    state: &mut BoardState,
    piece: Piece,
    placed: Piece,
    from: Square,
    to: Square,
) -> AppliedMove {
    let en_passant_victim = match piece.kind {
        PieceKind::Pawn => state.en_passant_victim(piece.color, to),
        _ => None,
    };
    let mut captured = state.take_piece(to);
    state.take_piece(from);
    if let Some(victim) = en_passant_victim {
        captured = state.take_piece(victim);
    }
    state.squares[to.index()] = Some(placed);

    if piece.kind == PieceKind::King {
        state.castling.clear_color(piece.color);
    }
    state.castling.clear_rook_square(from);
    state.castling.clear_rook_square(to);

    let double_step = piece.kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2;
    state.en_passant = if double_step {
        Square::new(from.file() as i8, (from.rank() + to.rank()) as i8 / 2)
    } else {
        None
    };
    state.side_to_move = piece.color.opposite();

    AppliedMove {
        color: piece.color,
        from,
        to,
        castle: None,
        rook_from: None,
        captured,
    }
}

/// Castles if king and rook stand on their home squares with nothing
/// between them and the right has not been lost.
fn castle(
    state: &mut BoardState,
    color: Color,
    side: CastleSide,
    token: &str,
) -> Result<AppliedMove, ResolveError> {
    let rank = color.back_rank();
    let king_from = Square::at(4, rank);
    let rook_from = Square::at(side.rook_from_file(), rank);
    let king = Piece::new(color, PieceKind::King);
    let rook = Piece::new(color, PieceKind::Rook);

    let (lo, hi) = match side {
        CastleSide::King => (5, 7),
        CastleSide::Queen => (1, 4),
    };
    let path_clear = (lo..hi).all(|file| state.piece_at(Square::at(file, rank)).is_none());

    if !state.castling.allows(color, side == CastleSide::King)
        || state.piece_at(king_from) != Some(king)
        || state.piece_at(rook_from) != Some(rook)
        || !path_clear
    {
        return Err(ResolveError::CastlingUnavailable {
            color: color.name(),
            token: token.to_string(),
        });
    }

    let king_to = Square::at(side.king_to_file(), rank);
    let rook_to = Square::at(side.rook_to_file(), rank);
    state.take_piece(king_from);
    state.take_piece(rook_from);
    state.squares[king_to.index()] = Some(king);
    state.squares[rook_to.index()] = Some(rook);
    state.castling.clear_color(color);
    state.en_passant = None;
    state.side_to_move = color.opposite();

    Ok(AppliedMove {
        color,
        from: king_from,
        to: king_to,
        castle: Some(side),
        rook_from: Some(rook_from),
        captured: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    fn play(tokens: &[&str]) -> BoardState {
        let mut state = BoardState::initial();
        for t in tokens {
            apply(&mut state, t).unwrap_or_else(|e| panic!("{}: {}", t, e));
        }
        state
    }

    #[test]
    fn pawn_push_reports_origin() {
        let mut state = BoardState::initial();
        let mv = apply(&mut state, "e4").unwrap();
        assert_eq!(mv.from, sq("e2"));
        assert_eq!(mv.to, sq("e4"));
        assert_eq!(state.en_passant, Some(sq("e3")));
        assert_eq!(state.side_to_move, Color::Black);
        assert_eq!(state.piece_at(sq("e2")), None);
    }

    #[test]
    fn capture_removes_target() {
        let mut state = play(&["e4", "d5"]);
        let mv = apply(&mut state, "exd5").unwrap();
        assert_eq!(mv.from, sq("e4"));
        assert_eq!(mv.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(state.occupied().count(), 31);
    }

    #[test]
    fn en_passant_capture() {
        let mut state = play(&["e4", "a6", "e5", "d5"]);
        let mv = apply(&mut state, "exd6").unwrap();
        assert_eq!(mv.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert_eq!(state.piece_at(sq("d5")), None);
        assert_eq!(
            state.piece_at(sq("d6")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn king_side_castling_moves_both_pieces() {
        let mut state = play(&["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"]);
        let mv = apply(&mut state, "O-O").unwrap();
        assert_eq!(mv.from, Square::E1);
        assert_eq!(mv.rook_from, Some(Square::H1));
        assert_eq!(mv.castle, Some(CastleSide::King));
        assert_eq!(state.piece_at(Square::G1), Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(state.piece_at(Square::F1), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert!(!state.castling.allows(Color::White, false));
    }

    #[test]
    fn queen_side_castling_for_black() {
        let mut state = play(&["d4", "d5", "c4", "Nc6", "Nc3", "Bf5", "e3", "Qd7", "a3"]);
        let mv = apply(&mut state, "O-O-O").unwrap();
        assert_eq!(mv.from, Square::E8);
        assert_eq!(mv.rook_from, Some(Square::A8));
        assert_eq!(state.piece_at(Square::C8), Some(Piece::new(Color::Black, PieceKind::King)));
        assert_eq!(state.piece_at(Square::D8), Some(Piece::new(Color::Black, PieceKind::Rook)));
    }

    #[test]
    fn blocked_castling_fails_without_change() {
        let mut state = play(&["e4", "e5"]);
        let before = state.clone();
        assert!(matches!(
            apply(&mut state, "O-O"),
            Err(ResolveError::CastlingUnavailable { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn castling_right_lost_after_king_moves() {
        let mut state = play(&["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "Ke2", "d6", "Ke1", "Be6"]);
        assert!(apply(&mut state, "O-O").is_err());
    }

    #[test]
    fn stale_en_passant_target_cannot_be_taken_by_its_owner() {
        // Black's reply to e4 never applied, so white is to move again with
        // its own e3 target still set.
        let mut state = play(&["e4"]);
        state.side_to_move = Color::White;
        let before = state.clone();
        assert!(matches!(
            apply(&mut state, "dxe3"),
            Err(ResolveError::NoCandidate { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn captured_rook_ends_castling_on_its_wing() {
        let mut state =
            BoardState::from_placement("4k3/8/8/7R/8/8/6b1/R3K2R", Color::Black).unwrap();
        assert!(state.castling.allows(Color::White, true));

        apply(&mut state, "Bxh1").unwrap();
        assert!(!state.castling.allows(Color::White, true));
        assert!(state.castling.allows(Color::White, false));

        // A different rook reaching h1 does not restore the right.
        apply(&mut state, "Rxh1").unwrap();
        apply(&mut state, "Kd7").unwrap();
        let before = state.clone();
        assert!(matches!(
            apply(&mut state, "O-O"),
            Err(ResolveError::CastlingUnavailable { .. })
        ));
        assert_eq!(state, before);
        apply(&mut state, "O-O-O").unwrap();
        assert_eq!(state.piece_at(Square::C1), Some(Piece::new(Color::White, PieceKind::King)));
    }

    #[test]
    fn disambiguation_by_file() {
        // Knights on b1 and f3 can both reach d2 once the d-pawn has moved.
        let mut state = play(&["Nf3", "Nf6", "d3", "d6"]);
        assert!(matches!(
            apply(&mut state.clone(), "Nd2"),
            Err(ResolveError::Ambiguous { count: 2, .. })
        ));
        let mv = apply(&mut state.clone(), "Nbd2").unwrap();
        assert_eq!(mv.from, sq("b1"));
        let mv = apply(&mut state, "Nfd2").unwrap();
        assert_eq!(mv.from, sq("f3"));
    }

    #[test]
    fn disambiguation_by_rank() {
        let state = BoardState::from_placement("4k3/8/8/R7/8/8/8/R3K3", Color::White).unwrap();
        assert!(apply(&mut state.clone(), "Ra3").is_err());
        assert_eq!(apply(&mut state.clone(), "R1a3").unwrap().from, sq("a1"));
        assert_eq!(apply(&mut state.clone(), "R5a3").unwrap().from, sq("a5"));
    }

    #[test]
    fn pinned_candidate_is_discarded() {
        // White knights on c3 and g5 can both reach e4, but c3 is pinned by b4.
        let mut state =
            BoardState::from_placement("4k3/8/8/6N1/1b6/2N5/8/4K3", Color::White).unwrap();
        let mv = apply(&mut state, "Ne4").unwrap();
        assert_eq!(mv.from, sq("g5"));
    }

    #[test]
    fn promotion_places_new_piece() {
        let mut state = BoardState::from_placement("k7/4P3/8/8/8/8/8/4K3", Color::White).unwrap();
        assert!(matches!(
            apply(&mut state.clone(), "e8"),
            Err(ResolveError::MissingPromotion(_))
        ));
        apply(&mut state, "e8=Q+").unwrap();
        assert_eq!(state.piece_at(sq("e8")), Some(Piece::new(Color::White, PieceKind::Queen)));
    }

    #[test]
    fn unresolvable_tokens_leave_state_unchanged() {
        let mut state = BoardState::initial();
        let before = state.clone();
        for token in ["Nf6", "e5", "Bc4", "garbage", "Qxd7", ""] {
            assert!(apply(&mut state, token).is_err(), "{}", token);
            assert_eq!(state, before);
        }
    }
}
