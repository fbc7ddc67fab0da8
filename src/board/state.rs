//! Board state representation.
//!
//! Holds the piece placement of a single simulated game together with the
//! side to move and the small amount of bookkeeping SAN resolution needs
//! (castling rights and the en passant target).

use thiserror::Error;

use super::piece::{Color, Piece, PieceKind};
use super::square::{Square, SQUARE_COUNT};

/// Errors that can occur when parsing a placement diagram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("expected 8 ranks, found {0}")]
    WrongRankCount(usize),

    #[error("rank '{0}' does not describe 8 files")]
    BadRankWidth(String),

    #[error("unknown piece character '{0}'")]
    UnknownPiece(char),
}

/// Which castling moves each side still has available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_king_side: true,
        white_queen_side: true,
        black_king_side: true,
        black_queen_side: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };

    /// Returns whether `color` may still castle on the given wing.
    pub fn allows(self, color: Color, king_side: bool) -> bool {
        match (color, king_side) {
            (Color::White, true) => self.white_king_side,
            (Color::White, false) => self.white_queen_side,
            (Color::Black, true) => self.black_king_side,
            (Color::Black, false) => self.black_queen_side,
        }
    }

    /// Clears both rights for `color`.
    pub fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_king_side = false;
                self.white_queen_side = false;
            }
            Color::Black => {
                self.black_king_side = false;
                self.black_queen_side = false;
            }
        }
    }

    /// Clears the right tied to a rook's home square, if `sq` is one.
    pub fn clear_rook_square(&mut self, sq: Square) {
        if sq == Square::H1 {
            self.white_king_side = false;
        } else if sq == Square::A1 {
            self.white_queen_side = false;
        } else if sq == Square::H8 {
            self.black_king_side = false;
        } else if sq == Square::A8 {
            self.black_queen_side = false;
        }
    }
}

/// Piece placement at a point in a simulated game.
///
/// Uses a fixed-size array indexed by `Square::index()`, so the state is
/// trivially copyable and never shared between replays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Occupant of each square, or None when empty.
    pub squares: [Option<Piece>; SQUARE_COUNT],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square a pawn skipped over on the previous half-move.
    pub en_passant: Option<Square>,
}

/// Back-rank piece order from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl BoardState {
    /// Creates an empty board with no castling rights.
    pub fn empty(side_to_move: Color) -> Self {
        BoardState {
            squares: [None; SQUARE_COUNT],
            side_to_move,
            castling: CastlingRights::NONE,
            en_passant: None,
        }
    }

    /// Creates the standard starting position, white to move.
    pub fn initial() -> Self {
        let mut state = BoardState::empty(Color::White);
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            for color in [Color::White, Color::Black] {
                state.squares[Square::at(file, color.back_rank()).index()] =
                    Some(Piece::new(color, *kind));
                state.squares[Square::at(file, color.pawn_rank()).index()] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        state.castling = CastlingRights::ALL;
        state
    }

    /// Returns the occupant of a square.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Places a piece on the board. Returns false if the square is already occupied.
    pub fn place_piece(&mut self, sq: Square, piece: Piece) -> bool {
        let idx = sq.index();
        if self.squares[idx].is_some() {
            return false;
        }
        self.squares[idx] = Some(piece);
        true
    }

    /// Removes and returns the occupant of a square.
    pub fn take_piece(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// Iterates over every occupied square with its piece.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(|(idx, p)| {
            let piece = (*p)?;
            Square::from_index(idx).map(|sq| (sq, piece))
        })
    }

    /// Returns the square of `color`'s king, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.occupied()
            .find(|(_, p)| p.color == color && p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Builds a state from the placement field of a FEN string, e.g.
    /// `rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR`. Castling rights
    /// are granted wherever king and rook still stand on their home squares.
    pub fn from_placement(placement: &str, side_to_move: Color) -> Result<Self, PlacementError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(PlacementError::WrongRankCount(ranks.len()));
        }

        let mut state = BoardState::empty(side_to_move);
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file = file.saturating_add(skip as u8);
                    if file > 8 {
                        return Err(PlacementError::BadRankWidth(rank_str.to_string()));
                    }
                    continue;
                }
                if file >= 8 {
                    return Err(PlacementError::BadRankWidth(rank_str.to_string()));
                }
                let piece = Piece::from_diagram_char(c).ok_or(PlacementError::UnknownPiece(c))?;
                state.squares[Square::at(file, rank).index()] = Some(piece);
                file += 1;
            }
            if file != 8 {
                return Err(PlacementError::BadRankWidth(rank_str.to_string()));
            }
        }

        state.castling = CastlingRights {
            white_king_side: state.has(Square::E1, Color::White, PieceKind::King)
                && state.has(Square::H1, Color::White, PieceKind::Rook),
            white_queen_side: state.has(Square::E1, Color::White, PieceKind::King)
                && state.has(Square::A1, Color::White, PieceKind::Rook),
            black_king_side: state.has(Square::E8, Color::Black, PieceKind::King)
                && state.has(Square::H8, Color::Black, PieceKind::Rook),
            black_queen_side: state.has(Square::E8, Color::Black, PieceKind::King)
                && state.has(Square::A8, Color::Black, PieceKind::Rook),
        };
        Ok(state)
    }

    /// Encodes the placement as a FEN placement field.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8u8).rev() {
            let mut gap = 0;
            for file in 0..8u8 {
                match self.squares[Square::at(file, rank).index()] {
                    Some(p) => {
                        if gap > 0 {
                            out.push(char::from(b'0' + gap));
                            gap = 0;
                        }
                        out.push(p.diagram_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push(char::from(b'0' + gap));
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    /// Square of the pawn a `color` pawn would take by moving diagonally to
    /// `to` en passant, if that capture is available.
    ///
    /// The target must be empty and the square behind it must hold an
    /// opposing pawn, so a stale target left by the mover's own double step
    /// never counts.
    pub fn en_passant_victim(&self, color: Color, to: Square) -> Option<Square> {
        if self.en_passant != Some(to) || self.piece_at(to).is_some() {
            return None;
        }
        let victim = to.offset(0, -color.forward())?;
        self.has(victim, color.opposite(), PieceKind::Pawn).then_some(victim)
    }

    fn has(&self, sq: Square, color: Color, kind: PieceKind) -> bool {
        self.piece_at(sq) == Some(Piece::new(color, kind))
    }
}
