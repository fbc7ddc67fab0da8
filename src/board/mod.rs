//! Board representation and game-state types.
//!
//! Contains the core data structures for squares, pieces, and the
//! simulated board state a replay mutates.

pub mod piece;
pub mod square;
pub mod state;

pub use piece::{Color, Piece, PieceKind, ALL_COLORS};
pub use square::{all_squares, file_from_char, rank_from_char, Square, SQUARE_COUNT};
pub use state::{BoardState, CastlingRights, PlacementError};
