//! Breadth of development: how many distinct pieces a side has moved.

use crate::board::{Color, SQUARE_COUNT};
use crate::notation::movetext::TurnSequence;
use crate::resolve::{replay, Replay};

/// Counts distinct home-rank origins among `color`'s applied half-moves.
///
/// An origin counts the first time it is seen on either of the side's two
/// home ranks. Each castling entry (king and rook) adds one regardless of
/// whether its square was already seen, and marks the square as seen.
pub fn unique_pieces_in(replay: &Replay, color: Color) -> i32 {
    let home_ranks = [color.back_rank(), color.pawn_rank()];
    let mut seen = [false; SQUARE_COUNT];
    let mut count = 0;

    for origin in replay.origins_of(color) {
        let idx = origin.square.index();
        if origin.castling {
            count += 1;
            seen[idx] = true;
        } else if home_ranks.contains(&origin.square.rank()) && !seen[idx] {
            count += 1;
            seen[idx] = true;
        }
    }
    count
}

/// Unique pieces moved by `color` within the first `horizon` turns.
pub fn unique_pieces_moved(turns: &TurnSequence, color: Color, horizon: usize) -> i32 {
    unique_pieces_in(&replay(turns, horizon), color)
}
