//! Material balance after a short replay.

use crate::board::{BoardState, Color};
use crate::notation::movetext::TurnSequence;
use crate::resolve::replay;

/// Sums piece values on the board, white positive and black negative.
pub fn material_balance(board: &BoardState) -> i32 {
    board
        .occupied()
        .map(|(_, p)| match p.color {
            Color::White => p.kind.value(),
            Color::Black => -p.kind.value(),
        })
        .sum()
}

/// Material balance after replaying `horizon` turns. Shared by both sides.
pub fn material_difference(turns: &TurnSequence, horizon: usize) -> i32 {
    material_balance(&replay(turns, horizon).board)
}
