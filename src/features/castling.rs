//! Castling timing.
//!
//! Scans raw tokens only; no board is simulated and no horizon applies.

use crate::board::Color;
use crate::notation::movetext::TurnSequence;

/// Returns the 1-based turn on which `color` first castled, or the number
/// of turns in the game if it never did.
pub fn when_castled(turns: &TurnSequence, color: Color) -> i32 {
    turns
        .turns()
        .iter()
        .find(|t| t.token(color).map_or(false, |tok| tok.is_castling()))
        .map_or(turns.len(), |t| t.index) as i32
}
