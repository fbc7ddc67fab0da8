//! Bounded replays from the initial position.
//!
//! Every replay owns a fresh `BoardState`. Half-moves that cannot be
//! resolved are skipped: the board stays as it was for that half-move and
//! the replay moves on to the next token.

use log::trace;

use crate::board::{BoardState, Color, Square, ALL_COLORS};
use crate::notation::movetext::TurnSequence;

use super::apply::apply;

/// Where a successfully applied half-move started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin {
    pub color: Color,
    /// 1-based turn the half-move belongs to.
    pub turn: usize,
    pub square: Square,
    /// True for both the king and the rook entry of a castling move.
    pub castling: bool,
}

/// Final board of a replay plus the origins of every applied half-move.
#[derive(Debug, Clone)]
pub struct Replay {
    pub board: BoardState,
    pub origins: Vec<Origin>,
    /// Number of half-moves that could not be resolved.
    pub skipped: usize,
}

impl Replay {
    /// Origins produced by one side, in play order.
    pub fn origins_of(&self, color: Color) -> impl Iterator<Item = &Origin> + '_ {
        self.origins.iter().filter(move |o| o.color == color)
    }
}

/// Replays up to `horizon` full turns of `turns` from the initial position.
///
/// Each half-move is applied for the side that played it, so a skipped
/// white half-move does not shift black's moves onto white.
pub fn replay(turns: &TurnSequence, horizon: usize) -> Replay {
    let played = turns.prefix(horizon);
    let mut board = BoardState::initial();
    let mut origins = Vec::with_capacity(played.len() * 3);
    let mut skipped = 0;

    for turn in played {
        for color in ALL_COLORS {
            let Some(token) = turn.token(color) else {
                continue;
            };
            board.side_to_move = color;
            match apply(&mut board, token.as_str()) {
                Ok(mv) => {
                    let castling = mv.castle.is_some();
                    origins.push(Origin {
                        color,
                        turn: turn.index,
                        square: mv.from,
                        castling,
                    });
                    if let Some(rook_from) = mv.rook_from {
                        origins.push(Origin {
                            color,
                            turn: turn.index,
                            square: rook_from,
                            castling,
                        });
                    }
                }
                Err(e) => {
                    trace!(
                        "turn {} {}: skipping '{}': {}",
                        turn.index,
                        color.name(),
                        token.as_str(),
                        e
                    );
                    skipped += 1;
                }
            }
        }
    }

    Replay {
        board,
        origins,
        skipped,
    }
}
