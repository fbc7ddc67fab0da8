//! Move-text tokenization.
//!
//! Splits a PGN-style move-text string (`1. e4 e5 2. Nf3 Nc6 ...`) into an
//! ordered sequence of turns. Tokens are kept as raw text; interpreting
//! them is the board simulation's job.

use thiserror::Error;

use crate::board::Color;
use crate::notation::san::is_castling_token;

/// Marker that introduces an engine-evaluation comment.
const ANNOTATION_MARKER: char = '%';

/// Truncated draw result left at the end of move text by the upstream extractor.
const DRAW_MARKER: &str = "1/2";

/// Full result markers that may trail the last turn.
const RESULT_MARKERS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Reasons a move-text string cannot be used for feature extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MovetextError {
    #[error("move text carries an evaluation annotation")]
    Annotated,

    #[error("move text contains no turns")]
    Empty,

    #[error("turn {0} contains no moves")]
    EmptyTurn(usize),
}

/// Raw algebraic text for one half-move.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveToken(String);

impl MoveToken {
    pub fn new(text: &str) -> Self {
        MoveToken(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the raw text names a castling move.
    pub fn is_castling(&self) -> bool {
        is_castling_token(&self.0)
    }
}

/// One move number's worth of play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// 1-based turn number.
    pub index: usize,
    pub white: MoveToken,
    pub black: Option<MoveToken>,
}

impl Turn {
    /// Returns the half-move played by `color` in this turn, if any.
    pub fn token(&self, color: Color) -> Option<&MoveToken> {
        match color {
            Color::White => Some(&self.white),
            Color::Black => self.black.as_ref(),
        }
    }
}

/// An ordered, gap-free sequence of turns numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSequence {
    turns: Vec<Turn>,
}

impl TurnSequence {
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns the first `horizon` turns, or all of them if there are fewer.
    pub fn prefix(&self, horizon: usize) -> &[Turn] {
        &self.turns[..horizon.min(self.turns.len())]
    }

    fn push(&mut self, tokens: &[&str]) -> Result<(), MovetextError> {
        let index = self.turns.len() + 1;
        let white = tokens.first().ok_or(MovetextError::EmptyTurn(index))?;
        self.turns.push(Turn {
            index,
            white: MoveToken::new(white),
            black: tokens.get(1).map(|t| MoveToken::new(t)),
        });
        Ok(())
    }
}

/// Tokenizes a move-text string into turns.
///
/// Annotated move text is rejected outright rather than partially used.
pub fn tokenize(text: &str) -> Result<TurnSequence, MovetextError> {
    if text.contains(ANNOTATION_MARKER) {
        return Err(MovetextError::Annotated);
    }

    let chunks: Vec<&str> = text.split('.').collect();
    let mut seq = TurnSequence { turns: Vec::new() };
    if chunks.len() < 2 {
        return Err(MovetextError::Empty);
    }

    // chunks[0] is whatever precedes "1."; each middle chunk ends with the
    // next move number, which is dropped.
    for chunk in &chunks[1..chunks.len() - 1] {
        let tokens: Vec<&str> = chunk.split_whitespace().collect();
        let moves = &tokens[..tokens.len().saturating_sub(1)];
        seq.push(&moves[..moves.len().min(2)])?;
    }

    let last: Vec<&str> = chunks[chunks.len() - 1].split_whitespace().collect();
    if !last.contains(&DRAW_MARKER) {
        let moves: Vec<&str> = last
            .into_iter()
            .filter(|t| !RESULT_MARKERS.contains(t))
            .take(2)
            .collect();
        if !moves.is_empty() {
            seq.push(&moves)?;
        }
    }

    if seq.is_empty() {
        return Err(MovetextError::Empty);
    }
    Ok(seq)
}
