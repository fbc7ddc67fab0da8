//! Per-game feature extraction.
//!
//! Four independent feature families, each driving its own replay from the
//! initial position to its own horizon. Replays are never shared between
//! families: a family only ever sees the half-moves inside its horizon.

pub mod castling;
pub mod center;
pub mod development;
pub mod material;

pub use castling::when_castled;
pub use center::{center_occupancy, center_squares_controlled};
pub use development::{unique_pieces_in, unique_pieces_moved};
pub use material::{material_balance, material_difference};

use log::debug;
use serde::Deserialize;

use crate::board::Color;
use crate::notation::movetext::{tokenize, TurnSequence};
use crate::record::{FeaturePair, FeatureRow, GameRecord, Outcome};

/// Number of turns each replaying feature family looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Horizons {
    pub unique_pieces: usize,
    pub material: usize,
    pub center: usize,
}

impl Default for Horizons {
    fn default() -> Self {
        Horizons {
            unique_pieces: 7,
            material: 4,
            center: 5,
        }
    }
}

/// Computes both feature rows for an already tokenized game.
pub fn extract_turns(turns: &TurnSequence, outcome: Outcome, horizons: &Horizons) -> FeaturePair {
    let material = material_difference(turns, horizons.material);
    let (center_white, center_black) = center_squares_controlled(turns, horizons.center);

    let row = |color: Color, center: i32| FeatureRow {
        when_castled: when_castled(turns, color),
        num_center_squares_controlled: center,
        material_difference: material,
        num_unique_pieces_moved: unique_pieces_moved(turns, color, horizons.unique_pieces),
        win: outcome.win_flag(color),
    };

    FeaturePair {
        white: row(Color::White, center_white),
        black: row(Color::Black, center_black),
    }
}

/// Computes both feature rows for one game.
///
/// Games whose move text cannot be tokenized get the sentinel pair, so
/// every input game yields exactly two rows.
pub fn extract(record: &GameRecord, horizons: &Horizons) -> FeaturePair {
    match tokenize(&record.move_text) {
        Ok(turns) => extract_turns(&turns, record.outcome, horizons),
        Err(e) => {
            debug!("sentinel rows for malformed game: {}", e);
            FeaturePair::sentinel(record.outcome)
        }
    }
}
