//! Game input records and per-side feature rows.

use serde::Serialize;

use crate::board::Color;

/// Value written to every feature of a game that cannot be replayed.
pub const SENTINEL: i32 = -1;

/// Result of a game as labelled by the upstream extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Draw,
    WhiteWin,
    BlackWin,
}

impl Outcome {
    /// Decodes the numeric label: 0 = draw, 1 = white win, 2 = black win.
    pub fn from_code(code: u8) -> Option<Outcome> {
        match code {
            0 => Some(Outcome::Draw),
            1 => Some(Outcome::WhiteWin),
            2 => Some(Outcome::BlackWin),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            Outcome::Draw => 0,
            Outcome::WhiteWin => 1,
            Outcome::BlackWin => 2,
        }
    }

    /// Returns the winning side, or None for a draw.
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Draw => None,
            Outcome::WhiteWin => Some(Color::White),
            Outcome::BlackWin => Some(Color::Black),
        }
    }

    /// 1 if `color` won this game, 0 otherwise.
    pub fn win_flag(self, color: Color) -> u8 {
        u8::from(self.winner() == Some(color))
    }
}

/// One game as read from an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub move_text: String,
    pub outcome: Outcome,
}

impl GameRecord {
    pub fn new(move_text: impl Into<String>, outcome: Outcome) -> Self {
        GameRecord {
            move_text: move_text.into(),
            outcome,
        }
    }
}

/// Feature values for one side of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureRow {
    pub when_castled: i32,
    pub num_center_squares_controlled: i32,
    pub material_difference: i32,
    pub num_unique_pieces_moved: i32,
    pub win: u8,
}

impl FeatureRow {
    /// A row with every feature replaced by the sentinel.
    pub const fn sentinel(win: u8) -> Self {
        FeatureRow {
            when_castled: SENTINEL,
            num_center_squares_controlled: SENTINEL,
            material_difference: SENTINEL,
            num_unique_pieces_moved: SENTINEL,
            win,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.when_castled == SENTINEL
            && self.num_center_squares_controlled == SENTINEL
            && self.material_difference == SENTINEL
            && self.num_unique_pieces_moved == SENTINEL
    }

    /// Formats the row as one CSV line without a trailing newline.
    pub fn csv_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.when_castled,
            self.num_center_squares_controlled,
            self.material_difference,
            self.num_unique_pieces_moved,
            self.win
        )
    }
}

/// CSV header matching `FeatureRow::csv_line`.
pub const CSV_HEADER: &str =
    "when_castled,num_center_squares_controlled,material_difference,num_unique_pieces_moved,win";

/// Both rows produced for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeaturePair {
    pub white: FeatureRow,
    pub black: FeatureRow,
}

impl FeaturePair {
    /// The pair emitted for a game that cannot be replayed.
    pub fn sentinel(outcome: Outcome) -> Self {
        FeaturePair {
            white: FeatureRow::sentinel(outcome.win_flag(Color::White)),
            black: FeatureRow::sentinel(outcome.win_flag(Color::Black)),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.white.is_sentinel() && self.black.is_sentinel()
    }

    pub fn side(&self, color: Color) -> &FeatureRow {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}
