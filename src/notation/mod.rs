//! Chess notation handling.
//!
//! Decodes SAN half-move tokens and splits PGN-style move text into
//! numbered turns for the replay engine.

pub mod movetext;
pub mod san;

pub use movetext::{tokenize, MoveToken, MovetextError, Turn, TurnSequence};
pub use san::{is_castling_token, parse_san, CastleSide, SanError, SanMove};
