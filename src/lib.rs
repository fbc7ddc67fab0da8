//! Opening-phase feature extraction for chess games.
//!
//! Move text is tokenized into turns, replayed from the initial position
//! with a SAN resolver, and reduced to per-side feature rows. The batch
//! module drives this over directories of game CSVs.

pub mod batch;
pub mod board;
pub mod config;
pub mod features;
pub mod movegen;
pub mod notation;
pub mod record;
pub mod resolve;
