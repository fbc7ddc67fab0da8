//! Move resolution.
//!
//! Applies SAN half-moves to a board state and replays the opening turns
//! of a game up to a fixed horizon.

pub mod apply;
pub mod replay;

pub use apply::{apply, AppliedMove, ResolveError};
pub use replay::{replay, Origin, Replay};
