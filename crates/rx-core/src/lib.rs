//! Core types for Reaxion: difficulty profiles, reactions, and games.
//!
//! This crate is the data model the engine mutates. It holds no game logic
//! beyond the invariants of its own types, so front ends can deserialize a
//! [`Game`] snapshot without pulling in the engine.

/// Difficulty profiles and cosmetic colors.
pub mod difficulty;
/// Error types used throughout the crate.
pub mod error;
/// Game sessions and the guess log.
pub mod game;
/// Typed identifiers and injectable id sources.
pub mod id;
/// Reactions and their status enums.
pub mod reaction;
/// Settings supplied by front ends.
pub mod settings;

/// Re-export difficulty types.
pub use difficulty::{Coloring, Difficulty, DifficultyProfile};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export game types.
pub use game::{Game, GuessRecord};
/// Re-export id types.
pub use id::{GameId, IdSource, RandomIds, ReactionId, SequentialIds};
/// Re-export reaction types.
pub use reaction::{GuessStatus, Reaction, ReactionStatus};
/// Re-export settings.
pub use settings::Settings;
