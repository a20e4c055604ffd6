use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a single reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionId(pub Uuid);

/// Unique identifier of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub Uuid);

impl fmt::Display for ReactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Supplies unique tokens for games and reactions.
///
/// Production code uses [`RandomIds`]; tests substitute [`SequentialIds`]
/// to get reproducible ids.
pub trait IdSource: fmt::Debug {
    /// Produce the next unique token.
    fn next_uuid(&mut self) -> Uuid;

    /// Produce a fresh reaction id.
    fn reaction_id(&mut self) -> ReactionId {
        ReactionId(self.next_uuid())
    }

    /// Produce a fresh game id.
    fn game_id(&mut self) -> GameId {
        GameId(self.next_uuid())
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_uuid(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic ids counting up from a starting value.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// Start counting at `first`.
    pub fn starting_at(first: u128) -> Self {
        Self { next: first }
    }
}

impl IdSource for SequentialIds {
    fn next_uuid(&mut self) -> Uuid {
        let id = Uuid::from_u128(self.next);
        self.next += 1;
        id
    }
}
