//! A player's session: score, rounds, and reaction history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::difficulty::DifficultyProfile;
use crate::id::{GameId, ReactionId};
use crate::reaction::{GuessStatus, Reaction};

/// One entry in a game's guess log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// The reaction the guess was made on.
    pub reaction_id: ReactionId,
    /// The guessed duration.
    pub guess: u32,
    /// The reaction's target duration.
    pub target_ms: u32,
    /// `|target - guess|`.
    pub deviation_ms: u32,
    /// How the guess was classified.
    pub status: GuessStatus,
    /// When the guess was scored.
    pub at: DateTime<Utc>,
}

/// One player's session under a single difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// The player.
    pub user_id: String,
    /// The profile every reaction in this game is drawn from.
    pub difficulty: DifficultyProfile,
    /// Points earned so far.
    pub score: u32,
    /// Completed reactions so far.
    pub round_count: u32,
    /// Unique id.
    pub id: GameId,
    /// Completed reactions, oldest first.
    pub reactions: Vec<Reaction>,
    /// Every scored guess, oldest first.
    pub guess_log: Vec<GuessRecord>,
}

impl Game {
    /// An empty game for `user_id`.
    pub fn new(id: GameId, user_id: impl Into<String>, difficulty: DifficultyProfile) -> Self {
        Self {
            user_id: user_id.into(),
            difficulty,
            score: 0,
            round_count: 0,
            id,
            reactions: Vec::new(),
            guess_log: Vec::new(),
        }
    }

    /// Append a guess outcome to the log.
    pub fn record_guess(&mut self, record: GuessRecord) {
        self.guess_log.push(record);
    }

    /// Archive a completed reaction, awarding `points` and counting the round.
    pub fn complete_round(&mut self, reaction: Reaction, points: u32) {
        self.score = self.score.saturating_add(points);
        self.round_count = self.round_count.saturating_add(1);
        self.reactions.push(reaction);
    }
}
