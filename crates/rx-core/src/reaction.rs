//! A single timed challenge and its guess history.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::ReactionId;

/// Outcome of the most recent guess on a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuessStatus {
    /// No guess has been made yet.
    #[default]
    Waiting,
    /// The guess was within tolerance.
    Valid,
    /// The guess was too short.
    InvalidLow,
    /// The guess was too long.
    InvalidHigh,
}

impl fmt::Display for GuessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Valid => write!(f, "valid"),
            Self::InvalidLow => write!(f, "too low"),
            Self::InvalidHigh => write!(f, "too high"),
        }
    }
}

/// Where a reaction is in its visible lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionStatus {
    /// The countdown is running.
    #[default]
    NotStarted,
    /// The signal is live.
    Started,
    /// The duration has elapsed; guesses are still accepted.
    Ended,
}

impl fmt::Display for ReactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::Started => write!(f, "started"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// One timed challenge.
///
/// The duration is fixed at creation. Guesses are append-only and
/// `is_complete` only ever moves from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    /// Unique id.
    pub id: ReactionId,
    /// Target duration in milliseconds, `>= 1`.
    pub duration_ms: u32,
    /// Every guess made on this reaction, oldest first.
    pub guesses: Vec<u32>,
    /// Set once a guess lands within tolerance.
    pub is_complete: bool,
    /// Outcome of the latest guess.
    pub guess_status: GuessStatus,
    /// Lifecycle position.
    pub reaction_status: ReactionStatus,
}

impl Reaction {
    /// A fresh reaction with no guesses, waiting for its starting sequence.
    pub fn new(id: ReactionId, duration_ms: u32) -> Self {
        Self {
            id,
            duration_ms,
            guesses: Vec::new(),
            is_complete: false,
            guess_status: GuessStatus::Waiting,
            reaction_status: ReactionStatus::NotStarted,
        }
    }

    /// The latest guess, if any.
    pub fn last_guess(&self) -> Option<u32> {
        self.guesses.last().copied()
    }

    /// Number of guesses made so far.
    pub fn attempts(&self) -> usize {
        self.guesses.len()
    }

    /// Absolute deviation of the latest guess from the target.
    pub fn last_deviation(&self) -> Option<u32> {
        self.last_guess().map(|g| g.abs_diff(self.duration_ms))
    }

    /// True while the reaction can still take a guess.
    pub fn accepts_guess(&self) -> bool {
        !self.is_complete
            && matches!(
                self.reaction_status,
                ReactionStatus::Started | ReactionStatus::Ended
            )
    }
}
