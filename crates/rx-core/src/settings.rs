use serde::{Deserialize, Serialize};

use crate::difficulty::{Coloring, DifficultyProfile};

/// What a front end hands to the engine before a game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// The player.
    pub user_id: String,
    /// The profile reactions are drawn from.
    pub difficulty: DifficultyProfile,
    /// Colors for the three phases of a round.
    pub coloring: Coloring,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_id: "anonymous".to_string(),
            difficulty: DifficultyProfile::default(),
            coloring: Coloring::default(),
        }
    }
}

impl Settings {
    /// Set the player id.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Set the difficulty profile.
    pub fn with_difficulty(mut self, difficulty: impl Into<DifficultyProfile>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    /// The coloring to paint with: the profile's own if it has one.
    pub fn effective_coloring(&self) -> &Coloring {
        self.difficulty.coloring.as_ref().unwrap_or(&self.coloring)
    }
}
