//! Per-game statistics and leaderboard ranking.
//!
//! Deviation is measured on the accepted (final) guess of each completed
//! reaction, which is what a scoreboard shows next to the score.

use rx_core::{Game, Reaction};

/// Summary numbers for one game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameStats {
    /// Completed reactions.
    pub rounds: u32,
    /// Total guesses across completed reactions.
    pub attempts: usize,
    /// Mean deviation of the accepted guesses, 0 for a game with no rounds.
    pub average_deviation_ms: f64,
    /// Smallest deviation of an accepted guess.
    pub best_deviation_ms: Option<u32>,
}

impl GameStats {
    /// Compute statistics from a game's completed reactions.
    pub fn from_game(game: &Game) -> Self {
        let deviations: Vec<u32> = game
            .reactions
            .iter()
            .filter_map(Reaction::last_deviation)
            .collect();
        let average_deviation_ms = if deviations.is_empty() {
            0.0
        } else {
            deviations.iter().map(|&d| f64::from(d)).sum::<f64>() / deviations.len() as f64
        };
        Self {
            rounds: game.round_count,
            attempts: game.reactions.iter().map(|r| r.attempts()).sum(),
            average_deviation_ms,
            best_deviation_ms: deviations.iter().copied().min(),
        }
    }

    /// Mean guesses per completed reaction, 0 for a game with no rounds.
    pub fn attempts_per_round(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            self.attempts as f64 / f64::from(self.rounds)
        }
    }
}

/// Rank games by score, highest first, optionally keeping only one
/// difficulty. Ties go to the lower average deviation.
pub fn rank<'a>(games: &'a [Game], difficulty_id: Option<&str>) -> Vec<&'a Game> {
    let mut ranked: Vec<(&Game, f64)> = games
        .iter()
        .filter(|g| difficulty_id.is_none_or(|id| g.difficulty.id == id))
        .map(|g| (g, GameStats::from_game(g).average_deviation_ms))
        .collect();
    ranked.sort_by(|(a, a_dev), (b, b_dev)| {
        b.score
            .cmp(&a.score)
            .then_with(|| a_dev.total_cmp(b_dev))
    });
    ranked.into_iter().map(|(g, _)| g).collect()
}
