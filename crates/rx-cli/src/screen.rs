//! Renders game events to the terminal.

use colored::Colorize;

use rx_core::Coloring;
use rx_engine::{EngineResult, GameEvent, GameManager, Observer};

/// Paints each phase of a round in the configured colors.
pub struct Screen {
    coloring: Coloring,
}

impl Screen {
    pub const ID: &'static str = "screen";

    pub fn new(coloring: Coloring) -> Self {
        Self { coloring }
    }
}

impl Observer for Screen {
    fn id(&self) -> &str {
        Self::ID
    }

    fn update(&self, manager: &mut GameManager, event: &GameEvent) -> EngineResult<()> {
        match event {
            GameEvent::StartingSequence { .. } => {
                let round = manager.current_game()?.round_count + 1;
                println!(
                    "  {} {}",
                    format!("Round {round}").bold(),
                    "get ready...".color(self.coloring.countdown.as_str())
                );
            }
            GameEvent::ReactionStart { .. } => {
                println!("  {}", "GO".color(self.coloring.waiting.as_str()).bold());
            }
            GameEvent::ReactionEnd { .. } => {
                println!("  {}", "STOP".color(self.coloring.end.as_str()).bold());
                println!("  How long was the signal live (ms)?");
            }
            GameEvent::InvalidGuess { guess, status, .. } => {
                println!("  {guess}ms is {}, try again", status.to_string().yellow());
            }
            GameEvent::CompleteReaction {
                reaction,
                guess,
                score,
                ..
            } => {
                println!(
                    "  {} target was {}ms, you said {guess}ms (score {score})",
                    "Correct!".green().bold(),
                    reaction.duration_ms
                );
            }
        }
        Ok(())
    }
}
