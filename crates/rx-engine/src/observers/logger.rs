use std::cell::Cell;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::EngineResult;
use crate::event::GameEvent;
use crate::manager::GameManager;
use crate::observer::Observer;

/// Forwards every event to `tracing`.
///
/// Also measures how long the signal was actually live, from
/// `ReactionStart` to `ReactionEnd`, which shows how far the front end's
/// timer drifted from the target.
#[derive(Debug, Default)]
pub struct EventLogger {
    started: Cell<Option<Instant>>,
}

impl EventLogger {
    /// Observer id.
    pub const ID: &'static str = "event_logger";

    /// A logger with no running measurement.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Observer for EventLogger {
    fn id(&self) -> &str {
        Self::ID
    }

    fn update(&self, _manager: &mut GameManager, event: &GameEvent) -> EngineResult<()> {
        let reaction = event.reaction();
        match event {
            GameEvent::StartingSequence { .. } => {
                debug!(
                    reaction = %reaction.id,
                    "new reaction with duration of {}ms",
                    reaction.duration_ms
                );
            }
            GameEvent::ReactionStart { .. } => {
                self.started.set(Some(Instant::now()));
                debug!(reaction = %reaction.id, "signal live");
            }
            GameEvent::ReactionEnd { .. } => {
                let elapsed = self
                    .started
                    .take()
                    .map(|t| u64::try_from(t.elapsed().as_millis()).unwrap_or(u64::MAX));
                debug!(
                    reaction = %reaction.id,
                    target_ms = reaction.duration_ms,
                    elapsed_ms = elapsed,
                    "signal ended"
                );
            }
            GameEvent::InvalidGuess { guess, status, .. } => {
                info!(reaction = %reaction.id, guess, status = %status, "guess rejected");
            }
            GameEvent::CompleteReaction {
                guess,
                score,
                round_count,
                ..
            } => {
                self.started.set(None);
                info!(
                    reaction = %reaction.id,
                    guess,
                    target_ms = reaction.duration_ms,
                    score,
                    round_count,
                    "reaction complete"
                );
            }
        }
        Ok(())
    }
}
