use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::error::EngineResult;
use crate::event::GameEvent;
use crate::manager::GameManager;
use crate::observer::Observer;

/// Schedules the end of a reaction.
///
/// On `ReactionStart` it records when `dispatch_reaction_end` becomes due,
/// `duration_ms` after the event. The owner of the event loop polls
/// [`remaining`](Self::remaining) or calls [`fire_if_due`](Self::fire_if_due).
/// Any other lifecycle event cancels the pending end.
#[derive(Debug, Default)]
pub struct ReactionTimer {
    due: Cell<Option<Instant>>,
}

impl ReactionTimer {
    /// Observer id.
    pub const ID: &'static str = "reaction_timer";

    /// A timer with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// When the pending end is due, if one is scheduled.
    pub fn due(&self) -> Option<Instant> {
        self.due.get()
    }

    /// Time left until the pending end, zero once overdue.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.get().map(|due| due.saturating_duration_since(now))
    }

    /// Schedule an end `after` from `now`.
    pub fn schedule(&self, now: Instant, after: Duration) {
        self.due.set(Some(now + after));
    }

    /// Drop the pending end.
    pub fn cancel(&self) {
        self.due.set(None);
    }

    /// Dispatch the reaction end if it is due at `now`. Returns whether it fired.
    pub fn fire_if_due(&self, manager: &mut GameManager, now: Instant) -> EngineResult<bool> {
        match self.due.get() {
            Some(due) if due <= now => {
                self.due.set(None);
                manager.dispatch_reaction_end()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl Observer for ReactionTimer {
    fn id(&self) -> &str {
        Self::ID
    }

    fn update(&self, _manager: &mut GameManager, event: &GameEvent) -> EngineResult<()> {
        match event {
            GameEvent::ReactionStart { reaction } => {
                self.schedule(
                    Instant::now(),
                    Duration::from_millis(u64::from(reaction.duration_ms)),
                );
            }
            GameEvent::StartingSequence { .. }
            | GameEvent::ReactionEnd { .. }
            | GameEvent::CompleteReaction { .. } => self.cancel(),
            GameEvent::InvalidGuess { .. } => {}
        }
        Ok(())
    }
}
