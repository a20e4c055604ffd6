use crate::error::EngineResult;
use crate::event::GameEvent;
use crate::manager::GameManager;
use crate::observer::Observer;

/// Starts the next round whenever a reaction completes.
///
/// On `CompleteReaction` it generates a new reaction and dispatches its
/// starting sequence. With a round limit it stops once the game has that
/// many completed rounds.
#[derive(Debug, Clone, Default)]
pub struct AutoAdvance {
    round_limit: Option<u32>,
}

impl AutoAdvance {
    /// Observer id.
    pub const ID: &'static str = "auto_advance";

    /// Advance after every completed reaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop advancing once `rounds` reactions have completed.
    pub fn with_round_limit(mut self, rounds: u32) -> Self {
        self.round_limit = Some(rounds);
        self
    }

    /// Whether a game with `round_count` completed rounds should continue.
    pub fn should_continue(&self, round_count: u32) -> bool {
        self.round_limit.is_none_or(|limit| round_count < limit)
    }
}

impl Observer for AutoAdvance {
    fn id(&self) -> &str {
        Self::ID
    }

    fn update(&self, manager: &mut GameManager, event: &GameEvent) -> EngineResult<()> {
        let GameEvent::CompleteReaction { round_count, .. } = event else {
            return Ok(());
        };
        if !self.should_continue(*round_count) {
            return Ok(());
        }
        manager.dispatch_generate_new_with_random_duration();
        manager.dispatch_starting_sequence()
    }
}
