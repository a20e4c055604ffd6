use std::fmt;

use rx_core::{GuessStatus, Reaction};
use serde::{Deserialize, Serialize};

/// The discriminant of a [`GameEvent`], also used as its event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEventKind {
    /// A countdown began for the current reaction.
    StartingSequence,
    /// The signal went live.
    ReactionStart,
    /// The reaction's duration elapsed.
    ReactionEnd,
    /// A guess was rejected.
    InvalidGuess,
    /// A guess was accepted and the reaction completed.
    CompleteReaction,
}

impl GameEventKind {
    /// The event name observers see.
    pub fn name(self) -> &'static str {
        match self {
            Self::StartingSequence => "starting_sequence",
            Self::ReactionStart => "reaction_start",
            Self::ReactionEnd => "reaction_end",
            Self::InvalidGuess => "invalid_guess",
            Self::CompleteReaction => "complete_reaction",
        }
    }
}

impl fmt::Display for GameEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a dispatch broadcasts to observers.
///
/// Every variant carries a snapshot of the reaction as it was right after
/// the dispatch applied its change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// A countdown began.
    StartingSequence {
        /// The reaction about to run.
        reaction: Reaction,
    },
    /// The signal went live.
    ReactionStart {
        /// The running reaction.
        reaction: Reaction,
    },
    /// The duration elapsed.
    ReactionEnd {
        /// The ended reaction.
        reaction: Reaction,
    },
    /// A guess fell outside tolerance; the reaction stays open.
    InvalidGuess {
        /// The reaction after the guess was appended.
        reaction: Reaction,
        /// The rejected guess.
        guess: u32,
        /// Too low or too high.
        status: GuessStatus,
    },
    /// A guess was accepted.
    CompleteReaction {
        /// The completed reaction.
        reaction: Reaction,
        /// The accepted guess.
        guess: u32,
        /// Game score after this reaction.
        score: u32,
        /// Game round count after this reaction.
        round_count: u32,
    },
}

impl GameEvent {
    /// The discriminant of this event.
    pub fn kind(&self) -> GameEventKind {
        match self {
            Self::StartingSequence { .. } => GameEventKind::StartingSequence,
            Self::ReactionStart { .. } => GameEventKind::ReactionStart,
            Self::ReactionEnd { .. } => GameEventKind::ReactionEnd,
            Self::InvalidGuess { .. } => GameEventKind::InvalidGuess,
            Self::CompleteReaction { .. } => GameEventKind::CompleteReaction,
        }
    }

    /// The reaction snapshot carried by this event.
    pub fn reaction(&self) -> &Reaction {
        match self {
            Self::StartingSequence { reaction }
            | Self::ReactionStart { reaction }
            | Self::ReactionEnd { reaction }
            | Self::InvalidGuess { reaction, .. }
            | Self::CompleteReaction { reaction, .. } => reaction,
        }
    }
}

/// Accumulates broadcast events, oldest first.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// All recorded events.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Recorded events of one kind.
    pub fn of_kind(&self, kind: GameEventKind) -> Vec<&GameEvent> {
        self.events.iter().filter(|e| e.kind() == kind).collect()
    }

    /// The kinds of all recorded events, in order.
    pub fn kinds(&self) -> Vec<GameEventKind> {
        self.events.iter().map(GameEvent::kind).collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rx_core::ReactionId;
    use uuid::Uuid;

    fn reaction(duration_ms: u32) -> Reaction {
        Reaction::new(ReactionId(Uuid::from_u128(1)), duration_ms)
    }

    fn start(duration_ms: u32) -> GameEvent {
        GameEvent::StartingSequence {
            reaction: reaction(duration_ms),
        }
    }

    #[test]
    fn kind_and_name_agree_with_serde_tag() {
        let event = GameEvent::InvalidGuess {
            reaction: reaction(500),
            guess: 300,
            status: GuessStatus::InvalidLow,
        };
        assert_eq!(event.kind(), GameEventKind::InvalidGuess);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], event.kind().name());
        assert_eq!(json["status"], "INVALID_LOW");
        assert_eq!(json["reaction"]["duration_ms"], 500);
    }

    #[test]
    fn events_round_trip_by_tag() {
        let event = GameEvent::CompleteReaction {
            reaction: reaction(500),
            guess: 510,
            score: 1,
            round_count: 1,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn event_log_max_events_trims() {
        let mut log = EventLog::new(2);
        for d in 1..=5 {
            log.push(start(d));
        }
        assert_eq!(log.len(), 2);
        // Oldest events were dropped, newest remain
        assert_eq!(log.events()[0].reaction().duration_ms, 4);
        assert_eq!(log.events()[1].reaction().duration_ms, 5);
    }

    #[test]
    fn event_log_filters_by_kind() {
        let mut log = EventLog::new(0);
        log.push(start(10));
        log.push(GameEvent::ReactionStart {
            reaction: reaction(10),
        });
        log.push(start(20));
        assert_eq!(log.of_kind(GameEventKind::StartingSequence).len(), 2);
        assert_eq!(log.of_kind(GameEventKind::ReactionEnd).len(), 0);
        assert_eq!(
            log.kinds(),
            vec![
                GameEventKind::StartingSequence,
                GameEventKind::ReactionStart,
                GameEventKind::StartingSequence
            ]
        );
    }

    #[test]
    fn event_log_starts_empty() {
        let mut log = EventLog::new(0);
        assert!(log.is_empty());
        log.push(start(1));
        assert!(!log.is_empty());
    }
}
