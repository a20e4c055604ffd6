use std::rc::Rc;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rx_core::{Game, GuessRecord, GuessStatus, RandomIds, Reaction, ReactionStatus, Settings};
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::error::{EngineError, EngineResult};
use crate::event::GameEvent;
use crate::observer::{Observer, ObserverRegistry};
use crate::policy;
use crate::service::ReactionService;

/// Owns the current game and reaction and drives the round state machine.
///
/// ```text
/// NOT_STARTED --start--> STARTED --end--> ENDED
///                           |               |
///                           +----guess------+--(valid)--> COMPLETE
/// ```
///
/// Every dispatch updates state first and then broadcasts one event,
/// synchronously, to each observer in registration order. Timing is not the
/// manager's concern: whoever observes `ReactionStart` calls
/// [`dispatch_reaction_end`](Self::dispatch_reaction_end) once the duration
/// has elapsed.
///
/// Observers are held behind `Rc`, which keeps a manager on one thread.
pub struct GameManager {
    settings: Settings,
    config: GameConfig,
    service: ReactionService,
    game: Option<Game>,
    reaction: Option<Reaction>,
    observers: ObserverRegistry,
    observer_failures: usize,
}

impl std::fmt::Debug for GameManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameManager")
            .field("difficulty", &self.settings.difficulty.id)
            .field("game", &self.game.as_ref().map(|g| g.id))
            .field("reaction", &self.reaction.as_ref().map(|r| r.id))
            .field("observers", &self.observers)
            .finish()
    }
}

impl GameManager {
    /// A manager for `settings`, seeding durations from `config`.
    pub fn new(settings: Settings, config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let service =
            ReactionService::with_sources(settings.difficulty.clone(), rng, Box::new(RandomIds));
        Self::with_service(settings, config, service)
    }

    /// A manager using an already-built reaction service.
    pub fn with_service(settings: Settings, config: GameConfig, service: ReactionService) -> Self {
        Self {
            settings,
            config,
            service,
            game: None,
            reaction: None,
            observers: ObserverRegistry::new(),
            observer_failures: 0,
        }
    }

    /// The settings this manager was built with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the current game.
    pub fn set_current_game(&mut self, game: Game) {
        self.game = Some(game);
    }

    /// Replace the current reaction.
    pub fn set_current_reaction(&mut self, reaction: Reaction) {
        self.reaction = Some(reaction);
    }

    /// The current game.
    pub fn current_game(&self) -> EngineResult<&Game> {
        self.game.as_ref().ok_or(EngineError::NoCurrentGame)
    }

    /// The current reaction.
    pub fn current_reaction(&self) -> EngineResult<&Reaction> {
        self.reaction.as_ref().ok_or(EngineError::NoCurrentReaction)
    }

    /// Install a fresh game for the configured player along with its first
    /// reaction. Nothing is broadcast.
    pub fn start_game(&mut self) {
        let game = Game::new(
            self.service.next_game_id(),
            self.settings.user_id.clone(),
            self.settings.difficulty.clone(),
        );
        let reaction = self.service.create_reaction_with_random_duration();
        debug!(game = %game.id, reaction = %reaction.id, duration_ms = reaction.duration_ms, "game started");
        self.game = Some(game);
        self.reaction = Some(reaction);
    }

    /// Register an observer; an existing one with the same id is replaced.
    pub fn subscribe(&mut self, observer: Rc<dyn Observer>) {
        self.observers.subscribe(observer);
    }

    /// Remove the observer with `id`. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: &str) -> bool {
        self.observers.unsubscribe(id)
    }

    /// The registered observers.
    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }

    /// How many observer calls have failed so far.
    pub fn observer_failures(&self) -> usize {
        self.observer_failures
    }

    /// Begin the countdown for the current reaction.
    pub fn dispatch_starting_sequence(&mut self) -> EngineResult<()> {
        let reaction = self.transition(
            "start sequence",
            &[
                ReactionStatus::NotStarted,
                ReactionStatus::Started,
                ReactionStatus::Ended,
            ],
            ReactionStatus::NotStarted,
        )?;
        self.broadcast(GameEvent::StartingSequence { reaction });
        Ok(())
    }

    /// Fire the signal. The caller schedules [`Self::dispatch_reaction_end`].
    pub fn dispatch_reaction_start(&mut self) -> EngineResult<()> {
        let reaction = self.transition(
            "start reaction",
            &[ReactionStatus::NotStarted],
            ReactionStatus::Started,
        )?;
        self.broadcast(GameEvent::ReactionStart { reaction });
        Ok(())
    }

    /// Close the reaction window. Guesses are still accepted afterwards.
    pub fn dispatch_reaction_end(&mut self) -> EngineResult<()> {
        let reaction = self.transition(
            "end reaction",
            &[ReactionStatus::Started],
            ReactionStatus::Ended,
        )?;
        self.broadcast(GameEvent::ReactionEnd { reaction });
        Ok(())
    }

    /// Score a guess against the current reaction.
    ///
    /// A valid guess completes the reaction and updates the game's score,
    /// round count and history. An invalid one leaves the reaction open.
    pub fn dispatch_add_guess(&mut self, guess: u32) -> EngineResult<GuessStatus> {
        let reaction = self.reaction.as_ref().ok_or(EngineError::NoCurrentReaction)?;
        if !reaction.accepts_guess() {
            return Err(EngineError::InvalidTransition {
                operation: "add guess",
                status: reaction.reaction_status,
                complete: reaction.is_complete,
            });
        }
        let game = self.game.as_mut().ok_or(EngineError::NoCurrentGame)?;
        let status = self
            .service
            .with_reaction(reaction)
            .calculate_guess_deviation_status(guess)?;

        let Some(reaction) = self.reaction.as_mut() else {
            return Err(EngineError::NoCurrentReaction);
        };
        reaction.guesses.push(guess);
        reaction.guess_status = status;
        game.record_guess(GuessRecord {
            reaction_id: reaction.id,
            guess,
            target_ms: reaction.duration_ms,
            deviation_ms: policy::deviation(reaction.duration_ms, guess),
            status,
            at: Utc::now(),
        });
        debug!(reaction = %reaction.id, guess, status = %status, "guess scored");

        let event = if status == GuessStatus::Valid {
            reaction.is_complete = true;
            game.complete_round(reaction.clone(), self.config.points_per_reaction);
            GameEvent::CompleteReaction {
                reaction: reaction.clone(),
                guess,
                score: game.score,
                round_count: game.round_count,
            }
        } else {
            GameEvent::InvalidGuess {
                reaction: reaction.clone(),
                guess,
                status,
            }
        };
        self.broadcast(event);
        Ok(status)
    }

    /// Replace the current reaction with a fresh one. Completed reactions are
    /// already archived in the game; an unfinished one is dropped. Nothing
    /// is broadcast.
    pub fn dispatch_generate_new_with_random_duration(&mut self) {
        let reaction = self.service.create_reaction_with_random_duration();
        debug!(reaction = %reaction.id, duration_ms = reaction.duration_ms, "new reaction");
        self.reaction = Some(reaction);
    }

    /// Move the current reaction to `next` if its status is in `from` and it
    /// is not complete. Returns a snapshot for the event payload.
    fn transition(
        &mut self,
        operation: &'static str,
        from: &[ReactionStatus],
        next: ReactionStatus,
    ) -> EngineResult<Reaction> {
        let reaction = self.reaction.as_mut().ok_or(EngineError::NoCurrentReaction)?;
        if reaction.is_complete || !from.contains(&reaction.reaction_status) {
            return Err(EngineError::InvalidTransition {
                operation,
                status: reaction.reaction_status,
                complete: reaction.is_complete,
            });
        }
        debug!(reaction = %reaction.id, from = %reaction.reaction_status, to = %next, "{operation}");
        reaction.reaction_status = next;
        Ok(reaction.clone())
    }

    /// Deliver `event` to every observer registered when the broadcast began.
    fn broadcast(&mut self, event: GameEvent) {
        let kind = event.kind();
        for observer in self.observers.snapshot() {
            if let Err(err) = observer.update(self, &event) {
                self.observer_failures += 1;
                warn!(observer = observer.id(), event = %kind, error = %err, "observer failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::event::GameEventKind;
    use rx_core::{DifficultyProfile, GameId, ReactionId, SequentialIds};
    use uuid::Uuid;

    fn settings() -> Settings {
        Settings::default()
            .with_user("tester")
            .with_difficulty(DifficultyProfile::custom("t", "Test", 1_000, 50).unwrap())
    }

    fn manager_with(duration_ms: u32) -> GameManager {
        let service = ReactionService::with_sources(
            settings().difficulty,
            StdRng::seed_from_u64(1),
            Box::new(SequentialIds::starting_at(100)),
        );
        let mut m = GameManager::with_service(settings(), GameConfig::default(), service);
        m.set_current_game(Game::new(
            GameId(Uuid::from_u128(1)),
            "tester",
            settings().difficulty,
        ));
        m.set_current_reaction(Reaction::new(ReactionId(Uuid::from_u128(2)), duration_ms));
        m
    }

    struct Kinds {
        seen: RefCell<Vec<GameEventKind>>,
    }

    impl Observer for Kinds {
        fn id(&self) -> &str {
            "kinds"
        }
        fn update(&self, _manager: &mut GameManager, event: &GameEvent) -> EngineResult<()> {
            self.seen.borrow_mut().push(event.kind());
            Ok(())
        }
    }

    #[test]
    fn accessors_fail_before_initialization() {
        let m = GameManager::new(settings(), GameConfig::default().with_seed(1));
        assert_eq!(m.current_game().unwrap_err(), EngineError::NoCurrentGame);
        assert_eq!(
            m.current_reaction().unwrap_err(),
            EngineError::NoCurrentReaction
        );
        assert_eq!(m.settings().user_id, "tester");
    }

    #[test]
    fn dispatch_without_reaction_fails() {
        let mut m = GameManager::new(settings(), GameConfig::default().with_seed(1));
        assert_eq!(
            m.dispatch_starting_sequence(),
            Err(EngineError::NoCurrentReaction)
        );
        assert_eq!(m.dispatch_add_guess(1), Err(EngineError::NoCurrentReaction));
    }

    #[test]
    fn guess_without_game_fails() {
        let mut m = GameManager::new(settings(), GameConfig::default().with_seed(1));
        m.set_current_reaction(Reaction::new(ReactionId(Uuid::from_u128(2)), 500));
        m.dispatch_reaction_start().unwrap();
        assert_eq!(m.dispatch_add_guess(500), Err(EngineError::NoCurrentGame));
        assert!(m.current_reaction().unwrap().guesses.is_empty());
    }

    #[test]
    fn start_game_installs_game_and_reaction() {
        let mut m = GameManager::new(settings(), GameConfig::default().with_seed(3));
        m.start_game();
        let game = m.current_game().unwrap();
        assert_eq!(game.user_id, "tester");
        assert_eq!(game.difficulty.id, "t");
        let reaction = m.current_reaction().unwrap();
        assert!((1..=1_000).contains(&reaction.duration_ms));
        assert_eq!(reaction.reaction_status, ReactionStatus::NotStarted);
    }

    #[test]
    fn full_round_transitions() {
        let mut m = manager_with(500);
        let kinds = Rc::new(Kinds {
            seen: RefCell::new(Vec::new()),
        });
        m.subscribe(kinds.clone());

        m.dispatch_starting_sequence().unwrap();
        m.dispatch_reaction_start().unwrap();
        assert_eq!(
            m.current_reaction().unwrap().reaction_status,
            ReactionStatus::Started
        );
        m.dispatch_reaction_end().unwrap();
        assert_eq!(m.dispatch_add_guess(100), Ok(GuessStatus::InvalidLow));
        assert_eq!(m.dispatch_add_guess(505), Ok(GuessStatus::Valid));

        assert_eq!(
            *kinds.seen.borrow(),
            vec![
                GameEventKind::StartingSequence,
                GameEventKind::ReactionStart,
                GameEventKind::ReactionEnd,
                GameEventKind::InvalidGuess,
                GameEventKind::CompleteReaction,
            ]
        );
        let game = m.current_game().unwrap();
        assert_eq!(game.guess_log.len(), 2);
        assert_eq!(game.guess_log[0].deviation_ms, 400);
        assert_eq!(game.reactions.len(), 1);
        assert_eq!(game.reactions[0].guesses, vec![100, 505]);
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut m = manager_with(500);
        m.dispatch_reaction_start().unwrap();
        assert!(matches!(
            m.dispatch_reaction_start(),
            Err(EngineError::InvalidTransition {
                status: ReactionStatus::Started,
                ..
            })
        ));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut m = manager_with(500);
        assert!(matches!(
            m.dispatch_reaction_end(),
            Err(EngineError::InvalidTransition {
                status: ReactionStatus::NotStarted,
                ..
            })
        ));
    }

    #[test]
    fn completed_reaction_is_frozen() {
        let mut m = manager_with(500);
        m.dispatch_reaction_start().unwrap();
        m.dispatch_add_guess(500).unwrap();

        for result in [
            m.dispatch_starting_sequence(),
            m.dispatch_reaction_start(),
            m.dispatch_reaction_end(),
        ] {
            assert!(matches!(
                result,
                Err(EngineError::InvalidTransition { complete: true, .. })
            ));
        }
        assert!(matches!(
            m.dispatch_add_guess(500),
            Err(EngineError::InvalidTransition { complete: true, .. })
        ));
        let reaction = m.current_reaction().unwrap();
        assert_eq!(reaction.guesses, vec![500]);
        assert_eq!(reaction.reaction_status, ReactionStatus::Started);
        assert_eq!(m.current_game().unwrap().score, 1);
    }

    #[test]
    fn generate_new_replaces_current_without_broadcast() {
        let mut m = manager_with(500);
        let kinds = Rc::new(Kinds {
            seen: RefCell::new(Vec::new()),
        });
        m.subscribe(kinds.clone());
        let old = m.current_reaction().unwrap().id;

        m.dispatch_generate_new_with_random_duration();

        let new = m.current_reaction().unwrap();
        assert_ne!(new.id, old);
        assert_eq!(new.id, ReactionId(Uuid::from_u128(100)));
        assert_eq!(new.reaction_status, ReactionStatus::NotStarted);
        assert!(kinds.seen.borrow().is_empty());
    }

    #[test]
    fn points_per_reaction_from_config() {
        let mut m = manager_with(500);
        m.config = GameConfig::default().with_points_per_reaction(10);
        m.dispatch_reaction_start().unwrap();
        m.dispatch_add_guess(510).unwrap();
        let game = m.current_game().unwrap();
        assert_eq!(game.score, 10);
        assert_eq!(game.round_count, 1);
    }
}
