//! Reaction creation and guess scoring.

use rand::rngs::StdRng;
use rx_core::{DifficultyProfile, GuessStatus, IdSource, Reaction};

use crate::error::{EngineError, EngineResult};
use crate::policy;

/// Creates reactions and scores guesses for one difficulty profile.
///
/// Scoring calls need a reaction bound through [`with_reaction`] first and
/// fail with [`EngineError::UndefinedReaction`] otherwise. Scoring never
/// mutates the reaction; the caller applies the result.
///
/// [`with_reaction`]: ReactionService::with_reaction
#[derive(Debug)]
pub struct ReactionService {
    difficulty: DifficultyProfile,
    bound_target_ms: Option<u32>,
    rng: StdRng,
    ids: Box<dyn IdSource>,
}

impl ReactionService {
    /// A service drawing durations from `rng` and ids from `ids`.
    pub fn with_sources(difficulty: DifficultyProfile, rng: StdRng, ids: Box<dyn IdSource>) -> Self {
        Self {
            difficulty,
            bound_target_ms: None,
            rng,
            ids,
        }
    }

    /// Bind the reaction subsequent scoring calls refer to.
    pub fn with_reaction(&mut self, reaction: &Reaction) -> &mut Self {
        self.bound_target_ms = Some(reaction.duration_ms);
        self
    }

    /// Draw the id for a new game from this service's id source.
    pub fn next_game_id(&mut self) -> rx_core::GameId {
        self.ids.game_id()
    }

    /// A fresh reaction with a random duration and a new id.
    pub fn create_reaction_with_random_duration(&mut self) -> Reaction {
        let duration_ms = policy::random_duration(&self.difficulty, &mut self.rng);
        Reaction::new(self.ids.reaction_id(), duration_ms)
    }

    /// Whether `guess` lands within tolerance of the bound reaction.
    pub fn guess_is_right(&self, guess: u32) -> EngineResult<bool> {
        let target_ms = self.bound_target_ms.ok_or(EngineError::UndefinedReaction)?;
        Ok(policy::is_within_tolerance(
            target_ms,
            guess,
            &self.difficulty,
        ))
    }

    /// Classify `guess` against the bound reaction.
    pub fn calculate_guess_deviation_status(&self, guess: u32) -> EngineResult<GuessStatus> {
        let target_ms = self.bound_target_ms.ok_or(EngineError::UndefinedReaction)?;
        Ok(policy::classify(target_ms, guess, &self.difficulty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rx_core::{ReactionId, ReactionStatus, SequentialIds};
    use uuid::Uuid;

    fn service(seed: u64) -> ReactionService {
        let profile = DifficultyProfile::custom("t", "Test", 1_000, 50).unwrap();
        ReactionService::with_sources(
            profile,
            StdRng::seed_from_u64(seed),
            Box::new(SequentialIds::starting_at(1)),
        )
    }

    #[test]
    fn scoring_unbound_fails() {
        let svc = service(1);
        assert_eq!(svc.guess_is_right(10), Err(EngineError::UndefinedReaction));
        assert_eq!(
            svc.calculate_guess_deviation_status(10),
            Err(EngineError::UndefinedReaction)
        );
    }

    #[test]
    fn created_reaction_is_fresh() {
        let mut svc = service(1);
        let r = svc.create_reaction_with_random_duration();
        assert_eq!(r.id, ReactionId(Uuid::from_u128(1)));
        assert!((1..=1_000).contains(&r.duration_ms));
        assert!(r.guesses.is_empty());
        assert!(!r.is_complete);
        assert_eq!(r.guess_status, GuessStatus::Waiting);
        assert_eq!(r.reaction_status, ReactionStatus::NotStarted);
        assert_eq!(svc.guess_is_right(r.duration_ms), Err(EngineError::UndefinedReaction));
    }

    #[test]
    fn created_reactions_get_distinct_ids() {
        let mut svc = service(1);
        let a = svc.create_reaction_with_random_duration();
        let b = svc.create_reaction_with_random_duration();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn same_seed_same_durations() {
        let mut a = service(77);
        let mut b = service(77);
        for _ in 0..10 {
            assert_eq!(
                a.create_reaction_with_random_duration().duration_ms,
                b.create_reaction_with_random_duration().duration_ms
            );
        }
    }

    #[test]
    fn bound_scoring_is_pure() {
        let mut svc = service(1);
        let reaction = Reaction::new(ReactionId(Uuid::from_u128(9)), 500);
        svc.with_reaction(&reaction);

        assert_eq!(svc.guess_is_right(520), Ok(true));
        assert_eq!(svc.guess_is_right(520), Ok(true));
        assert_eq!(svc.guess_is_right(300), Ok(false));
        assert_eq!(
            svc.calculate_guess_deviation_status(300),
            Ok(GuessStatus::InvalidLow)
        );
        assert_eq!(
            svc.calculate_guess_deviation_status(600),
            Ok(GuessStatus::InvalidHigh)
        );
        assert_eq!(
            svc.calculate_guess_deviation_status(500),
            Ok(GuessStatus::Valid)
        );
        assert_eq!(reaction.guesses, Vec::<u32>::new());
    }
}
