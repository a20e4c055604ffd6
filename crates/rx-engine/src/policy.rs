//! Duration and deviation policy.
//!
//! Draws target durations from a difficulty profile and judges guesses
//! against its tolerance. Everything here is a pure function of its inputs
//! (plus the random source for [`random_duration`]).

use rand::Rng;
use rx_core::{DifficultyProfile, GuessStatus};

/// Draw a target duration uniformly from `1..=max_duration_ms`.
pub fn random_duration<R: Rng + ?Sized>(profile: &DifficultyProfile, rng: &mut R) -> u32 {
    rng.random_range(1..=profile.max_duration_ms.max(1))
}

/// `|target - guess|`.
pub fn deviation(target_ms: u32, guess_ms: u32) -> u32 {
    target_ms.abs_diff(guess_ms)
}

/// Whether `guess_ms` lands within the profile's tolerance of `target_ms`.
pub fn is_within_tolerance(target_ms: u32, guess_ms: u32, profile: &DifficultyProfile) -> bool {
    deviation(target_ms, guess_ms) <= profile.deviation_tolerance_ms
}

/// Classify a guess. Never returns [`GuessStatus::Waiting`].
pub fn classify(target_ms: u32, guess_ms: u32, profile: &DifficultyProfile) -> GuessStatus {
    if is_within_tolerance(target_ms, guess_ms, profile) {
        GuessStatus::Valid
    } else if guess_ms < target_ms {
        GuessStatus::InvalidLow
    } else {
        GuessStatus::InvalidHigh
    }
}
