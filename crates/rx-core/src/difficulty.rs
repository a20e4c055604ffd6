//! Difficulty profiles bounding reaction duration and accepted deviation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Cosmetic colors for the three visible phases of a round.
///
/// The engine never looks at these; front ends paint with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coloring {
    /// Color shown while the countdown runs.
    pub countdown: String,
    /// Color shown while the signal is live.
    pub waiting: String,
    /// Color shown once the reaction window has ended.
    pub end: String,
}

impl Default for Coloring {
    fn default() -> Self {
        Self {
            countdown: "cyan".to_string(),
            waiting: "yellow".to_string(),
            end: "green".to_string(),
        }
    }
}

/// The built-in difficulties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Short durations, wide tolerance.
    Easy,
    /// Medium durations and tolerance.
    Medium,
    /// Long durations, narrow tolerance.
    Hard,
}

impl Difficulty {
    /// Every built-in difficulty, easiest first.
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// The stable id of this difficulty.
    pub fn id(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Build the profile for this difficulty.
    pub fn profile(self) -> DifficultyProfile {
        let (name, max_duration_ms, deviation_tolerance_ms) = match self {
            Self::Easy => ("Easy", 3_000, 300),
            Self::Medium => ("Medium", 5_000, 200),
            Self::Hard => ("Hard", 8_000, 100),
        };
        let profile = DifficultyProfile {
            id: self.id().to_string(),
            name: name.to_string(),
            max_duration_ms,
            deviation_tolerance_ms,
            coloring: None,
        };
        match self {
            // Hard flashes red while the signal is live.
            Self::Hard => profile.with_coloring(Coloring {
                countdown: "magenta".to_string(),
                waiting: "red".to_string(),
                end: "green".to_string(),
            }),
            Self::Easy | Self::Medium => profile,
        }
    }

    /// Parse a difficulty from its id, ignoring case.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.id() == lower)
            .ok_or_else(|| CoreError::UnknownDifficulty(s.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A named configuration bounding the maximum duration of a reaction and
/// the deviation a guess may have while still counting as right.
///
/// Invariant: `deviation_tolerance_ms < max_duration_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Stable identifier, e.g. `"easy"`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Upper bound (inclusive) for randomized reaction durations.
    pub max_duration_ms: u32,
    /// Largest accepted `|target - guess|`.
    pub deviation_tolerance_ms: u32,
    /// Optional cosmetic colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coloring: Option<Coloring>,
}

impl DifficultyProfile {
    /// Build a custom profile, rejecting ones that break the tolerance invariant.
    pub fn custom(
        id: impl Into<String>,
        name: impl Into<String>,
        max_duration_ms: u32,
        deviation_tolerance_ms: u32,
    ) -> CoreResult<Self> {
        let id = id.into();
        if max_duration_ms == 0 || deviation_tolerance_ms >= max_duration_ms {
            return Err(CoreError::InvalidProfile {
                id,
                max_duration_ms,
                tolerance_ms: deviation_tolerance_ms,
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            max_duration_ms,
            deviation_tolerance_ms,
            coloring: None,
        })
    }

    /// Attach cosmetic colors.
    pub fn with_coloring(mut self, coloring: Coloring) -> Self {
        self.coloring = Some(coloring);
        self
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::Easy.profile()
    }
}

impl From<Difficulty> for DifficultyProfile {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.profile()
    }
}

impl fmt::Display for DifficultyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (max {}ms, ±{}ms)",
            self.name, self.max_duration_ms, self.deviation_tolerance_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn builtin_profiles_hold_invariant() {
        for difficulty in Difficulty::ALL {
            let p = difficulty.profile();
            assert!(p.max_duration_ms > 0);
            assert!(p.deviation_tolerance_ms < p.max_duration_ms, "{}", p.id);
        }
    }

    #[test]
    fn only_hard_brings_its_own_coloring() {
        assert_eq!(Difficulty::Easy.profile().coloring, None);
        assert_eq!(Difficulty::Medium.profile().coloring, None);
        let hard = Difficulty::Hard.profile().coloring.unwrap();
        assert_eq!(hard.waiting, "red");
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!(Difficulty::parse("HARD").unwrap(), Difficulty::Hard);
        assert_eq!(Difficulty::parse(" medium ").unwrap(), Difficulty::Medium);
    }

    #[test]
    fn parse_unknown_fails() {
        let err = Difficulty::parse("nightmare").unwrap_err();
        assert_eq!(err, CoreError::UnknownDifficulty("nightmare".into()));
    }

    #[test]
    fn custom_rejects_zero_max() {
        assert!(DifficultyProfile::custom("z", "Zero", 0, 0).is_err());
    }

    #[test]
    fn display_profile() {
        assert_eq!(
            Difficulty::Easy.profile().to_string(),
            "Easy (max 3000ms, ±300ms)"
        );
    }

    proptest! {
        #[test]
        fn custom_accepts_iff_tolerance_below_max(max in 0u32..10_000, tol in 0u32..10_000) {
            let result = DifficultyProfile::custom("c", "Custom", max, tol);
            prop_assert_eq!(result.is_ok(), max > 0 && tol < max);
        }
    }
}
