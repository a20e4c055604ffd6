/// Engine configuration for a game manager.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// RNG seed for reproducible durations. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Points awarded for each completed reaction.
    pub points_per_reaction: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            points_per_reaction: 1,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the points awarded per completed reaction (at least 1).
    pub fn with_points_per_reaction(mut self, points: u32) -> Self {
        self.points_per_reaction = points.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.points_per_reaction, 1);
    }

    #[test]
    fn builder_methods() {
        let cfg = GameConfig::default().with_seed(123).with_points_per_reaction(5);
        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.points_per_reaction, 5);
    }

    #[test]
    fn points_clamped() {
        let cfg = GameConfig::default().with_points_per_reaction(0);
        assert_eq!(cfg.points_per_reaction, 1);
    }
}
