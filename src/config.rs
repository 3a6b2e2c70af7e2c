use crate::error::{Result, RosterError};
use crate::scheduler::random::RngSource;

/// Lowest accepted randomness, the sharpest preference bias.
pub const MIN_RANDOMNESS: u8 = 1;
/// Highest accepted randomness, the mildest preference bias.
pub const MAX_RANDOMNESS: u8 = 4;

/// Configuration for a scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// How random the weighted election is, in `[1, 4]`.
    ///
    /// A soldier ranking the duty at position `r` gets weight
    /// `1 / (r^(5 - randomness) + 1)`, so `1` strongly favors top choices
    /// while `4` keeps lower-ranked soldiers in contention.
    pub randomness: u8,
    /// Seed for the default random source. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            randomness: MAX_RANDOMNESS,
            seed: None,
        }
    }
}

impl SchedulerConfig {
    pub fn new(randomness: u8) -> Self {
        Self {
            randomness,
            ..Default::default()
        }
    }

    pub fn with_randomness(mut self, randomness: u8) -> Self {
        self.randomness = randomness;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject settings the weight formula is not defined for.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RANDOMNESS..=MAX_RANDOMNESS).contains(&self.randomness) {
            return Err(RosterError::InvalidRandomness(self.randomness));
        }
        Ok(())
    }

    /// Build the random source described by this configuration.
    pub fn random_source(&self) -> RngSource {
        match self.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::random::RandomSource;

    #[test]
    fn scheduler_config_default() {
        let cfg = SchedulerConfig::default();
        assert_eq!(cfg.randomness, 4);
        assert!(cfg.seed.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn scheduler_config_builders() {
        let cfg = SchedulerConfig::default().with_randomness(2).with_seed(7);
        assert_eq!(cfg.randomness, 2);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(SchedulerConfig::new(3).randomness, 3);
    }

    #[test]
    fn scheduler_config_rejects_out_of_range_randomness() {
        for bad in [0u8, 5, 200] {
            let err = SchedulerConfig::new(bad).validate().unwrap_err();
            assert!(matches!(err, RosterError::InvalidRandomness(v) if v == bad));
        }
        for good in MIN_RANDOMNESS..=MAX_RANDOMNESS {
            assert!(SchedulerConfig::new(good).validate().is_ok());
        }
    }

    #[test]
    fn seeded_sources_agree() {
        let cfg = SchedulerConfig::default().with_seed(42);
        let mut a = cfg.random_source();
        let mut b = cfg.random_source();
        for _ in 0..8 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }
}
