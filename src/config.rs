use crate::{Error, Result};

/// Parameters for a group of caller actors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Number of reader actors.
    pub readers: usize,
    /// Number of writer actors.
    pub writers: usize,
    /// Keys are drawn uniformly from `0..key_space`.
    pub key_space: u32,
    /// Written values are drawn uniformly from `0..value_range`.
    pub value_range: u32,
    /// Round-trips each actor completes before stopping on its own.
    /// `None` runs until the load is stopped.
    pub rounds: Option<u64>,
    /// Base seed for the per-actor RNGs. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            readers: 100,
            writers: 10,
            key_space: 5,
            value_range: 100,
            rounds: None,
            seed: None,
        }
    }
}

impl LoadConfig {
    pub fn readers(mut self, readers: usize) -> Self {
        self.readers = readers;
        self
    }

    pub fn writers(mut self, writers: usize) -> Self {
        self.writers = writers;
        self
    }

    pub fn key_space(mut self, key_space: u32) -> Self {
        self.key_space = key_space;
        self
    }

    pub fn value_range(mut self, value_range: u32) -> Self {
        self.value_range = value_range;
        self
    }

    pub fn rounds(mut self, rounds: u64) -> Self {
        self.rounds = Some(rounds);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_space == 0 {
            return Err(Error::InvalidConfig("key space must not be empty"));
        }
        if self.value_range == 0 {
            return Err(Error::InvalidConfig("value range must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_demo_load() {
        let config = LoadConfig::default();
        assert_eq!(config.readers, 100);
        assert_eq!(config.writers, 10);
        assert_eq!(config.key_space, 5);
        assert_eq!(config.value_range, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_ranges_are_rejected() {
        assert_eq!(
            LoadConfig::default().key_space(0).validate(),
            Err(Error::InvalidConfig("key space must not be empty"))
        );
        assert_eq!(
            LoadConfig::default().value_range(0).validate(),
            Err(Error::InvalidConfig("value range must not be empty"))
        );
    }
}
