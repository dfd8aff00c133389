// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::cmp;

use crate::errs::SkipListError;

/// The default number of levels. `2^16` comfortably exceeds the element count
/// most in-memory sets will see, keeping the expected search cost logarithmic.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// A fair coin.
pub const DEFAULT_P: f64 = 0.5;

/// Construction parameters for a [`crate::SkipList`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Upper bound on the number of levels any node may have.
    pub max_level: usize,
    /// Probability that a node present on level `n` is also present on level
    /// `n + 1`.
    pub p: f64,
    /// Seed for the level generator. `None` seeds from the OS entropy source.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_level: DEFAULT_MAX_LEVEL,
            p: DEFAULT_P,
            seed: None,
        }
    }
}

impl Config {
    /// Sized for the intended capacity: `floor(log2(capacity))` levels, so
    /// only a few nodes end up on the highest level.
    pub fn for_capacity(capacity: usize) -> Self {
        let levels = cmp::max(1, (capacity as f64).log2().floor() as usize);
        Config {
            max_level: levels,
            ..Default::default()
        }
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_p(mut self, p: f64) -> Self {
        self.p = p;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), SkipListError> {
        if self.max_level == 0 {
            return Err(SkipListError::InvalidMaxLevel(self.max_level));
        }
        // also rejects NaN
        if !(self.p > 0.0 && self.p < 1.0) {
            return Err(SkipListError::InvalidProbability(self.p));
        }
        Ok(())
    }
}
