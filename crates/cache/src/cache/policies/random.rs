//! Random Replacement Policy.
//!
//! This policy evicts a uniformly random line from the set, ignoring history and contents.
//! The generator belongs to the policy and can be seeded, so a seeded policy picks the same
//! victims on every run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{ReplacementPolicy, SetView};

/// Random policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    /// Generator drawing victim offsets.
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a policy seeded from operating-system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible policy.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a policy around an existing generator.
    pub const fn with_rng(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ReplacementPolicy<K, V> for RandomPolicy {
    /// Draws an offset uniformly from `0..line_count`.
    fn replacement_index(&mut self, view: &SetView<'_, K, V>) -> usize {
        self.rng.gen_range(0..view.line_count().max(1))
    }
}
