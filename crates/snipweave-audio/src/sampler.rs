//! Seeded snippet placement.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::rng::{create_rng, seed_or_entropy};

/// Picks snippet start offsets inside the source buffer.
///
/// Two samplers built from the same seed return the same sequence for the
/// same sequence of calls, on every platform. Draws are made over `u64` so
/// the stream does not depend on the target's pointer width.
#[derive(Debug, Clone)]
pub struct SnippetSampler {
    rng: Pcg32,
    seed: u64,
}

impl SnippetSampler {
    /// Creates a sampler from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: create_rng(seed),
            seed,
        }
    }

    /// Creates a sampler from `seed`, or from OS entropy when `None`.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        Self::new(seed_or_entropy(seed))
    }

    /// The seed this sampler was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws the next snippet start.
    ///
    /// Returns a uniform value in `[0, source_frames - clip_len]`. When that
    /// range holds a single position the answer is 0 and no draw is consumed.
    /// A clip longer than the source is treated the same way; callers are
    /// expected to have rejected it already.
    pub fn next_start(&mut self, source_frames: usize, clip_len: usize) -> usize {
        let max_start = source_frames.saturating_sub(clip_len);
        if max_start == 0 {
            return 0;
        }
        self.rng.gen_range(0..=max_start as u64) as usize
    }
}
