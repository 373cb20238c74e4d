use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws a uniformly distributed index in `[0, len)`.
pub trait IndexSampler {
    fn next_index(&mut self, len: usize) -> usize;
}

pub struct RngIndexSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> RngIndexSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> IndexSampler for RngIndexSampler<R> {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Reproducible sampler when a seed is given, entropy-seeded otherwise.
pub fn seeded_sampler(seed: Option<u64>) -> RngIndexSampler<StdRng> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    RngIndexSampler::new(rng)
}
