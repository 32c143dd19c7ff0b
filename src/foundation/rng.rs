use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The single random source an engine instance draws from.
///
/// Injected at construction so runs can be reproduced from a seed.
pub type EngineRng = Box<dyn RngCore + Send>;

/// Reproducible source seeded from a `u64`.
pub fn seeded_rng(seed: u64) -> EngineRng {
    Box::new(ChaCha8Rng::seed_from_u64(seed))
}

/// Unseeded source, the production default.
pub fn entropy_rng() -> EngineRng {
    Box::new(ChaCha8Rng::from_entropy())
}

/// Uniform draw in `[0, 1)`.
pub(crate) fn unit(rng: &mut dyn RngCore) -> f64 {
    rng.r#gen::<f64>()
}

/// Uniform draw in `[lo, hi)`.
pub(crate) fn uniform(rng: &mut dyn RngCore, lo: f64, hi: f64) -> f64 {
    lo + unit(rng) * (hi - lo)
}
