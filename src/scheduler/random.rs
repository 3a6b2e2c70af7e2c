use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws consumed by the weighted election.
///
/// The engine never touches a global generator; every draw goes through the
/// source handed to the run, so tests can replay or count them.
pub trait RandomSource {
    /// Return a uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Deterministic source, identical draws for identical seeds.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
