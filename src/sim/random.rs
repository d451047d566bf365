use rand::{Rng, RngCore};

/// Source of uniform samples in `[0, 1)`.
///
/// The browser driver backs this with `Math.random`. Any `rand` generator
/// works too, so tests seed a `StdRng` for reproducible placement and jitter.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform sample in `[-amplitude, amplitude)`.
    fn symmetric(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() - 0.5) * 2.0 * amplitude
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
