// src/world/noise_field.rs

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::config;

/// Fractal Perlin sampler shared read-only by every terrain worker.
///
/// Construction is the only initialisation step and dropping the value is the
/// teardown; there is no process-wide instance. Callers hold it behind an
/// `Arc` (see [`crate::world::WorldGen`]) so workers never need a lock.
#[derive(Clone)]
pub struct NoiseField {
    pub seed: u32,
    fbm: Fbm<Perlin>,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self::with_octaves(seed, config::NOISE_OCTAVES)
    }

    pub fn with_octaves(seed: u32, octaves: usize) -> Self {
        let fbm = Fbm::<Perlin>::new(seed).set_octaves(octaves.max(1));
        Self { seed, fbm }
    }

    pub fn octaves(&self) -> usize {
        self.fbm.octaves
    }

    /// Pure function of `(x, z)` and the construction parameters, in `[-1, 1]`.
    #[inline]
    pub fn sample_2d(&self, x: f64, z: f64) -> f64 {
        self.fbm.get([x, z]).clamp(-1.0, 1.0)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .field("octaves", &self.fbm.octaves)
            .finish()
    }
}
