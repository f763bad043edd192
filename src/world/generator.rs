// src/world/generator.rs

use crate::config::{StreamConfig, TerrainParams};
use crate::world::NoiseField;

/// Noise field plus the terrain shaping knobs. One instance is shared by the
/// control thread and every worker for the whole lifetime of a chunk cache.
#[derive(Clone, Debug)]
pub struct WorldGen {
    noise: NoiseField,
    pub terrain: TerrainParams,
}

impl WorldGen {
    pub fn new(seed: u32) -> Self {
        Self::with_params(NoiseField::new(seed), TerrainParams::default())
    }

    pub fn with_params(noise: NoiseField, terrain: TerrainParams) -> Self {
        Self { noise, terrain }
    }

    pub fn from_config(cfg: &StreamConfig) -> Self {
        Self::with_params(NoiseField::with_octaves(cfg.seed, cfg.noise_octaves), cfg.terrain)
    }

    #[inline]
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Topmost solid voxel of the world column at `(wx, wz)`. Not clamped to
    /// any chunk height; callers clamp to their own storage. World columns are
    /// `i64` since a chunk key times its footprint can leave `i32`.
    #[inline]
    pub fn ground_height(&self, wx: i64, wz: i64) -> i32 {
        let s = self.terrain.noise_scale;
        let n = self.noise.sample_2d(wx as f64 * s, wz as f64 * s);
        height_from_sample(n, &self.terrain)
    }
}

/// Remaps a `[-1, 1]` sample to `[0, 1]` and scales it onto the height band.
#[inline]
pub fn height_from_sample(sample: f64, terrain: &TerrainParams) -> i32 {
    let t = (sample.clamp(-1.0, 1.0) + 1.0) * 0.5;
    terrain.base_height + (t * terrain.height_variation as f64).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_extremes_hit_band_edges() {
        let t = TerrainParams::default();
        assert_eq!(height_from_sample(-1.0, &t), 30);
        assert_eq!(height_from_sample(0.0, &t), 50);
        assert_eq!(height_from_sample(1.0, &t), 70);
        // out-of-range samples are clamped before remapping
        assert_eq!(height_from_sample(3.0, &t), 70);
    }

    #[test]
    fn height_is_monotonic_in_sample() {
        let t = TerrainParams::default();
        let mut last = i32::MIN;
        for i in 0..=200 {
            let s = -1.0 + i as f64 * 0.01;
            let h = height_from_sample(s, &t);
            assert!(h >= last);
            last = h;
        }
    }

    #[test]
    fn ground_height_is_deterministic() {
        let a = WorldGen::new(3);
        let b = WorldGen::new(3);
        for x in -50..50 {
            assert_eq!(a.ground_height(x, x * 3 - 7), b.ground_height(x, x * 3 - 7));
        }
    }

    #[test]
    fn ground_height_samples_scaled_world_coords() {
        let seed = 17;
        let gen = WorldGen::new(seed);
        let field = NoiseField::new(seed);
        assert_eq!(gen.noise().seed, seed);

        let t = TerrainParams::default();
        for wx in (-300..300).step_by(7) {
            for wz in [-1234, -65, -1, 0, 1, 33, 999] {
                let want = height_from_sample(field.sample_2d(wx as f64 * 0.01, wz as f64 * 0.01), &t);
                assert_eq!(gen.ground_height(wx, wz), want, "({wx}, {wz})");
            }
        }
    }

    #[test]
    fn ground_height_handles_far_columns() {
        let gen = WorldGen::new(0);
        let far = i32::MAX as i64 * 32;
        for (wx, wz) in [(far, -far), (-far, far), (i32::MIN as i64 * 32, 0)] {
            let h = gen.ground_height(wx, wz);
            assert!((30..=70).contains(&h), "({wx}, {wz}) -> {h}");
        }
    }
}
