// src/config.rs
// -------------
// Global config knobs for chunk storage, terrain and streaming.
//
// The consts are the reference values; the structs below carry them at runtime
// so every knob stays tunable.

use crate::error::ConfigError;

pub const CHUNK_WIDTH: u32 = 32;
pub const CHUNK_DEPTH: u32 = 32;
pub const CHUNK_HEIGHT: u32 = 256;

// Side of the square streaming window, in chunks.
pub const WINDOW_SIZE: i32 = 6;

pub const BASE_HEIGHT: i32 = 30;
pub const HEIGHT_VARIATION: i32 = 40;

// World coords are multiplied by this before sampling noise.
pub const NOISE_SCALE: f64 = 0.01;
pub const NOISE_OCTAVES: usize = 5;
pub const NOISE_SEED: u32 = 0;

pub const WORKER_THREADS: usize = 4;
pub const MAX_IN_FLIGHT: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkDims {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self { width: CHUNK_WIDTH, height: CHUNK_HEIGHT, depth: CHUNK_DEPTH }
    }
}

impl ChunkDims {
    #[inline]
    pub fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainParams {
    pub base_height: i32,
    pub height_variation: i32,
    pub noise_scale: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            base_height: BASE_HEIGHT,
            height_variation: HEIGHT_VARIATION,
            noise_scale: NOISE_SCALE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StreamConfig {
    pub dims: ChunkDims,
    pub window_size: i32,
    pub terrain: TerrainParams,
    pub noise_octaves: usize,
    pub seed: u32,
    pub worker_threads: usize,
    pub max_in_flight: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            dims: ChunkDims::default(),
            window_size: WINDOW_SIZE,
            terrain: TerrainParams::default(),
            noise_octaves: NOISE_OCTAVES,
            seed: NOISE_SEED,
            worker_threads: WORKER_THREADS,
            max_in_flight: MAX_IN_FLIGHT,
        }
    }
}

impl StreamConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ChunkDims { width, height, depth } = self.dims;
        if width == 0 || height == 0 || depth == 0 {
            return Err(ConfigError::EmptyChunk { width, height, depth });
        }
        if self.window_size < 1 {
            return Err(ConfigError::WindowSize(self.window_size));
        }
        if !self.terrain.noise_scale.is_finite() || self.terrain.noise_scale <= 0.0 {
            return Err(ConfigError::NoiseScale(self.terrain.noise_scale));
        }
        if self.noise_octaves == 0 {
            return Err(ConfigError::NoOctaves);
        }
        if self.worker_threads == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::NoInFlight);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_sizing() {
        let cfg = StreamConfig::default();
        assert_eq!(cfg.dims, ChunkDims { width: 32, height: 256, depth: 32 });
        assert_eq!(cfg.window_size, 6);
        assert_eq!(cfg.terrain.base_height, 30);
        assert_eq!(cfg.terrain.height_variation, 40);
        assert_eq!(cfg.terrain.noise_scale, 0.01);
        assert_eq!(cfg.noise_octaves, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_values() {
        let mut cfg = StreamConfig::default();
        cfg.dims.height = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyChunk { height: 0, .. })));

        let mut cfg = StreamConfig::default();
        cfg.window_size = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::WindowSize(0))));

        let mut cfg = StreamConfig::default();
        cfg.terrain.noise_scale = f64::NAN;
        assert!(matches!(cfg.validate(), Err(ConfigError::NoiseScale(_))));

        let mut cfg = StreamConfig::default();
        cfg.worker_threads = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::NoWorkers)));

        let mut cfg = StreamConfig::default();
        cfg.max_in_flight = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::NoInFlight)));
    }
}
