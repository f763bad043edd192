use thiserror::Error;

use crate::streaming::ChunkKey;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("chunk dimensions must be non-zero (got {width}x{height}x{depth})")]
    EmptyChunk { width: u32, height: u32, depth: u32 },
    #[error("streaming window size must be at least 1 (got {0})")]
    WindowSize(i32),
    #[error("noise scale must be finite and positive (got {0})")]
    NoiseScale(f64),
    #[error("noise field needs at least one octave")]
    NoOctaves,
    #[error("worker pool needs at least one thread")]
    NoWorkers,
    #[error("max in-flight generations must be at least 1")]
    NoInFlight,
    #[error("failed to build worker pool: {0}")]
    Pool(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("terrain worker panicked for chunk ({}, {}): {message}", .key.x, .key.z)]
    WorkerPanicked { key: ChunkKey, message: String },
}
