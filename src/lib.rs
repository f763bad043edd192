//! Streams a procedurally generated voxel world around a moving focus.
//!
//! [`ChunkCache`] decides which chunks should exist, generates their terrain
//! on a bounded worker pool and evicts what falls out of range. The renderer
//! only ever reads live chunks and their solid-voxel world positions.

pub mod config;
pub mod error;
pub mod render;
pub mod streaming;
pub mod world;

pub use config::{ChunkDims, StreamConfig, TerrainParams};
pub use error::{ConfigError, GenerationError};
pub use streaming::{ChunkCache, ChunkKey, PendingState, StreamDelta, StreamStats};
pub use world::{Chunk, NoiseField, WorldGen};
