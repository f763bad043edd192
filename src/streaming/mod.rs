// src/streaming/mod.rs
// Chunk streaming: desired window, background generation, eviction.

pub mod manager;

mod types;
mod workers;

pub use manager::{ChunkCache, StreamTimingWindow};
pub use types::{ChunkKey, GenOutcome, PendingChunk, PendingState, StreamDelta, StreamStats};
