// src/streaming/types.rs
use std::sync::{atomic::AtomicBool, Arc};
use std::time::Instant;

use glam::Vec3;

use crate::config::ChunkDims;
use crate::error::GenerationError;
use crate::world::Chunk;

#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct ChunkKey {
    pub x: i32,
    pub z: i32,
}

impl ChunkKey {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Grid coordinate containing a world-space position. Floors, so
    /// `x = -0.5` lands in chunk `-1`.
    #[inline]
    pub fn from_world_pos(pos: Vec3, dims: ChunkDims) -> Self {
        let wx = pos.x.floor() as i32;
        let wz = pos.z.floor() as i32;
        Self {
            x: wx.div_euclid(dims.width as i32),
            z: wz.div_euclid(dims.depth as i32),
        }
    }

    #[inline]
    pub fn dist2(self, other: ChunkKey) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dz = self.z as i64 - other.z as i64;
        dx * dx + dz * dz
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingState {
    Queued,
    Generating,
}

/// Tracking handle for a chunk whose terrain has not been harvested yet.
#[derive(Clone, Debug)]
pub struct PendingChunk {
    pub cancel: Arc<AtomicBool>,
    pub state: PendingState,
}

/// A chunk waiting for a free worker. Owns the chunk until dispatch.
pub(crate) struct QueuedChunk {
    pub key: ChunkKey,
    pub chunk: Chunk,
    pub cancel: Arc<AtomicBool>,
    pub enqueued_at: Instant,
}

pub(crate) struct GenJob {
    pub key: ChunkKey,
    pub chunk: Chunk,
    pub cancel: Arc<AtomicBool>,
    pub enqueued_at: Instant,
}

#[derive(Debug)]
pub enum GenOutcome {
    Generated,
    Canceled,
    Failed(GenerationError),
}

pub(crate) struct GenDone {
    pub key: ChunkKey,
    pub chunk: Chunk,
    pub cancel: Arc<AtomicBool>,
    pub outcome: GenOutcome,
    pub queue_ms: f64,
    pub gen_ms: f64,
}

/// What a single `update` changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamDelta {
    pub added: Vec<ChunkKey>,
    pub removed: Vec<ChunkKey>,
}

impl StreamDelta {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StreamStats {
    pub center: Option<ChunkKey>,

    pub live: u32,
    pub queued: u32,
    pub generating: u32,
    pub in_flight: u32,
    pub done_backlog: u32,
    pub failed: u32,

    pub generated: u32,
    pub canceled: u32,
    pub failures: u32,

    pub queue_ms_avg: f64,
    pub queue_ms_max: f64,
    pub gen_ms_avg: f64,
    pub gen_ms_max: f64,
}
