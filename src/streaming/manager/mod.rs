
// src/streaming/manager/mod.rs
mod build;
mod stats;
pub mod window;

use std::collections::VecDeque;
use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use crate::config::StreamConfig;
use crate::error::ConfigError;
use crate::world::{Chunk, WorldGen};

use crate::streaming::{
    types::*,
    workers::GenPool,
};

pub use stats::StreamTimingWindow;

/// Live working set of chunks around a moving focus.
///
/// All methods run on one control thread. Workers receive a chunk by value,
/// fill it and send it back; they never see `live` or `pending`. A chunk only
/// shows up in `get`/`all_chunks` once `poll_completed` has harvested it.
pub struct ChunkCache {
    pub(crate) cfg: StreamConfig,

    pub(crate) live: HashMap<ChunkKey, Chunk>,
    pub(crate) pending: HashMap<ChunkKey, PendingChunk>,
    pub(crate) queue: VecDeque<QueuedChunk>,
    pub(crate) failed: HashSet<ChunkKey>,

    pub(crate) pool: GenPool,
    pub(crate) rx_done: Receiver<GenDone>,
    pub(crate) in_flight: usize,

    pub(crate) last_center: Option<ChunkKey>,

    // Generation timing window (drained by stats()).
    pub timing: StreamTimingWindow,
}

impl ChunkCache {
    pub fn new(cfg: StreamConfig) -> Result<Self, ConfigError> {
        let gen = Arc::new(WorldGen::from_config(&cfg));
        Self::with_world(cfg, gen)
    }

    /// Uses an existing generator; its terrain params win over `cfg.terrain`.
    pub fn with_world(cfg: StreamConfig, gen: Arc<WorldGen>) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Every dispatched job sends exactly one result and at most
        // `max_in_flight` are outstanding, so workers never block on send.
        let (tx_done, rx_done) = bounded::<GenDone>(cfg.max_in_flight);
        let pool = GenPool::new(cfg.worker_threads, gen, tx_done)?;

        Ok(Self {
            cfg,
            live: HashMap::default(),
            pending: HashMap::default(),
            queue: VecDeque::new(),
            failed: HashSet::default(),
            pool,
            rx_done,
            in_flight: 0,
            last_center: None,
            timing: StreamTimingWindow::default(),
        })
    }

    /// The `N x N` window of coordinates that should be live around the focus.
    pub fn desired_set(&self, focus_x: i32, focus_z: i32) -> HashSet<ChunkKey> {
        window::desired_set(ChunkKey::new(focus_x, focus_z), self.cfg.window_size)
    }

    /// Reconciles the working set against the window around the focus.
    /// Returns whether any coordinate was added or removed. Never waits on
    /// workers.
    pub fn update(&mut self, focus_x: i32, focus_z: i32) -> bool {
        !self.update_delta(focus_x, focus_z).is_empty()
    }

    pub fn update_delta(&mut self, focus_x: i32, focus_z: i32) -> StreamDelta {
        let center = ChunkKey::new(focus_x, focus_z);

        // One desired set drives both eviction and creation.
        let desired = window::desired_set(center, self.cfg.window_size);
        let removed = build::evict_outside(self, &desired);
        let added = build::enqueue_missing(self, center, &desired);

        build::dispatch(self);
        self.last_center = Some(center);

        StreamDelta { added, removed }
    }

    /// Non-blocking: coordinates whose generation finished since the last
    /// call. Also tops the worker pool back up.
    pub fn poll_completed(&mut self) -> Vec<ChunkKey> {
        let done = build::harvest(self);
        build::dispatch(self);
        done
    }

    pub fn get(&self, key: ChunkKey) -> Option<&Chunk> {
        self.live.get(&key)
    }

    pub fn get_mut(&mut self, key: ChunkKey) -> Option<&mut Chunk> {
        self.live.get_mut(&key)
    }

    pub fn all_chunks(&self) -> Vec<&Chunk> {
        self.live.values().collect()
    }

    pub fn chunks_mut(&mut self) -> impl Iterator<Item = &mut Chunk> {
        self.live.values_mut()
    }

    pub fn pending_state(&self, key: ChunkKey) -> Option<PendingState> {
        self.pending.get(&key).map(|p| p.state)
    }

    pub fn is_pending(&self, key: ChunkKey) -> bool {
        self.pending.contains_key(&key)
    }

    /// Whether the chunk at `key` is live but empty because its worker failed.
    pub fn failed(&self, key: ChunkKey) -> bool {
        self.failed.contains(&key)
    }

    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Nothing requested is still waiting on a worker.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn center(&self) -> Option<ChunkKey> {
        self.last_center
    }

    pub fn config(&self) -> &StreamConfig {
        &self.cfg
    }

    pub fn world(&self) -> &Arc<WorldGen> {
        self.pool.world()
    }

    pub fn stats(&mut self) -> StreamStats {
        stats::stats(self)
    }

    /// Drops the pool and this cache's hold on the generator. Workers still
    /// running finish into a closed channel and their chunks are discarded.
    pub fn shutdown(self) {
        drop(self);
    }

    #[cfg(test)]
    pub(crate) fn set_terrain_fn(&mut self, f: crate::streaming::workers::TerrainFn) {
        self.pool.set_terrain_fn(f);
    }
}
