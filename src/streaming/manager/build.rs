use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Instant;

use log::{debug, warn};
use rustc_hash::FxHashSet as HashSet;

use crate::streaming::types::*;
use crate::world::Chunk;

use super::window::sort_near_first;
use super::ChunkCache;

/// Drops every live or pending coordinate outside `desired`. Pending work is
/// abandoned by flagging its cancel token and forgetting the handle.
pub fn evict_outside(mgr: &mut ChunkCache, desired: &HashSet<ChunkKey>) -> Vec<ChunkKey> {
    let mut removed: Vec<ChunkKey> = mgr
        .live
        .keys()
        .chain(mgr.pending.keys())
        .filter(|k| !desired.contains(k))
        .copied()
        .collect();
    removed.sort_unstable();
    removed.dedup();

    let mut dropped_queued = false;
    for k in &removed {
        if mgr.live.remove(k).is_some() {
            mgr.failed.remove(k);
            debug!("evicted chunk ({}, {})", k.x, k.z);
        }
        if let Some(p) = mgr.pending.remove(k) {
            p.cancel.store(true, Ordering::Relaxed);
            dropped_queued |= p.state == PendingState::Queued;
            debug!("abandoned {:?} chunk ({}, {})", p.state, k.x, k.z);
        }
    }

    if dropped_queued {
        mgr.queue.retain(|q| desired.contains(&q.key));
    }

    removed
}

/// Creates an empty chunk for every desired coordinate that is neither live
/// nor pending, and queues it for generation nearest-first.
pub fn enqueue_missing(mgr: &mut ChunkCache, center: ChunkKey, desired: &HashSet<ChunkKey>) -> Vec<ChunkKey> {
    let mut added: Vec<ChunkKey> = desired
        .iter()
        .filter(|k| !mgr.live.contains_key(k) && !mgr.pending.contains_key(k))
        .copied()
        .collect();
    sort_near_first(&mut added, center);

    let now = Instant::now();
    for &key in &added {
        let cancel = Arc::new(AtomicBool::new(false));
        mgr.pending.insert(key, PendingChunk { cancel: cancel.clone(), state: PendingState::Queued });
        mgr.queue.push_back(QueuedChunk {
            key,
            chunk: Chunk::with_dims(key, mgr.cfg.dims),
            cancel,
            enqueued_at: now,
        });
    }

    added
}

/// Hands queued chunks to the pool until the in-flight cap is reached.
pub fn dispatch(mgr: &mut ChunkCache) {
    while mgr.in_flight < mgr.cfg.max_in_flight {
        let Some(q) = mgr.queue.pop_front() else { break; };

        match mgr.pending.get_mut(&q.key) {
            Some(p) if Arc::ptr_eq(&p.cancel, &q.cancel) && p.state == PendingState::Queued => {
                p.state = PendingState::Generating;
            }
            _ => continue,
        }

        mgr.pool.submit(GenJob {
            key: q.key,
            chunk: q.chunk,
            cancel: q.cancel,
            enqueued_at: q.enqueued_at,
        });
        mgr.in_flight += 1;
    }
}

/// Drains finished jobs without blocking. Returns the coordinates whose
/// chunks just became live, each exactly once.
pub fn harvest(mgr: &mut ChunkCache) -> Vec<ChunkKey> {
    let mut completed = Vec::new();

    while let Ok(done) = mgr.rx_done.try_recv() {
        mgr.in_flight = mgr.in_flight.saturating_sub(1);

        let GenDone { key, mut chunk, cancel, outcome, queue_ms, gen_ms } = done;

        // Stale: evicted (and maybe re-requested) while the worker ran.
        let current = matches!(mgr.pending.get(&key), Some(p) if Arc::ptr_eq(&p.cancel, &cancel));
        if !current {
            debug!("discarding stale completion for chunk ({}, {})", key.x, key.z);
            mgr.timing.record_canceled();
            continue;
        }

        match outcome {
            GenOutcome::Generated => {
                mgr.timing.record_generated(queue_ms, gen_ms);
            }
            GenOutcome::Canceled => {
                // Flag set on a handle still tracked; forget it so the next
                // update requests the coordinate again.
                debug!("worker reported cancel for tracked chunk ({}, {})", key.x, key.z);
                mgr.pending.remove(&key);
                mgr.timing.record_canceled();
                continue;
            }
            GenOutcome::Failed(err) => {
                warn!("{err}; keeping chunk empty");
                chunk.clear();
                mgr.failed.insert(key);
                mgr.timing.record_failed();
            }
        }

        mgr.pending.remove(&key);
        mgr.live.insert(key, chunk);
        completed.push(key);
    }

    completed
}
