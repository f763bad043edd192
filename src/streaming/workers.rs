// src/streaming/workers.rs
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{atomic::Ordering, Arc};
use std::time::Instant;

use crossbeam_channel::Sender;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{ConfigError, GenerationError};
use crate::world::{Chunk, WorldGen};

use super::types::{GenDone, GenJob, GenOutcome};

/// Fills a chunk on a worker thread.
pub(crate) type TerrainFn = fn(&mut Chunk, &WorldGen);

fn default_terrain(chunk: &mut Chunk, gen: &WorldGen) {
    chunk.generate_terrain(gen);
}

/// Fixed-size pool of terrain workers. Jobs queue inside rayon; results go
/// back over `tx_done`. A worker only ever touches the chunk inside its job.
pub(crate) struct GenPool {
    pool: ThreadPool,
    gen: Arc<WorldGen>,
    tx_done: Sender<GenDone>,
    terrain: TerrainFn,
}

impl GenPool {
    pub fn new(threads: usize, gen: Arc<WorldGen>, tx_done: Sender<GenDone>) -> Result<Self, ConfigError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("chunk-gen-{}", i))
            .build()
            .map_err(|e| ConfigError::Pool(e.to_string()))?;

        Ok(Self { pool, gen, tx_done, terrain: default_terrain })
    }

    #[cfg(test)]
    pub fn set_terrain_fn(&mut self, f: TerrainFn) {
        self.terrain = f;
    }

    pub fn world(&self) -> &Arc<WorldGen> {
        &self.gen
    }

    pub fn submit(&self, job: GenJob) {
        let gen = self.gen.clone();
        let tx_done = self.tx_done.clone();
        let terrain = self.terrain;

        self.pool.spawn(move || {
            let done = run_job(&gen, terrain, job);
            // Receiver gone means the cache was dropped; nothing to report to.
            let _ = tx_done.send(done);
        });
    }
}

fn run_job(gen: &WorldGen, terrain: TerrainFn, job: GenJob) -> GenDone {
    let GenJob { key, mut chunk, cancel, enqueued_at } = job;

    let t_start = Instant::now();
    let queue_ms = (t_start - enqueued_at).as_secs_f64() * 1000.0;

    if cancel.load(Ordering::Relaxed) {
        return GenDone { key, chunk, cancel, outcome: GenOutcome::Canceled, queue_ms, gen_ms: 0.0 };
    }

    let result = panic::catch_unwind(AssertUnwindSafe(|| terrain(&mut chunk, gen)));

    let outcome = match result {
        Ok(()) if cancel.load(Ordering::Relaxed) => GenOutcome::Canceled,
        Ok(()) => GenOutcome::Generated,
        Err(payload) => GenOutcome::Failed(GenerationError::WorkerPanicked {
            key,
            message: panic_message(payload.as_ref()),
        }),
    };

    let gen_ms = t_start.elapsed().as_secs_f64() * 1000.0;
    GenDone { key, chunk, cancel, outcome, queue_ms, gen_ms }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
