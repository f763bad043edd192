// src/streaming/manager/stats.rs
use crate::streaming::types::*;
use super::ChunkCache;

/// Generation timings accumulated between two `stats()` calls.
#[derive(Clone, Debug, Default)]
pub struct StreamTimingWindow {
    pub generated: u32,
    pub canceled: u32,
    pub failed: u32,

    pub queue_ms_sum: f64,
    pub queue_ms_max: f64,

    pub gen_ms_sum: f64,
    pub gen_ms_max: f64,
}

impl StreamTimingWindow {
    #[inline]
    pub fn record_generated(&mut self, queue_ms: f64, gen_ms: f64) {
        self.generated += 1;

        self.queue_ms_sum += queue_ms;
        self.queue_ms_max = self.queue_ms_max.max(queue_ms);

        self.gen_ms_sum += gen_ms;
        self.gen_ms_max = self.gen_ms_max.max(gen_ms);
    }

    #[inline]
    pub fn record_canceled(&mut self) {
        self.canceled += 1;
    }

    #[inline]
    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    #[inline]
    pub fn drain(&mut self) -> Self {
        std::mem::take(self)
    }
}

pub fn stats(mgr: &mut ChunkCache) -> StreamStats {
    let mut s = StreamStats {
        center: mgr.last_center,
        live: mgr.live.len() as u32,
        in_flight: mgr.in_flight as u32,
        done_backlog: mgr.rx_done.len() as u32,
        failed: mgr.failed.len() as u32,
        ..Default::default()
    };

    for p in mgr.pending.values() {
        match p.state {
            PendingState::Queued => s.queued += 1,
            PendingState::Generating => s.generating += 1,
        }
    }

    let w = mgr.timing.drain();
    s.generated = w.generated;
    s.canceled = w.canceled;
    s.failures = w.failed;

    if w.generated > 0 {
        let n = w.generated as f64;
        s.queue_ms_avg = w.queue_ms_sum / n;
        s.queue_ms_max = w.queue_ms_max;
        s.gen_ms_avg = w.gen_ms_sum / n;
        s.gen_ms_max = w.gen_ms_max;
    }

    s
}
