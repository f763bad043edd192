use std::time::{Duration, Instant};

use voxel_stream::StreamStats;

pub struct FrameProf {
    pub frame: u64,
    pub last_print: Instant,
    pub print_every: Duration,

    pub n_frames: u64,
    pub t_update: f64,
    pub t_poll: f64,
    pub t_instances: f64,

    pub completed: u64,
    pub instance_rebuilds: u64,
    pub instances: usize,

    pub max_frame_ms: f64,
}

impl FrameProf {
    pub fn new() -> Self {
        Self {
            frame: 0,
            last_print: Instant::now(),
            print_every: Duration::from_millis(500),

            n_frames: 0,
            t_update: 0.0,
            t_poll: 0.0,
            t_instances: 0.0,

            completed: 0,
            instance_rebuilds: 0,
            instances: 0,

            max_frame_ms: 0.0,
        }
    }

    #[inline]
    pub fn mark_ms(t0: Instant) -> f64 {
        t0.elapsed().as_secs_f64() * 1000.0
    }

    #[inline] pub fn update(&mut self, ms: f64) { self.t_update += ms; }
    #[inline] pub fn poll(&mut self, ms: f64) { self.t_poll += ms; }

    pub fn rebuilt_instances(&mut self, ms: f64, count: usize) {
        self.t_instances += ms;
        self.instance_rebuilds += 1;
        self.instances = count;
    }

    pub fn add_completed(&mut self, n: usize) {
        self.completed += n as u64;
    }

    /// `stats` is only called on frames that log a summary.
    pub fn end_frame(&mut self, frame_ms: f64, stats: impl FnOnce() -> StreamStats) {
        self.frame += 1;
        self.n_frames += 1;
        self.max_frame_ms = self.max_frame_ms.max(frame_ms);

        if self.last_print.elapsed() < self.print_every {
            return;
        }

        let nf = self.n_frames.max(1) as f64;
        let avg = |x: f64| x / nf;
        let s = stats();

        log::info!(
            concat!(
                "[prof] frames={} avg_frame={:.3}ms max_frame={:.3}ms ",
                "update={:.3} poll={:.3} instances={:.3} | completed={} rebuilds={} cubes={}"
            ),
            self.frame,
            avg(self.t_update + self.t_poll + self.t_instances),
            self.max_frame_ms,
            avg(self.t_update),
            avg(self.t_poll),
            avg(self.t_instances),
            self.completed,
            self.instance_rebuilds,
            self.instances,
        );
        log::info!(
            concat!(
                "[stream] center={:?} live={} queued={} generating={} in_flight={} failed={} ",
                "| gen={} cancel={} fail={} queue_avg={:.2}ms gen_avg={:.2}ms gen_max={:.2}ms"
            ),
            s.center.map(|c| (c.x, c.z)),
            s.live,
            s.queued,
            s.generating,
            s.in_flight,
            s.failed,
            s.generated,
            s.canceled,
            s.failures,
            s.queue_ms_avg,
            s.gen_ms_avg,
            s.gen_ms_max,
        );

        // reset window counters, keep frame + print_every
        self.last_print = Instant::now();
        self.n_frames = 0;
        self.t_update = 0.0;
        self.t_poll = 0.0;
        self.t_instances = 0.0;
        self.completed = 0;
        self.instance_rebuilds = 0;
        self.max_frame_ms = 0.0;
    }
}
