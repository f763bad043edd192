mod profiler;

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use glam::Vec3;
use log::info;

use voxel_stream::{
    config, render::collect_instances, ChunkCache, ChunkDims, ChunkKey, StreamConfig, TerrainParams,
};

use crate::profiler::FrameProf;

/// Headless driver: walks a viewer across the world and streams chunks
/// around it, logging what the renderer would receive.
#[derive(Parser, Debug)]
#[command(name = "voxel-stream", about = "Stream procedurally generated voxel chunks around a moving viewer")]
struct Args {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    #[arg(long, default_value_t = 60.0)]
    tick_hz: f64,
    /// Viewer speed along +X, in voxels per second
    #[arg(long, default_value_t = 48.0)]
    speed: f32,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    start_x: f32,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    start_z: f32,

    #[arg(long, default_value_t = config::WINDOW_SIZE)]
    window_size: i32,
    #[arg(long, default_value_t = config::CHUNK_WIDTH)]
    chunk_width: u32,
    #[arg(long, default_value_t = config::CHUNK_DEPTH)]
    chunk_depth: u32,
    #[arg(long, default_value_t = config::CHUNK_HEIGHT)]
    chunk_height: u32,

    #[arg(long, default_value_t = config::BASE_HEIGHT, allow_hyphen_values = true)]
    base_height: i32,
    #[arg(long, default_value_t = config::HEIGHT_VARIATION)]
    height_variation: i32,
    #[arg(long, default_value_t = config::NOISE_SCALE)]
    noise_scale: f64,
    #[arg(long, default_value_t = config::NOISE_OCTAVES)]
    octaves: usize,
    #[arg(long, default_value_t = config::NOISE_SEED)]
    seed: u32,

    #[arg(long, default_value_t = config::WORKER_THREADS)]
    workers: usize,
    #[arg(long, default_value_t = config::MAX_IN_FLIGHT)]
    max_in_flight: usize,

    /// Seconds to wait for outstanding generation after the last tick
    #[arg(long, default_value_t = 10)]
    settle_secs: u64,
}

impl Args {
    fn stream_config(&self) -> StreamConfig {
        StreamConfig {
            dims: ChunkDims {
                width: self.chunk_width,
                height: self.chunk_height,
                depth: self.chunk_depth,
            },
            window_size: self.window_size,
            terrain: TerrainParams {
                base_height: self.base_height,
                height_variation: self.height_variation,
                noise_scale: self.noise_scale,
            },
            noise_octaves: self.octaves,
            seed: self.seed,
            worker_threads: self.workers,
            max_in_flight: self.max_in_flight,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let cfg = args.stream_config();
    let dims = cfg.dims;
    let mut cache = ChunkCache::new(cfg).context("invalid streaming configuration")?;

    let tick = Duration::from_secs_f64(1.0 / args.tick_hz.max(1.0));
    let step = args.speed * tick.as_secs_f32();

    let mut viewer = Vec3::new(args.start_x, 0.0, args.start_z);
    let mut prof = FrameProf::new();

    info!(
        "streaming {}x{} window of {}x{}x{} chunks with {} workers",
        args.window_size, args.window_size, dims.width, dims.height, dims.depth, args.workers
    );

    for _ in 0..args.ticks {
        let t_frame = Instant::now();
        let focus = ChunkKey::from_world_pos(viewer, dims);

        let t0 = Instant::now();
        let changed = cache.update(focus.x, focus.z);
        prof.update(FrameProf::mark_ms(t0));

        let t0 = Instant::now();
        let done = cache.poll_completed();
        prof.poll(FrameProf::mark_ms(t0));
        prof.add_completed(done.len());

        if changed || !done.is_empty() {
            let t0 = Instant::now();
            let instances = collect_instances(&mut cache);
            prof.rebuilt_instances(FrameProf::mark_ms(t0), instances.len());
        }

        viewer.x += step;

        prof.end_frame(FrameProf::mark_ms(t_frame), || cache.stats());

        if let Some(rest) = tick.checked_sub(t_frame.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    let deadline = Instant::now() + Duration::from_secs(args.settle_secs);
    while !cache.is_idle() && Instant::now() < deadline {
        if cache.poll_completed().is_empty() {
            std::thread::sleep(Duration::from_millis(2));
        }
    }
    let instances = collect_instances(&mut cache);

    let s = cache.stats();
    info!(
        "done: live={} pending={} failed={} cubes={}",
        s.live,
        s.queued + s.generating,
        s.failed,
        instances.len()
    );

    cache.shutdown();
    Ok(())
}
