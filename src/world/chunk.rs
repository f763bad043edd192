// src/world/chunk.rs

use glam::Vec3;

use crate::config::ChunkDims;
use crate::streaming::ChunkKey;
use crate::world::WorldGen;

/// World-space positions of every solid voxel, recomputed wholesale on the
/// first read after a write.
#[derive(Clone, Debug, Default)]
pub enum PositionCache {
    #[default]
    Stale,
    Fresh(Vec<Vec3>),
}

impl PositionCache {
    #[inline]
    pub fn is_fresh(&self) -> bool {
        matches!(self, PositionCache::Fresh(_))
    }

    #[inline]
    fn as_slice(&self) -> &[Vec3] {
        match self {
            PositionCache::Fresh(v) => v,
            PositionCache::Stale => &[],
        }
    }
}

/// One column of the world: a dense occupancy grid of
/// `width * height * depth` voxels, one bit each.
///
/// Linear layout is `x + z * width + y * width * depth`.
#[derive(Clone, Debug)]
pub struct Chunk {
    key: ChunkKey,
    dims: ChunkDims,
    bits: Vec<u64>,
    positions: PositionCache,
}

impl Chunk {
    pub fn new(chunk_x: i32, chunk_z: i32) -> Self {
        Self::with_dims(ChunkKey::new(chunk_x, chunk_z), ChunkDims::default())
    }

    pub fn with_dims(key: ChunkKey, dims: ChunkDims) -> Self {
        let words = dims.volume().div_ceil(64);
        Self {
            key,
            dims,
            bits: vec![0u64; words],
            positions: PositionCache::Stale,
        }
    }

    #[inline]
    pub fn key(&self) -> ChunkKey {
        self.key
    }

    #[inline]
    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    #[inline]
    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        let ChunkDims { width, height, depth } = self.dims;
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as u32, y as u32, z as u32);
        if x >= width || y >= height || z >= depth {
            return None;
        }
        let (w, d) = (width as usize, depth as usize);
        Some(x as usize + z as usize * w + y as usize * w * d)
    }

    /// Occupancy at local `(x, y, z)`; anything out of bounds reads as empty.
    #[inline]
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> bool {
        match self.index(x, y, z) {
            Some(i) => self.bits[i >> 6] & (1u64 << (i & 63)) != 0,
            None => false,
        }
    }

    /// Out-of-bounds writes are dropped.
    #[inline]
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, exists: bool) {
        let Some(i) = self.index(x, y, z) else { return; };
        let mask = 1u64 << (i & 63);
        if exists {
            self.bits[i >> 6] |= mask;
        } else {
            self.bits[i >> 6] &= !mask;
        }
        self.positions = PositionCache::Stale;
    }

    pub fn clear(&mut self) {
        self.bits.fill(0);
        self.positions = PositionCache::Stale;
    }

    /// Fills every column from `y = 0` up to the ground height sampled at its
    /// world position, clamped to the chunk. Rerunning rebuilds the same grid.
    pub fn generate_terrain(&mut self, gen: &WorldGen) {
        self.clear();

        let ChunkDims { width, height, depth } = self.dims;
        let top = height as i32 - 1;
        let (ox, oz) = self.world_origin();

        for x in 0..width as i32 {
            for z in 0..depth as i32 {
                let h = gen.ground_height(ox + x as i64, oz + z as i64).clamp(0, top);
                for y in 0..=h {
                    self.set_voxel(x, y, z, true);
                }
            }
        }
    }

    /// World column of local `(0, 0)`.
    #[inline]
    pub fn world_origin(&self) -> (i64, i64) {
        (
            self.key.x as i64 * self.dims.width as i64,
            self.key.z as i64 * self.dims.depth as i64,
        )
    }

    /// Local to world transform; `y` carries no chunk offset.
    #[inline]
    pub fn local_to_world(&self, x: i32, y: i32, z: i32) -> Vec3 {
        let (ox, oz) = self.world_origin();
        let wx = ox + x as i64;
        let wz = oz + z as i64;
        Vec3::new(wx as f32, y as f32, wz as f32)
    }

    /// Cached world positions of all solid voxels, rebuilt if any write
    /// happened since the last call.
    pub fn solid_voxel_world_positions(&mut self) -> &[Vec3] {
        if !self.positions.is_fresh() {
            self.positions = PositionCache::Fresh(self.collect_positions());
        }
        self.positions.as_slice()
    }

    /// Peek at the cached list without recomputing.
    pub fn cached_positions(&self) -> Option<&[Vec3]> {
        match &self.positions {
            PositionCache::Fresh(v) => Some(v),
            PositionCache::Stale => None,
        }
    }

    fn collect_positions(&self) -> Vec<Vec3> {
        let ChunkDims { width, height, depth } = self.dims;
        let mut out = Vec::with_capacity(self.solid_count());
        for x in 0..width as i32 {
            for y in 0..height as i32 {
                for z in 0..depth as i32 {
                    if self.get_voxel(x, y, z) {
                        out.push(self.local_to_world(x, y, z));
                    }
                }
            }
        }
        out
    }

    pub fn solid_count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Topmost solid `y` in the local column, if any.
    pub fn column_height(&self, x: i32, z: i32) -> Option<i32> {
        (0..self.dims.height as i32).rev().find(|&y| self.get_voxel(x, y, z))
    }

    #[cfg(test)]
    pub(crate) fn same_voxels(&self, other: &Chunk) -> bool {
        self.dims == other.dims && self.bits == other.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainParams;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn small_dims() -> ChunkDims {
        ChunkDims { width: 8, height: 64, depth: 8 }
    }

    #[test]
    fn new_chunk_is_empty() {
        let c = Chunk::new(3, -2);
        assert_eq!(c.key(), ChunkKey::new(3, -2));
        assert_eq!(c.solid_count(), 0);
        assert!(!c.get_voxel(0, 0, 0));
    }

    #[test]
    fn set_then_get_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut c = Chunk::new(0, 0);
        for _ in 0..2000 {
            let x = rng.gen_range(0..32);
            let y = rng.gen_range(0..256);
            let z = rng.gen_range(0..32);
            let v = rng.gen_bool(0.5);
            c.set_voxel(x, y, z, v);
            assert_eq!(c.get_voxel(x, y, z), v, "({x}, {y}, {z})");
        }
    }

    #[test]
    fn out_of_bounds_is_absent_and_ignored() {
        let mut c = Chunk::with_dims(ChunkKey::new(0, 0), small_dims());
        let outside = [
            (-1, 0, 0),
            (0, -1, 0),
            (0, 0, -1),
            (8, 0, 0),
            (0, 64, 0),
            (0, 0, 8),
            (i32::MAX, i32::MIN, 3),
        ];
        for (x, y, z) in outside {
            c.set_voxel(x, y, z, true);
            assert!(!c.get_voxel(x, y, z));
        }
        assert_eq!(c.solid_count(), 0);
        // a rejected write does not invalidate the position cache
        let _ = c.solid_voxel_world_positions();
        c.set_voxel(-5, 0, 0, true);
        assert!(c.cached_positions().is_some());
    }

    #[test]
    fn terrain_is_idempotent() {
        let gen = WorldGen::new(42);
        let mut c = Chunk::new(2, -1);
        c.generate_terrain(&gen);
        let first = c.clone();
        c.generate_terrain(&gen);
        assert!(c.same_voxels(&first));
        assert!(c.solid_count() > 0);
    }

    #[test]
    fn terrain_columns_are_filled_to_ground() {
        let gen = WorldGen::new(5);
        let mut c = Chunk::new(-1, 4);
        c.generate_terrain(&gen);

        let (ox, oz) = c.world_origin();
        assert_eq!((ox, oz), (-32, 128));
        for x in 0..32 {
            for z in 0..32 {
                let expect = gen.ground_height(ox + x as i64, oz + z as i64).clamp(0, 255);
                assert_eq!(c.column_height(x, z), Some(expect));
                for y in 0..256 {
                    assert_eq!(c.get_voxel(x, y, z), y <= expect, "({x}, {y}, {z})");
                }
            }
        }
    }

    #[test]
    fn terrain_height_is_clamped_to_chunk() {
        let gen = WorldGen::with_params(
            crate::world::NoiseField::new(1),
            TerrainParams { base_height: 200, height_variation: 400, noise_scale: 0.01 },
        );
        let mut c = Chunk::with_dims(ChunkKey::new(0, 0), small_dims());
        c.generate_terrain(&gen);
        for x in 0..8 {
            for z in 0..8 {
                assert_eq!(c.column_height(x, z), Some(63));
            }
        }

        let sunk = WorldGen::with_params(
            crate::world::NoiseField::new(1),
            TerrainParams { base_height: -100, height_variation: 10, noise_scale: 0.01 },
        );
        c.generate_terrain(&sunk);
        for x in 0..8 {
            for z in 0..8 {
                assert_eq!(c.column_height(x, z), Some(0));
            }
        }
    }

    #[test]
    fn positions_match_occupancy() {
        let mut c = Chunk::with_dims(ChunkKey::new(2, -3), small_dims());
        c.set_voxel(0, 0, 0, true);
        c.set_voxel(7, 63, 7, true);
        c.set_voxel(3, 10, 5, true);

        let got: Vec<Vec3> = c.solid_voxel_world_positions().to_vec();
        assert_eq!(
            got,
            vec![
                Vec3::new(16.0, 0.0, -24.0),
                Vec3::new(19.0, 10.0, -19.0),
                Vec3::new(23.0, 63.0, -17.0),
            ]
        );
    }

    #[test]
    fn positions_are_stable_until_a_write() {
        let gen = WorldGen::new(9);
        let mut c = Chunk::with_dims(ChunkKey::new(1, 1), small_dims());
        c.generate_terrain(&gen);

        let a = c.solid_voxel_world_positions().to_vec();
        let b = c.solid_voxel_world_positions().to_vec();
        assert_eq!(a, b);
        assert_eq!(a.len(), c.solid_count());

        c.set_voxel(0, 0, 0, false);
        assert!(c.cached_positions().is_none());
        let after = c.solid_voxel_world_positions().to_vec();
        assert_eq!(after.len(), a.len() - 1);
        assert!(!after.contains(&c.local_to_world(0, 0, 0)));
    }

    #[test]
    fn far_chunks_generate_without_overflow() {
        let gen = WorldGen::new(2);
        for key in [ChunkKey::new(i32::MAX, i32::MIN), ChunkKey::new(i32::MIN, i32::MAX)] {
            let mut c = Chunk::with_dims(key, small_dims());
            c.generate_terrain(&gen);
            assert_eq!(c.solid_count(), c.solid_voxel_world_positions().len());
            assert!(c.solid_count() > 0);
        }
        let c = Chunk::with_dims(ChunkKey::new(i32::MAX, 0), small_dims());
        assert_eq!(c.world_origin(), (i32::MAX as i64 * 8, 0));
    }

    #[test]
    fn index_does_not_wrap_for_wide_chunks() {
        // width * depth exceeds u32 while the voxel count stays small
        let dims = ChunkDims { width: 70_000, height: 1, depth: 70_000 };
        let c = Chunk { key: ChunkKey::new(0, 0), dims, bits: Vec::new(), positions: PositionCache::Stale };
        assert_eq!(c.index(1, 0, 1), Some(70_001));
        assert_eq!(c.index(0, 0, 69_999), Some(69_999 * 70_000));
    }

    #[test]
    fn local_to_world_offsets_xz_only() {
        let c = Chunk::new(-2, 3);
        assert_eq!(c.local_to_world(1, 77, 2), Vec3::new(-63.0, 77.0, 98.0));
    }
}
