// Instance data handed to whatever draws the world. No GPU code lives here.

pub mod gpu_types;

pub use gpu_types::*;

use crate::streaming::ChunkCache;

// Unit cube, shades of green per corner.
pub const CUBE_VERTICES: [CubeVertex; 8] = [
    CubeVertex { pos: [-0.5, -0.5, -0.5], color: [0.1, 0.5, 0.1] },
    CubeVertex { pos: [0.5, -0.5, -0.5], color: [0.2, 0.7, 0.2] },
    CubeVertex { pos: [0.5, 0.5, -0.5], color: [0.3, 0.9, 0.3] },
    CubeVertex { pos: [-0.5, 0.5, -0.5], color: [0.1, 0.6, 0.1] },
    CubeVertex { pos: [-0.5, -0.5, 0.5], color: [0.2, 0.8, 0.2] },
    CubeVertex { pos: [0.5, -0.5, 0.5], color: [0.4, 1.0, 0.3] },
    CubeVertex { pos: [0.5, 0.5, 0.5], color: [0.3, 0.8, 0.4] },
    CubeVertex { pos: [-0.5, 0.5, 0.5], color: [0.1, 0.7, 0.2] },
];

pub const CUBE_INDICES: [u32; 36] = [
    0, 1, 2, 2, 3, 0, // -Z
    4, 7, 6, 6, 5, 4, // +Z
    0, 3, 7, 7, 4, 0, // -X
    1, 5, 6, 6, 2, 1, // +X
    0, 4, 5, 5, 1, 0, // -Y
    3, 2, 6, 6, 7, 3, // +Y
];

/// Flattens every live chunk's solid voxels into one instance list.
/// Chunks whose cached positions are fresh are not rescanned.
pub fn collect_instances(cache: &mut ChunkCache) -> Vec<CubeInstance> {
    let mut out = Vec::new();
    for chunk in cache.chunks_mut() {
        let positions = chunk.solid_voxel_world_positions();
        out.reserve(positions.len());
        out.extend(positions.iter().copied().map(CubeInstance::from));
    }
    out
}
