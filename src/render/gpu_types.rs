// src/render/gpu_types.rs
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Per-instance data: one solid voxel, drawn as a unit cube centered on `pos`.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct CubeInstance {
    pub pos: [f32; 3],
    pub _pad: f32,
}

impl From<Vec3> for CubeInstance {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self { pos: v.to_array(), _pad: 0.0 }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct CubeVertex {
    pub pos: [f32; 3],
    pub color: [f32; 3],
}
