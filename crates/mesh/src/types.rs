//! Type definitions for collision meshes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A mesh vertex as decoded from a table's vertex buffer.
///
/// Only `position` matters for collision; normal and UV ride along so the
/// buffer layout matches the source (8 floats, 32 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    /// Vertex with a position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: [0.0, 0.0, 0.0],
            uv: [0.0, 0.0],
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Indexed triangle mesh.
///
/// `indices` holds triples; they are not guaranteed to be unique or
/// non-degenerate until [`Mesh::cleaned`] has been applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

/// Errors at the mesh data boundary
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error(
        "Mesh `{item}`: triangle {triangle} references vertex {index}, but only {vertex_count} vertices exist"
    )]
    IndexOutOfRange {
        item: String,
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("Vertex buffer of {len} bytes is not a whole number of {stride}-byte vertices")]
    MisalignedVertexBuffer { len: usize, stride: usize },
}
