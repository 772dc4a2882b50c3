//! Construction, validation and cleanup for [`Mesh`].

use glam::{Affine3A, Vec3};
use tracing::debug;

use crate::types::{Mesh, MeshError, MeshVertex};

impl Mesh {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Build a mesh from bare positions (normals and UVs zeroed)
    pub fn from_positions(positions: &[Vec3], indices: Vec<u32>) -> Self {
        Self {
            vertices: positions.iter().copied().map(MeshVertex::from_position).collect(),
            indices,
        }
    }

    /// Decode a raw vertex buffer of packed [`MeshVertex`] records.
    ///
    /// The buffer does not need to be aligned; each record is read unaligned.
    pub fn from_vertex_bytes(bytes: &[u8], indices: Vec<u32>) -> Result<Self, MeshError> {
        let stride = std::mem::size_of::<MeshVertex>();
        if bytes.len() % stride != 0 {
            return Err(MeshError::MisalignedVertexBuffer {
                len: bytes.len(),
                stride,
            });
        }

        let vertices = bytes
            .chunks_exact(stride)
            .map(bytemuck::pod_read_unaligned::<MeshVertex>)
            .collect();

        Ok(Self { vertices, indices })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of whole triangles in the index list
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.vertices.iter().map(MeshVertex::position).collect()
    }

    /// Iterate whole index triples; a trailing partial triple is ignored
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Check that every index addresses an existing vertex.
    ///
    /// `item` names the owning playfield item in the error.
    pub fn validate_indices(&self, item: &str) -> Result<(), MeshError> {
        let vertex_count = self.vertices.len();
        for (i, &index) in self.indices.iter().enumerate() {
            if index as usize >= vertex_count {
                return Err(MeshError::IndexOutOfRange {
                    item: item.to_string(),
                    triangle: i / 3,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Copy of this mesh with degenerate triangles (repeated indices) and
    /// any trailing partial triple removed. Vertices are untouched.
    pub fn cleaned(&self) -> Mesh {
        let indices: Vec<u32> = self
            .triangles()
            .filter(|&[a, b, c]| a != b && b != c && a != c)
            .flatten()
            .collect();

        let dropped = self.triangle_count() - indices.len() / 3;
        if dropped > 0 || self.indices.len() % 3 != 0 {
            debug!(
                "cleaned: dropped {} degenerate triangles, {} stray indices",
                dropped,
                self.indices.len() % 3
            );
        }

        Mesh {
            vertices: self.vertices.clone(),
            indices,
        }
    }

    /// Deep copy with `transform` applied to positions and normals.
    pub fn transformed(&self, transform: &Affine3A) -> Mesh {
        let normal_matrix = transform.matrix3.inverse().transpose();
        let vertices = self
            .vertices
            .iter()
            .map(|v| MeshVertex {
                position: transform.transform_point3(v.position()).to_array(),
                normal: (normal_matrix * Vec3::from_array(v.normal))
                    .normalize_or_zero()
                    .to_array(),
                uv: v.uv,
            })
            .collect();

        Mesh {
            vertices,
            indices: self.indices.clone(),
        }
    }

    /// Recalculate vertex normals from area-weighted face normals.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for [a, b, c] in self.triangles() {
            let (Some(va), Some(vb), Some(vc)) = (
                self.vertices.get(a as usize),
                self.vertices.get(b as usize),
                self.vertices.get(c as usize),
            ) else {
                continue;
            };
            let weighted = (vb.position() - va.position()).cross(vc.position() - va.position());
            normals[a as usize] += weighted;
            normals[b as usize] += weighted;
            normals[c as usize] += weighted;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = normal.normalize_or_zero().to_array();
        }
    }
}

/// Unit normal of a triangle, zero if it has no area
pub fn face_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    (p1 - p0).cross(p2 - p0).normalize_or_zero()
}
