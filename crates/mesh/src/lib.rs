//! Triangle meshes for playfield collision.
//!
//! This crate owns the mesh side of collider synthesis:
//! - [`types::Mesh`] - indexed triangle mesh with a packed vertex layout
//! - [`construction`] - decoding, index validation, cleanup and transforms
//! - [`budget`] - vertex budget for a reduction factor
//! - [`progressive`] - cost-ordered vertex collapse (progressive mesh)
//! - [`simplify`] - reduce a mesh to its budget
//!
//! # Simplification
//!
//! Authored meshes are often far denser than collision needs. A mesh is
//! simplified by computing a full collapse ordering once, then keeping the
//! first `N` vertices of the reordered array and routing every triangle
//! corner through the collapse map until it addresses a surviving vertex.
//! Triangles that collapse to a line or point are dropped.

pub mod budget;
pub mod construction;
pub mod progressive;
pub mod simplify;
pub mod types;

pub use budget::{sanitize_reduction_factor, target_vertex_count};
pub use construction::face_normal;
pub use progressive::ProgressiveMesh;
pub use simplify::{SimplifiedMesh, SimplifyStats, materialize, simplify};
pub use types::{Mesh, MeshError, MeshVertex};
