//! Collision-mesh simplification entry point.

use tracing::debug;

use crate::budget::{sanitize_reduction_factor, target_vertex_count};
use crate::progressive::ProgressiveMesh;
use crate::types::{Mesh, MeshError, MeshVertex};

/// Bookkeeping for one simplification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimplifyStats {
    pub original_vertices: usize,
    pub original_triangles: usize,
    pub target_vertices: usize,
    pub final_vertices: usize,
    pub final_triangles: usize,
    /// False when the target did not undercut the original count
    pub simplified: bool,
}

/// Output of [`simplify`].
///
/// Vertex normals of a simplified mesh are stale; call
/// [`Mesh::recompute_normals`] if they are needed.
#[derive(Debug, Clone)]
pub struct SimplifiedMesh {
    pub mesh: Mesh,
    pub stats: SimplifyStats,
}

/// Reduce `mesh` to the vertex budget derived from `reduction_factor`.
///
/// Degenerate triangles are always removed. When the budget is not below the
/// vertex count the cleaned mesh is returned unchanged. An index past the
/// vertex array fails with [`MeshError::IndexOutOfRange`] naming `item`.
pub fn simplify(
    item: &str,
    mesh: &Mesh,
    reduction_factor: f32,
    floor: usize,
) -> Result<SimplifiedMesh, MeshError> {
    mesh.validate_indices(item)?;

    let cleaned = mesh.cleaned();
    let original_vertices = cleaned.vertex_count();
    let original_triangles = cleaned.triangle_count();

    let target_vertices = target_vertex_count(
        original_vertices,
        sanitize_reduction_factor(reduction_factor),
        floor,
    );

    if target_vertices >= original_vertices {
        return Ok(SimplifiedMesh {
            stats: SimplifyStats {
                original_vertices,
                original_triangles,
                target_vertices,
                final_vertices: original_vertices,
                final_triangles: original_triangles,
                simplified: false,
            },
            mesh: cleaned,
        });
    }

    let triangles: Vec<[u32; 3]> = cleaned.triangles().collect();
    let progressive = ProgressiveMesh::build(&cleaned.positions(), &triangles);
    let reduced = materialize(&cleaned, &progressive, target_vertices);

    let stats = SimplifyStats {
        original_vertices,
        original_triangles,
        target_vertices,
        final_vertices: reduced.vertex_count(),
        final_triangles: reduced.triangle_count(),
        simplified: true,
    };
    debug!(
        "simplify: {} -> {} vertices, {} -> {} triangles",
        stats.original_vertices, stats.final_vertices, stats.original_triangles, stats.final_triangles
    );

    Ok(SimplifiedMesh {
        mesh: reduced,
        stats,
    })
}

/// Rebuild `mesh` at `vertex_budget` vertices from a collapse ordering.
///
/// Triangles with an index the ordering does not cover are dropped.
pub fn materialize(mesh: &Mesh, progressive: &ProgressiveMesh, vertex_budget: usize) -> Mesh {
    let budget = vertex_budget.min(mesh.vertex_count());

    let mut vertices = vec![MeshVertex::default(); mesh.vertex_count()];
    for (vertex, &slot) in mesh.vertices.iter().zip(&progressive.permutation) {
        if let Some(target) = vertices.get_mut(slot as usize) {
            *target = *vertex;
        }
    }
    vertices.truncate(budget);

    let slot_of = |i: u32| progressive.permutation.get(i as usize).copied();
    let indices = mesh
        .triangles()
        .filter_map(|[a, b, c]| Some([slot_of(a)?, slot_of(b)?, slot_of(c)?]))
        .map(|tri| tri.map(|slot| progressive.map(slot, budget)))
        .filter(|&[a, b, c]| a != b && b != c && a != c)
        .flatten()
        .collect();

    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const FLOOR: usize = 420;

    fn bumpy_grid(side: u32) -> Mesh {
        let mut positions = Vec::new();
        for y in 0..side {
            for x in 0..side {
                let (fx, fy) = (x as f32, y as f32);
                positions.push(Vec3::new(fx, fy, (fx * 0.5).sin() + (fy * 0.4).cos()));
            }
        }
        let mut indices = Vec::new();
        for y in 0..side - 1 {
            for x in 0..side - 1 {
                let i = y * side + x;
                indices.extend_from_slice(&[i, i + 1, i + side, i + 1, i + side + 1, i + side]);
            }
        }
        Mesh::from_positions(&positions, indices)
    }

    #[test]
    fn test_simplify_lands_on_floor() {
        let mesh = bumpy_grid(30); // 900 vertices, 900^0.75 < 420
        let result = simplify("grid", &mesh, 1.0, FLOOR).unwrap();

        assert!(result.stats.simplified);
        assert_eq!(result.stats.target_vertices, FLOOR);
        assert_eq!(result.mesh.vertex_count(), FLOOR);
        assert!(result.mesh.triangle_count() > 0);
        assert!(result.mesh.indices.iter().all(|&i| (i as usize) < FLOOR));
    }

    #[test]
    fn test_simplify_never_exceeds_target() {
        let mesh = bumpy_grid(60);
        let result = simplify("grid", &mesh, 1.0, FLOOR).unwrap();
        let expected = target_vertex_count(3600, 1.0, FLOOR);

        assert!(expected > FLOOR);
        assert_eq!(result.mesh.vertex_count(), expected);
        assert!(result.mesh.vertex_count() >= FLOOR.min(3600));
        assert!(result.mesh.indices.iter().all(|&i| (i as usize) < expected));
    }

    #[test]
    fn test_simplified_triangles_are_not_degenerate() {
        let result = simplify("grid", &bumpy_grid(30), 1.0, FLOOR).unwrap();
        for [a, b, c] in result.mesh.triangles() {
            assert!(a != b && b != c && a != c);
        }
    }

    #[test]
    fn test_small_mesh_is_identity() {
        let mut mesh = bumpy_grid(10);
        mesh.indices.extend_from_slice(&[3, 3, 4]);
        let cleaned = mesh.cleaned();

        let result = simplify("grid", &mesh, 1.0, FLOOR).unwrap();
        assert!(!result.stats.simplified);
        assert_eq!(result.mesh.indices, cleaned.indices);
        assert_eq!(result.mesh.vertices, cleaned.vertices);
    }

    #[test]
    fn test_zero_reduction_is_identity() {
        let mesh = bumpy_grid(30);
        let result = simplify("grid", &mesh, 0.0, FLOOR).unwrap();
        assert!(!result.stats.simplified);
        assert_eq!(result.mesh.indices, mesh.indices);
    }

    #[test]
    fn test_empty_mesh() {
        let result = simplify("empty", &Mesh::default(), 1.0, FLOOR).unwrap();
        assert_eq!(result.mesh.vertex_count(), 0);
        assert_eq!(result.mesh.triangle_count(), 0);
    }

    #[test]
    fn test_points_only_mesh_keeps_vertices() {
        let positions: Vec<Vec3> = (0..500).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let mesh = Mesh::from_positions(&positions, vec![0, 1]);
        let result = simplify("grid", &mesh, 1.0, FLOOR).unwrap();

        assert_eq!(result.mesh.triangle_count(), 0);
        assert_eq!(result.mesh.vertex_count(), FLOOR);
    }

    #[test]
    fn test_materialize_full_budget_preserves_triangle_count() {
        let mesh = bumpy_grid(6);
        let triangles: Vec<[u32; 3]> = mesh.triangles().collect();
        let pm = ProgressiveMesh::build(&mesh.positions(), &triangles);
        let full = materialize(&mesh, &pm, mesh.vertex_count());

        assert_eq!(full.vertex_count(), mesh.vertex_count());
        assert_eq!(full.triangle_count(), mesh.triangle_count());
    }

    #[test]
    fn test_simplify_rejects_corrupt_index() {
        let mut mesh = bumpy_grid(30);
        mesh.indices.extend_from_slice(&[0, 1, 9999]);

        let err = simplify("Ramp", &mesh, 1.0, FLOOR).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                index: 9999,
                vertex_count: 900,
                ..
            }
        ));
        assert!(err.to_string().contains("Ramp"));
    }

    #[test]
    fn test_materialize_drops_uncovered_triangles() {
        let mesh = bumpy_grid(6);
        let triangles: Vec<[u32; 3]> = mesh.triangles().collect();
        let pm = ProgressiveMesh::build(&mesh.positions(), &triangles);

        let mut corrupt = mesh.clone();
        corrupt.indices.extend_from_slice(&[0, 1, 9999]);
        let full = materialize(&corrupt, &pm, mesh.vertex_count());
        assert_eq!(full.triangle_count(), mesh.triangle_count());
    }
}
