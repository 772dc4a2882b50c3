//! Progressive-mesh vertex collapse ordering.
//!
//! Every vertex is assigned a removal cost: the cheapest way to fold it into
//! one of its neighbors, measured as edge length times a curvature term
//! derived from the normals of the faces around the edge. Vertices are then
//! removed cheapest-first. Each removal records
//!
//! - the slot the vertex occupies in a reordered vertex array (the first
//!   vertex removed gets the last slot), and
//! - the slot of the vertex it was folded into.
//!
//! Reconstructing the mesh at any budget `N` is then a matter of reordering
//! the vertices, and walking each triangle index through the collapse map
//! until it lands below `N`.
//!
//! ## Layout
//!
//! The working mesh is an arena of flat arrays indexed by vertex and triangle
//! number. Removals are driven by a `BinaryHeap` worklist with lazy
//! invalidation: a vertex whose cost changes gets a new version stamp and a
//! fresh heap entry, and stale entries are discarded when popped.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::Vec3;
use tracing::{trace, warn};

use crate::construction::face_normal;

/// Cost assigned to vertices with no neighbors; they go first.
const ISOLATED_VERTEX_COST: f32 = -0.01;

/// Collapse ordering for one mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressiveMesh {
    /// `permutation[original_index]` is the vertex's slot in the reordered array
    pub permutation: Vec<u32>,
    /// `collapse_map[slot]` is the slot this vertex folds into (0 if it vanishes)
    pub collapse_map: Vec<u32>,
}

impl ProgressiveMesh {
    /// Compute the collapse ordering for a triangle mesh.
    ///
    /// Triangles must be non-degenerate. Triangles referencing a vertex
    /// outside `positions` are ignored.
    pub fn build(positions: &[Vec3], triangles: &[[u32; 3]]) -> Self {
        let vertex_count = positions.len();
        let mut arena = CollapseArena::new(positions, triangles);

        let mut permutation = vec![0u32; vertex_count];
        let mut collapse_target: Vec<Option<u32>> = vec![None; vertex_count];

        for slot in (0..vertex_count).rev() {
            let Some(vertex) = arena.pop_cheapest() else {
                break;
            };
            let target = arena.collapse_to[vertex as usize];
            trace!(
                "progressive: vertex {} -> slot {} (cost {}, into {:?})",
                vertex,
                slot,
                arena.cost[vertex as usize],
                target
            );
            permutation[vertex as usize] = slot as u32;
            collapse_target[slot] = target;
            arena.collapse(vertex, target);
        }

        let collapse_map = collapse_target
            .iter()
            .map(|target| target.map_or(0, |v| permutation[v as usize]))
            .collect();

        Self {
            permutation,
            collapse_map,
        }
    }

    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    /// Resolve a reordered slot to the slot that survives at `vertex_budget`.
    pub fn map(&self, slot: u32, vertex_budget: usize) -> u32 {
        if vertex_budget == 0 {
            return 0;
        }
        let mut slot = slot;
        // collapse_map[s] < s for every s > 0, so this terminates
        while slot as usize >= vertex_budget {
            match self.collapse_map.get(slot as usize) {
                Some(&next) => slot = next,
                None => return 0,
            }
        }
        slot
    }
}

/// Heap entry; ordered so the cheapest (then lowest-index) vertex pops first.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    cost: f32,
    vertex: u32,
    version: u32,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

#[derive(Debug, Clone, Copy)]
struct WorkTriangle {
    vertices: [u32; 3],
    normal: Vec3,
}

/// Mutable working state for one collapse run.
struct CollapseArena<'a> {
    positions: &'a [Vec3],
    triangles: Vec<WorkTriangle>,
    /// Live incident triangles per vertex
    faces: Vec<Vec<u32>>,
    removed: Vec<bool>,
    cost: Vec<f32>,
    collapse_to: Vec<Option<u32>>,
    version: Vec<u32>,
    heap: BinaryHeap<Candidate>,
}

impl<'a> CollapseArena<'a> {
    fn new(positions: &'a [Vec3], source: &[[u32; 3]]) -> Self {
        let vertex_count = positions.len();
        let mut triangles = Vec::with_capacity(source.len());
        let mut faces = vec![Vec::new(); vertex_count];

        let mut skipped = 0usize;
        for &[a, b, c] in source {
            let in_range = [a, b, c].iter().all(|&i| (i as usize) < vertex_count);
            if !in_range || a == b || b == c || a == c {
                skipped += 1;
                continue;
            }
            let id = triangles.len() as u32;
            triangles.push(WorkTriangle {
                vertices: [a, b, c],
                normal: face_normal(
                    positions[a as usize],
                    positions[b as usize],
                    positions[c as usize],
                ),
            });
            faces[a as usize].push(id);
            faces[b as usize].push(id);
            faces[c as usize].push(id);
        }
        if skipped > 0 {
            warn!("progressive: ignored {} invalid triangles", skipped);
        }

        let mut arena = Self {
            positions,
            triangles,
            faces,
            removed: vec![false; vertex_count],
            cost: vec![0.0; vertex_count],
            collapse_to: vec![None; vertex_count],
            version: vec![0; vertex_count],
            heap: BinaryHeap::with_capacity(vertex_count),
        };

        for v in 0..vertex_count as u32 {
            arena.refresh_cost(v);
        }
        arena
    }

    /// Distinct vertices sharing a live triangle with `v`
    fn neighbors(&self, v: u32) -> Vec<u32> {
        let mut out: Vec<u32> = self.faces[v as usize]
            .iter()
            .flat_map(|&t| self.triangles[t as usize].vertices)
            .filter(|&w| w != v)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Cost of folding `u` into `v`.
    fn edge_cost(&self, u: u32, v: u32) -> f32 {
        let length = self.positions[u as usize].distance(self.positions[v as usize]);

        let sides: Vec<Vec3> = self.faces[u as usize]
            .iter()
            .map(|&t| &self.triangles[t as usize])
            .filter(|tri| tri.vertices.contains(&v))
            .map(|tri| tri.normal)
            .collect();

        // Boundary edges carry the silhouette; treat them as maximally curved
        if sides.len() < 2 {
            return length;
        }

        let mut curvature = 0.0f32;
        for &t in &self.faces[u as usize] {
            let normal = self.triangles[t as usize].normal;
            let min_curvature = sides
                .iter()
                .map(|side| (1.0 - normal.dot(*side)) * 0.5)
                .fold(1.0f32, f32::min);
            curvature = curvature.max(min_curvature);
        }

        length * curvature
    }

    fn refresh_cost(&mut self, v: u32) {
        let neighbors = self.neighbors(v);

        let (cost, target) = if neighbors.is_empty() {
            (ISOLATED_VERTEX_COST, None)
        } else {
            let mut best = (f32::INFINITY, None);
            for n in neighbors {
                let cost = self.edge_cost(v, n);
                if best.1.is_none() || cost < best.0 {
                    best = (cost, Some(n));
                }
            }
            best
        };

        let i = v as usize;
        self.cost[i] = cost;
        self.collapse_to[i] = target;
        self.version[i] = self.version[i].wrapping_add(1);
        self.heap.push(Candidate {
            cost,
            vertex: v,
            version: self.version[i],
        });
    }

    fn pop_cheapest(&mut self) -> Option<u32> {
        while let Some(candidate) = self.heap.pop() {
            let i = candidate.vertex as usize;
            if !self.removed[i] && self.version[i] == candidate.version {
                return Some(candidate.vertex);
            }
        }
        // Every live vertex keeps one current entry; fall back to a scan anyway
        self.removed.iter().position(|r| !r).map(|i| i as u32)
    }

    /// Remove `u`, folding it into `v` when it has one.
    fn collapse(&mut self, u: u32, v: Option<u32>) {
        let former_neighbors = self.neighbors(u);
        let incident = std::mem::take(&mut self.faces[u as usize]);

        for t in incident {
            let vertices = self.triangles[t as usize].vertices;
            match v {
                Some(v) if !vertices.contains(&v) => {
                    let tri = &mut self.triangles[t as usize];
                    for slot in tri.vertices.iter_mut() {
                        if *slot == u {
                            *slot = v;
                        }
                    }
                    let [a, b, c] = tri.vertices;
                    tri.normal = face_normal(
                        self.positions[a as usize],
                        self.positions[b as usize],
                        self.positions[c as usize],
                    );
                    self.faces[v as usize].push(t);
                }
                _ => {
                    // Triangle spans the collapsed edge (or u vanishes): drop it
                    for w in vertices {
                        if w != u {
                            self.faces[w as usize].retain(|&f| f != t);
                        }
                    }
                }
            }
        }

        self.removed[u as usize] = true;

        for n in former_neighbors {
            if !self.removed[n as usize] {
                self.refresh_cost(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wavy height-field grid, `side` x `side` vertices.
    fn wavy_grid(side: u32) -> (Vec<Vec3>, Vec<[u32; 3]>) {
        let mut positions = Vec::new();
        for y in 0..side {
            for x in 0..side {
                let (fx, fy) = (x as f32, y as f32);
                positions.push(Vec3::new(fx, fy, (fx * 0.7).sin() * (fy * 0.3).cos()));
            }
        }
        let mut triangles = Vec::new();
        for y in 0..side - 1 {
            for x in 0..side - 1 {
                let i = y * side + x;
                triangles.push([i, i + 1, i + side]);
                triangles.push([i + 1, i + side + 1, i + side]);
            }
        }
        (positions, triangles)
    }

    #[test]
    fn test_permutation_is_bijection() {
        let (positions, triangles) = wavy_grid(12);
        let pm = ProgressiveMesh::build(&positions, &triangles);

        let mut seen = vec![false; positions.len()];
        for &slot in &pm.permutation {
            assert!(!seen[slot as usize], "slot {} assigned twice", slot);
            seen[slot as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_collapse_map_points_to_earlier_slots() {
        let (positions, triangles) = wavy_grid(10);
        let pm = ProgressiveMesh::build(&positions, &triangles);

        for (slot, &target) in pm.collapse_map.iter().enumerate().skip(1) {
            assert!(
                (target as usize) < slot,
                "slot {} collapses into later slot {}",
                slot,
                target
            );
        }
    }

    #[test]
    fn test_isolated_vertex_removed_first() {
        let (mut positions, triangles) = wavy_grid(5);
        positions.push(Vec3::new(100.0, 100.0, 100.0));
        let isolated = positions.len() - 1;

        let pm = ProgressiveMesh::build(&positions, &triangles);
        assert_eq!(pm.permutation[isolated] as usize, positions.len() - 1);
        assert_eq!(pm.collapse_map[positions.len() - 1], 0);
    }

    #[test]
    fn test_flat_interior_cheaper_than_ridge() {
        // Two flat fans meeting at a sharp fold along x = 0
        let positions = vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-0.5, 0.0, 0.0),
        ];
        let triangles = vec![
            [0, 2, 6],
            [2, 3, 6],
            [3, 1, 6],
            [1, 0, 6],
            [2, 4, 3],
            [4, 5, 3],
        ];
        let arena = CollapseArena::new(&positions, &triangles);

        // Vertex 6 sits in the middle of a flat fan: free to remove
        assert!(arena.cost[6].abs() < 1e-6);
        // Folding along the crease costs something
        assert!(arena.edge_cost(2, 4) > 0.0);
    }

    #[test]
    fn test_map_respects_budget() {
        let (positions, triangles) = wavy_grid(8);
        let pm = ProgressiveMesh::build(&positions, &triangles);

        for budget in [1usize, 5, 20, 64] {
            for slot in 0..positions.len() as u32 {
                assert!((pm.map(slot, budget) as usize) < budget);
            }
        }
        assert_eq!(pm.map(7, 0), 0);
    }

    #[test]
    fn test_empty_mesh() {
        let pm = ProgressiveMesh::build(&[], &[]);
        assert!(pm.is_empty());
    }
}
