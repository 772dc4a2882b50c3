//! Edge deduplication for mesh colliders.
//!
//! Triangles are walked one at a time and each contributes its three edges.
//! An edge shared by two triangles would otherwise be emitted twice, so the
//! set keys edges by their unordered vertex-index pair and only the first
//! contribution of a pair produces a collider.
//!
//! ## Non-manifold edges
//!
//! An edge shared by three or more triangles follows the same rule: the first
//! contribution (in visitation order) supplies the collider geometry, every
//! later one is suppressed. The result is deterministic for a given triangle
//! order.
//!
//! ## Policy
//!
//! Under the default `EdgeColliderMode::AllEdges` every distinct edge gets a
//! collider, so a closed tetrahedron yields 6 edge colliders. Under
//! `EdgeColliderMode::BoundaryOnly` only edges contributed by exactly one
//! triangle do; see [`EdgeSet::boundary_colliders`]. A closed mesh then
//! yields none.

use std::collections::HashMap;

use glam::Vec3;
use tracing::trace;

use crate::shapes::{Collider, Line3D};
use crate::types::ColliderHeader;

/// Undirected edge, smaller vertex index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(u32, u32);

impl EdgeKey {
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn vertices(&self) -> (u32, u32) {
        (self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy)]
struct EdgeEntry {
    key: EdgeKey,
    /// Endpoint positions from the first contribution
    p0: Vec3,
    p1: Vec3,
    contributions: u32,
}

/// Edge set for one mesh assembly.
#[derive(Debug, Default)]
pub struct EdgeSet {
    entries: Vec<EdgeEntry>,
    index: HashMap<EdgeKey, usize>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(edges: usize) -> Self {
        Self {
            entries: Vec::with_capacity(edges),
            index: HashMap::with_capacity(edges),
        }
    }

    /// Record a contribution of edge `(i0, i1)`.
    ///
    /// Returns `true` if this is the first time the pair is seen.
    pub fn record(&mut self, i0: u32, i1: u32, p0: Vec3, p1: Vec3) -> bool {
        let key = EdgeKey::new(i0, i1);
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].contributions += 1;
            trace!("edges: suppressed repeat of {:?}", key);
            return false;
        }

        self.index.insert(key, self.entries.len());
        self.entries.push(EdgeEntry {
            key,
            p0,
            p1,
            contributions: 1,
        });
        true
    }

    /// Record edge `(i0, i1)` and emit its collider on first sight.
    ///
    /// Zero-length edges are recorded but never produce a collider.
    pub fn try_add_edge(
        &mut self,
        i0: u32,
        i1: u32,
        p0: Vec3,
        p1: Vec3,
        header: &ColliderHeader,
    ) -> Option<Collider> {
        if !self.record(i0, i1, p0, p1) {
            return None;
        }
        Line3D::new(header.clone(), p0, p1).map(Collider::Line3D)
    }

    /// Number of distinct edges seen
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, i0: u32, i1: u32) -> bool {
        self.index.contains_key(&EdgeKey::new(i0, i1))
    }

    /// How many times edge `(i0, i1)` was contributed
    pub fn contributions(&self, i0: u32, i1: u32) -> u32 {
        self.index
            .get(&EdgeKey::new(i0, i1))
            .map_or(0, |&slot| self.entries[slot].contributions)
    }

    /// Colliders for edges contributed by exactly one triangle, in first-seen order
    pub fn boundary_colliders<'a>(
        &'a self,
        header: &'a ColliderHeader,
    ) -> impl Iterator<Item = Collider> + 'a {
        self.entries
            .iter()
            .filter(|entry| entry.contributions == 1)
            .filter_map(move |entry| Line3D::new(header.clone(), entry.p0, entry.p1))
            .map(Collider::Line3D)
    }

    /// Keys of every edge seen, in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }
}
