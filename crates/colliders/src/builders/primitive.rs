//! Mesh collider assembly.
//!
//! A mesh item becomes one triangle collider per face, one edge collider per
//! distinct edge and one point collider per vertex. Large meshes go through
//! the simplifier first.

use playfield_config::EdgeColliderMode;
use playfield_mesh::{Mesh, SimplifyStats, simplify};
use tracing::{debug, warn};

use crate::context::BuildContext;
use crate::descriptors::PrimitiveData;
use crate::edges::EdgeSet;
use crate::error::ColliderError;
use crate::shapes::{Collider, Point, Triangle};
use crate::types::{ColliderHeader, ItemColliders, ItemKind, ItemTag, PlayfieldOverride};

/// Output of [`assemble_mesh`]
#[derive(Debug, Clone, Default)]
pub struct MeshColliders {
    pub colliders: Vec<Collider>,
    /// `None` when simplification was not requested
    pub stats: Option<SimplifyStats>,
}

/// Turn a world-space mesh into colliders.
///
/// `reduction_factor` of `None` skips simplification (degenerate triangles
/// are still dropped). The mesh is wound clockwise for rendering, so each
/// triangle collider takes its corners in `(v0, v2, v1)` order. Vertices
/// with non-finite positions get no point collider, and triangles touching
/// them are skipped along with their edges.
pub fn assemble_mesh(
    item: &str,
    mesh: &Mesh,
    header: &ColliderHeader,
    reduction_factor: Option<f32>,
    ctx: &BuildContext<'_>,
) -> Result<MeshColliders, ColliderError> {
    mesh.validate_indices(item)?;

    let (mesh, stats) = match reduction_factor {
        Some(factor) => {
            let simplified = simplify(item, mesh, factor, ctx.config.min_simplified_vertices)?;
            (simplified.mesh, Some(simplified.stats))
        }
        None => (mesh.cleaned(), None),
    };

    let positions = mesh.positions();
    let mut colliders = Vec::with_capacity(mesh.triangle_count() * 2 + positions.len());
    let mut edges = EdgeSet::with_capacity(mesh.triangle_count() * 3 / 2);
    let mut skipped = 0usize;
    let mut non_finite = 0usize;

    for [i0, i1, i2] in mesh.triangles() {
        let [p0, p1, p2] = [i0, i1, i2].map(|i| positions[i as usize]);
        if ![p0, p1, p2].iter().all(|p| p.is_finite()) {
            non_finite += 1;
            continue;
        }

        match Triangle::new(header.clone(), [p0, p2, p1]) {
            Some(triangle) => colliders.push(Collider::Triangle(triangle)),
            None => skipped += 1,
        }

        for (a, b, pa, pb) in [(i0, i1, p0, p1), (i1, i2, p1, p2), (i2, i0, p2, p0)] {
            match ctx.config.edge_mode {
                EdgeColliderMode::AllEdges => {
                    colliders.extend(edges.try_add_edge(a, b, pa, pb, header));
                }
                EdgeColliderMode::BoundaryOnly => {
                    edges.record(a, b, pa, pb);
                }
            }
        }
    }

    if ctx.config.edge_mode == EdgeColliderMode::BoundaryOnly {
        colliders.extend(edges.boundary_colliders(header));
    }

    colliders.extend(
        positions
            .iter()
            .filter(|p| p.is_finite())
            .map(|&p| Collider::Point(Point::new(header.clone(), p))),
    );

    if non_finite > 0 {
        warn!(
            "assemble `{}`: skipped {} triangles with non-finite vertices",
            item, non_finite
        );
    }

    debug!(
        "assemble `{}`: {} triangles ({} flat skipped), {} edges, {} points",
        item,
        mesh.triangle_count() - skipped - non_finite,
        skipped,
        edges.len(),
        positions.len()
    );

    Ok(MeshColliders { colliders, stats })
}

/// Colliders for a free-form mesh item.
///
/// An item named `playfield_mesh` or flagged `use_as_playfield` is treated
/// as the playfield: it collides even when authored as a toy, uses the table
/// material, and the effective flags come back in
/// [`ItemColliders::playfield`].
pub fn build_primitive(
    data: &PrimitiveData,
    mesh: &Mesh,
    ctx: &BuildContext<'_>,
) -> Result<ItemColliders, ColliderError> {
    let tag = ItemTag::new(&data.name, ItemKind::Primitive);
    let mut out = ItemColliders::new(tag.clone());

    let is_playfield = data.is_playfield();
    if is_playfield {
        out.playfield = Some(PlayfieldOverride::PLAYFIELD);
    } else if data.is_toy {
        debug!("primitive `{}`: toy, no colliders", data.name);
        return Ok(out);
    }

    if !(data.position.is_finite() && data.size.is_finite() && data.rotation.is_finite()) {
        warn!("primitive `{}`: non-finite transform, skipped", data.name);
        return Ok(out);
    }

    let material = if is_playfield {
        ctx.table_material
    } else {
        data.material
    };
    let header = ColliderHeader::new(tag)
        .with_material(material)
        .with_events(data.hit_event, data.threshold)
        .with_enabled(data.collidable);

    let world = mesh.transformed(&data.world_transform());

    let assembled = assemble_mesh(&data.name, &world, &header, Some(data.reduction_factor), ctx)?;
    out.colliders = assembled.colliders;
    out.simplify_stats = assembled.stats;
    Ok(out)
}
