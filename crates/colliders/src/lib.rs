//! Narrow-phase collider synthesis for playfield items.
//!
//! This crate turns decoded item descriptors into collision primitives:
//! - [`shapes`] - segment, circle, triangle, point, edge and polygon colliders
//! - [`edges`] - deduplication of shared mesh edges
//! - [`drag_points`] - spline outlines from authored control points
//! - [`builders`] - per-kind builders and the mesh collider assembler
//! - [`prototypes`] - shared read-only target meshes
//!
//! [`build_colliders`] dispatches a single item; [`build_table`] builds a
//! whole table and keeps going past items with corrupt mesh data.
//!
//! Builders never write back into their inputs. Corrections a builder makes
//! (an inverted angle range, a mesh promoted to the playfield) are returned
//! in [`ItemColliders`].

pub mod builders;
pub mod context;
pub mod descriptors;
pub mod drag_points;
pub mod edges;
pub mod error;
pub mod prototypes;
pub mod shapes;
pub mod types;

pub use builders::*;
pub use context::*;
pub use descriptors::*;
pub use drag_points::*;
pub use edges::*;
pub use error::*;
pub use shapes::*;
pub use types::*;

use playfield_mesh::Mesh;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One playfield item to build colliders for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemDescriptor {
    Gate(GateData),
    Spinner(SpinnerData),
    Trigger(TriggerData),
    Target(TargetData),
    Primitive { data: PrimitiveData, mesh: Mesh },
}

impl ItemDescriptor {
    pub fn name(&self) -> &str {
        match self {
            Self::Gate(data) => &data.name,
            Self::Spinner(data) => &data.name,
            Self::Trigger(data) => &data.name,
            Self::Target(data) => &data.name,
            Self::Primitive { data, .. } => &data.name,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Gate(_) => ItemKind::Gate,
            Self::Spinner(_) => ItemKind::Spinner,
            Self::Trigger(_) => ItemKind::Trigger,
            Self::Target(_) => ItemKind::Target,
            Self::Primitive { .. } => ItemKind::Primitive,
        }
    }
}

/// Build the colliders for one item
pub fn build_colliders(
    item: &ItemDescriptor,
    ctx: &BuildContext<'_>,
) -> Result<ItemColliders, ColliderError> {
    match item {
        ItemDescriptor::Gate(data) => Ok(build_gate(data, ctx)),
        ItemDescriptor::Spinner(data) => Ok(build_spinner(data, ctx)),
        ItemDescriptor::Trigger(data) => Ok(build_trigger(data, ctx)),
        ItemDescriptor::Target(data) => build_target(data, ctx),
        ItemDescriptor::Primitive { data, mesh } => build_primitive(data, mesh, ctx),
    }
}

/// Colliders for a whole table
#[derive(Debug, Default)]
pub struct TableColliders {
    /// Successfully built items, in input order
    pub items: Vec<ItemColliders>,
    /// Items that failed, with the reason
    pub failures: Vec<(String, ColliderError)>,
}

impl TableColliders {
    /// Total collider count across all items
    pub fn collider_count(&self) -> usize {
        self.items.iter().map(ItemColliders::len).sum()
    }
}

/// Build every item; a failing item is logged and skipped.
pub fn build_table(items: &[ItemDescriptor], ctx: &BuildContext<'_>) -> TableColliders {
    let mut table = TableColliders::default();

    for item in items {
        match build_colliders(item, ctx) {
            Ok(colliders) => table.items.push(colliders),
            Err(err) => {
                warn!("{:?} `{}` skipped: {}", item.kind(), item.name(), err);
                table.failures.push((item.name().to_string(), err));
            }
        }
    }

    info!(
        "Built {} colliders for {} items ({} failed)",
        table.collider_count(),
        table.items.len(),
        table.failures.len()
    );
    table
}
