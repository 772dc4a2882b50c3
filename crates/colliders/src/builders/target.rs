use glam::{Affine3A, Quat};
use tracing::warn;

use super::primitive::assemble_mesh;
use crate::context::BuildContext;
use crate::descriptors::TargetData;
use crate::error::ColliderError;
use crate::prototypes::target_prototype;
use crate::types::{ColliderHeader, ItemColliders, ItemKind, ItemTag};

/// Mesh colliders for a drop or hit target.
///
/// The shared prototype for the target model is copied, scaled, turned by
/// `rot_z` and placed on its surface. Target meshes are small and never
/// simplified. A dropped target's colliders are disabled.
pub fn build_target(data: &TargetData, ctx: &BuildContext<'_>) -> Result<ItemColliders, ColliderError> {
    let tag = ItemTag::new(&data.name, ItemKind::Target);
    let mut out = ItemColliders::new(tag.clone());

    if !data.position.is_finite() || !data.size.is_finite() || !data.rot_z.is_finite() {
        warn!("target `{}`: non-finite geometry, skipped", data.name);
        return Ok(out);
    }

    let header = ColliderHeader::new(tag)
        .with_material(data.material)
        .with_events(data.hit_event, data.threshold)
        .with_enabled(data.collidable && !data.is_dropped);

    let mut position = data.position;
    position.z += ctx.surface_height(&data.surface, position.x, position.y);
    let transform = Affine3A::from_scale_rotation_translation(
        data.size,
        Quat::from_rotation_z(data.rot_z.to_radians()),
        position,
    );
    let mesh = target_prototype(data.target_type).transformed(&transform);

    out.colliders = assemble_mesh(&data.name, &mesh, &header, None, ctx)?.colliders;
    Ok(out)
}
