use tracing::warn;

use super::bar::{RotatedBar, correct_angles};
use crate::context::BuildContext;
use crate::descriptors::SpinnerData;
use crate::types::{ColliderHeader, ItemColliders, ItemKind, ItemTag};

/// Bar segments and bracket posts for a spinner.
///
/// Spinners are always one-sided. The flap itself is dynamic and not built here.
pub fn build_spinner(data: &SpinnerData, ctx: &BuildContext<'_>) -> ItemColliders {
    let tag = ItemTag::new(&data.name, ItemKind::Spinner);
    let mut out = ItemColliders::new(tag.clone());
    out.angle_correction = correct_angles(data.angle_min, data.angle_max);

    let bar = RotatedBar {
        center: data.center,
        length: data.length,
        rotation: data.rotation,
        height: data.height,
        two_sided: false,
        show_bracket: data.show_bracket,
    };
    if !bar.is_finite() {
        warn!("spinner `{}`: non-finite geometry, skipped", data.name);
        return out;
    }

    let header = ColliderHeader::new(tag)
        .with_material(data.material)
        .with_enabled(data.collidable);

    let surface_height = ctx.surface_height(&data.surface, data.center.x, data.center.y);
    out.colliders = bar.colliders(surface_height, &header, ctx);
    out
}
