//! Trigger areas.
//!
//! Outline triggers become a ring of boundary segments plus a polygon for the
//! interior. Round triggers (star and button) collide as one circle.

use glam::Vec2;
use tracing::{debug, warn};

use crate::context::BuildContext;
use crate::descriptors::TriggerData;
use crate::drag_points::polyline;
use crate::shapes::{Circle, Collider, Polygon, Segment, ZBand};
use crate::types::{ColliderHeader, ItemColliders, ItemKind, ItemTag};

pub fn build_trigger(data: &TriggerData, ctx: &BuildContext<'_>) -> ItemColliders {
    let tag = ItemTag::new(&data.name, ItemKind::Trigger);
    let mut out = ItemColliders::new(tag.clone());

    if !data.center.is_finite() || !data.hit_height.is_finite() {
        warn!("trigger `{}`: non-finite geometry, skipped", data.name);
        return out;
    }

    let header = ColliderHeader::new(tag)
        .with_events(true, 0.0)
        .with_enabled(data.enabled);
    let surface_height = ctx.surface_height(&data.surface, data.center.x, data.center.y);

    out.colliders = if data.shape.is_round() {
        round_trigger(data, surface_height, header)
    } else {
        outline_trigger(data, surface_height, header, ctx)
    };
    out
}

fn round_trigger(data: &TriggerData, surface_height: f32, header: ColliderHeader) -> Vec<Collider> {
    if !data.radius.is_finite() {
        return Vec::new();
    }
    let band = ZBand::new(surface_height, surface_height + data.hit_height);
    vec![Collider::Circle(Circle::new(header, data.center, data.radius, band))]
}

fn outline_trigger(
    data: &TriggerData,
    surface_height: f32,
    header: ColliderHeader,
    ctx: &BuildContext<'_>,
) -> Vec<Collider> {
    let config = ctx.config;

    // Wound against the authoring order
    let mut outline: Vec<Vec2> = polyline(&data.drag_points, true, config.drag_point_accuracy);
    outline.retain(|p| p.is_finite());
    outline.reverse();

    if outline.len() < 3 {
        debug!(
            "trigger `{}`: outline has {} points, no colliders",
            data.name,
            outline.len()
        );
        return Vec::new();
    }

    let z_low = surface_height + config.bar_band_height();
    let z_high = z_low + (data.hit_height - config.trigger_hit_height_offset).max(0.0);
    let band = ZBand::new(z_low, z_high);

    let count = outline.len();
    let mut colliders = Vec::with_capacity(count + 1);
    for i in 0..count {
        let segment = Segment::new(header.clone(), outline[i], outline[(i + 1) % count], band);
        if segment.length > 0.0 {
            colliders.push(Collider::Segment(segment));
        }
    }
    colliders.push(Collider::Polygon(Polygon::new(header, outline, z_low)));
    colliders
}
