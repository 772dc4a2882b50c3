use tracing::warn;

use super::bar::{RotatedBar, correct_angles};
use crate::context::BuildContext;
use crate::descriptors::GateData;
use crate::types::{ColliderHeader, ItemColliders, ItemKind, ItemTag};

/// Bar segments and bracket posts for a gate.
///
/// An inverted `angle_min`/`angle_max` pair is reported in
/// [`ItemColliders::angle_correction`]; `data` is left untouched.
pub fn build_gate(data: &GateData, ctx: &BuildContext<'_>) -> ItemColliders {
    let tag = ItemTag::new(&data.name, ItemKind::Gate);
    let mut out = ItemColliders::new(tag.clone());
    out.angle_correction = correct_angles(data.angle_min, data.angle_max);

    let bar = RotatedBar {
        center: data.center,
        length: data.length,
        rotation: data.rotation,
        height: data.height,
        two_sided: data.two_way,
        show_bracket: data.show_bracket,
    };
    if !bar.is_finite() {
        warn!("gate `{}`: non-finite geometry, skipped", data.name);
        return out;
    }

    let header = ColliderHeader::new(tag)
        .with_material(data.material)
        .with_events(data.hit_event, 0.0)
        .with_enabled(data.collidable);

    let surface_height = ctx.surface_height(&data.surface, data.center.x, data.center.y);
    out.colliders = bar.colliders(surface_height, &header, ctx);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SurfaceHeights;
    use crate::types::AngleCorrection;
    use glam::Vec2;
    use playfield_config::ColliderConfig;

    fn gate() -> GateData {
        GateData {
            name: "Gate1".to_string(),
            center: Vec2::new(200.0, 300.0),
            length: 80.0,
            rotation: 30.0,
            show_bracket: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_one_way_gate_span_matches_length() {
        let config = ColliderConfig::default();
        let surfaces = SurfaceHeights::new(0.0);
        let ctx = BuildContext::new(&config, &surfaces);

        let out = build_gate(&gate(), &ctx);
        assert_eq!(out.len(), 2);
        for collider in &out.colliders {
            let seg = collider.as_segment().unwrap();
            assert!((seg.length - 2.0 * config.skin - 80.0).abs() < 1e-3);
            let dir = (seg.v1 - seg.v2).normalize();
            let angle = dir.y.atan2(dir.x).to_degrees();
            // Either winding lies along the authored rotation
            assert!((angle - 30.0).abs() < 1e-3 || (angle + 150.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_two_way_gate_has_no_segments() {
        let config = ColliderConfig::default();
        let surfaces = SurfaceHeights::new(0.0);
        let ctx = BuildContext::new(&config, &surfaces);

        let data = GateData {
            two_way: true,
            ..gate()
        };
        assert!(build_gate(&data, &ctx).is_empty());
    }

    #[test]
    fn test_gate_sits_on_its_surface() {
        let config = ColliderConfig::default();
        let surfaces = SurfaceHeights::new(0.0).with_surface("Wall1", 25.0);
        let ctx = BuildContext::new(&config, &surfaces);

        let data = GateData {
            surface: "Wall1".to_string(),
            ..gate()
        };
        let out = build_gate(&data, &ctx);
        let band = out.colliders[0].band().unwrap();
        assert_eq!(band.low, 25.0);
    }

    #[test]
    fn test_gate_header() {
        let config = ColliderConfig::default();
        let surfaces = SurfaceHeights::new(0.0);
        let ctx = BuildContext::new(&config, &surfaces);

        let data = GateData {
            collidable: false,
            hit_event: true,
            ..gate()
        };
        let out = build_gate(&data, &ctx);
        let header = out.colliders[0].header();
        assert!(!header.enabled);
        assert!(header.fires_events);
        assert_eq!(header.material, data.material);
        assert_eq!(&*header.item.name, "Gate1");
        assert_eq!(header.item.kind, ItemKind::Gate);
    }

    #[test]
    fn test_inverted_angles_reported_not_written() {
        let config = ColliderConfig::default();
        let surfaces = SurfaceHeights::new(0.0);
        let ctx = BuildContext::new(&config, &surfaces);

        let data = GateData {
            angle_min: 1.0,
            angle_max: -0.5,
            ..gate()
        };
        let out = build_gate(&data, &ctx);
        assert_eq!(
            out.angle_correction,
            Some(AngleCorrection {
                angle_min: -0.5,
                angle_max: 1.0
            })
        );
        assert_eq!(data.angle_min, 1.0);
    }

    #[test]
    fn test_non_finite_gate_skipped() {
        let config = ColliderConfig::default();
        let surfaces = SurfaceHeights::new(0.0);
        let ctx = BuildContext::new(&config, &surfaces);

        let data = GateData {
            center: Vec2::new(f32::NAN, 0.0),
            ..gate()
        };
        assert!(build_gate(&data, &ctx).is_empty());
    }
}
