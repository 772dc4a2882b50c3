//! Rotated bar shared by gates and spinners.

use glam::Vec2;

use crate::context::BuildContext;
use crate::shapes::{Circle, Collider, Segment, ZBand};
use crate::types::{AngleCorrection, ColliderHeader};

/// Straight bar centered on `center`, turned `rotation` degrees from +X
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedBar {
    pub center: Vec2,
    pub length: f32,
    /// Degrees
    pub rotation: f32,
    /// Height of the bar above the surface
    pub height: f32,
    pub two_sided: bool,
    pub show_bracket: bool,
}

impl RotatedBar {
    /// All geometry fields are finite
    pub fn is_finite(&self) -> bool {
        self.center.is_finite()
            && self.length.is_finite()
            && self.rotation.is_finite()
            && self.height.is_finite()
    }

    pub fn half_length(&self) -> f32 {
        self.length.max(0.0) * 0.5
    }

    pub fn tangent(&self) -> Vec2 {
        Vec2::from_angle(self.rotation.to_radians())
    }

    /// Bar endpoints pushed out by `margin` on each side
    pub fn endpoints(&self, margin: f32) -> [Vec2; 2] {
        let offset = (self.half_length() + margin) * self.tangent();
        [self.center + offset, self.center - offset]
    }

    /// Face segments and bracket posts for the bar on a surface at `surface_height`.
    pub fn colliders(
        &self,
        surface_height: f32,
        header: &ColliderHeader,
        ctx: &BuildContext<'_>,
    ) -> Vec<Collider> {
        let config = ctx.config;
        let mut colliders = Vec::with_capacity(4);

        // Two-sided bars get no face segments, only posts
        if !self.two_sided {
            let [a, b] = self.endpoints(config.skin);
            let band = ZBand::new(surface_height, surface_height + config.bar_band_height());
            let front = Segment::new(header.clone(), a, b, band);
            let back = front.reversed();
            colliders.push(Collider::Segment(front));
            colliders.push(Collider::Segment(back));
        }

        if self.show_bracket {
            let low = surface_height + self.height;
            let band = ZBand::new(low, low + config.bracket_post_height);
            for post in self.endpoints(0.0) {
                colliders.push(Collider::Circle(Circle::new(
                    header.clone(),
                    post,
                    config.bracket_radius,
                    band,
                )));
            }
        }

        colliders
    }
}

/// Swap an inverted angle range. `None` when the range is already ordered.
pub fn correct_angles(angle_min: f32, angle_max: f32) -> Option<AngleCorrection> {
    (angle_min > angle_max).then_some(AngleCorrection {
        angle_min: angle_max,
        angle_max: angle_min,
    })
}
