//! Narrow-phase collider shapes.
//!
//! These are value types: geometry, a depth band where it applies, and a
//! [`ColliderHeader`] with the owning item, flags and material. Hit testing
//! belongs to the physics engine; this module only supplies shape and
//! metadata plus the bounding boxes the broad phase indexes.

use glam::{Vec2, Vec3};

use crate::types::{BroadPhaseTag, ColliderHeader, ItemColliders};

/// Minimum amount an empty or inverted depth band is widened by. Far from
/// zero the widening grows with `low` so it survives f32 rounding.
pub const BAND_EPSILON: f32 = 1e-4;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Zero-volume box around a single point
    pub fn from_point(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing every point; `None` for an empty input
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_point(first), |aabb, p| aabb.including(p)))
    }

    pub fn including(self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Vertical extent `[low, high]` of an extruded 2D shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZBand {
    pub low: f32,
    pub high: f32,
}

impl ZBand {
    /// Band from `low` to `high`; always `high > low`.
    pub fn new(low: f32, high: f32) -> Self {
        if high > low {
            Self { low, high }
        } else {
            Self {
                low,
                high: low + BAND_EPSILON.max(low.abs() * f32::EPSILON * 2.0),
            }
        }
    }

    pub fn height(&self) -> f32 {
        self.high - self.low
    }

    fn extrude(&self, min: Vec2, max: Vec2) -> Aabb {
        Aabb::new(min.extend(self.low), max.extend(self.high))
    }
}

/// Line segment in the XY plane, extruded through a depth band.
///
/// A segment collides on the side its normal faces; two-sided collision is
/// expressed by emitting the segment twice with opposite winding.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub header: ColliderHeader,
    pub v1: Vec2,
    pub v2: Vec2,
    pub band: ZBand,
    /// Unit normal, zero for a zero-length segment
    pub normal: Vec2,
    pub length: f32,
}

impl Segment {
    pub fn new(header: ColliderHeader, v1: Vec2, v2: Vec2, band: ZBand) -> Self {
        let tangent = v1 - v2;
        Self {
            header,
            v1,
            v2,
            band,
            normal: Vec2::new(tangent.y, -tangent.x).normalize_or_zero(),
            length: tangent.length(),
        }
    }

    /// Same segment with swapped endpoints (and flipped normal)
    pub fn reversed(&self) -> Self {
        Self::new(self.header.clone(), self.v2, self.v1, self.band)
    }

    pub fn compute_bounding_box(&self) -> Aabb {
        self.band.extrude(self.v1.min(self.v2), self.v1.max(self.v2))
    }
}

/// Circle in the XY plane, extruded through a depth band
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub header: ColliderHeader,
    pub center: Vec2,
    pub radius: f32,
    pub band: ZBand,
}

impl Circle {
    pub fn new(header: ColliderHeader, center: Vec2, radius: f32, band: ZBand) -> Self {
        Self {
            header,
            center,
            radius: radius.max(0.0),
            band,
        }
    }

    pub fn compute_bounding_box(&self) -> Aabb {
        let r = Vec2::splat(self.radius);
        self.band.extrude(self.center - r, self.center + r)
    }
}

/// Triangle with counter-clockwise winding seen from its normal side
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub header: ColliderHeader,
    pub vertices: [Vec3; 3],
    pub normal: Vec3,
}

impl Triangle {
    /// Returns `None` for a triangle without area.
    pub fn new(header: ColliderHeader, vertices: [Vec3; 3]) -> Option<Self> {
        let [a, b, c] = vertices;
        let normal = (b - a).cross(c - a).try_normalize()?;
        Some(Self {
            header,
            vertices,
            normal,
        })
    }

    pub fn compute_bounding_box(&self) -> Aabb {
        let [a, b, c] = self.vertices;
        Aabb::new(a.min(b).min(c), a.max(b).max(c))
    }
}

/// Single point, the last line of defense on knife-edge geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub header: ColliderHeader,
    pub position: Vec3,
}

impl Point {
    pub fn new(header: ColliderHeader, position: Vec3) -> Self {
        Self { header, position }
    }

    pub fn compute_bounding_box(&self) -> Aabb {
        Aabb::from_point(self.position)
    }
}

/// Edge between two mesh vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Line3D {
    pub header: ColliderHeader,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Line3D {
    /// Returns `None` when both endpoints coincide.
    pub fn new(header: ColliderHeader, v1: Vec3, v2: Vec3) -> Option<Self> {
        if v1 == v2 {
            return None;
        }
        Some(Self { header, v1, v2 })
    }

    pub fn length(&self) -> f32 {
        self.v1.distance(self.v2)
    }

    pub fn compute_bounding_box(&self) -> Aabb {
        Aabb::new(self.v1.min(self.v2), self.v1.max(self.v2))
    }
}

/// Closed planar polygon at a fixed height.
///
/// Used as the interior of trigger areas so the narrow phase can tell a ball
/// inside the area from one crossing its boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub header: ColliderHeader,
    pub points: Vec<Vec2>,
    pub z: f32,
}

impl Polygon {
    pub fn new(header: ColliderHeader, points: Vec<Vec2>, z: f32) -> Self {
        Self { header, points, z }
    }

    /// Twice the signed area; positive for counter-clockwise points
    pub fn signed_double_area(&self) -> f32 {
        let n = self.points.len();
        (0..n)
            .map(|i| self.points[i].perp_dot(self.points[(i + 1) % n]))
            .sum()
    }

    pub fn compute_bounding_box(&self) -> Aabb {
        let points = self.points.iter().map(|p| p.extend(self.z));
        Aabb::from_points(points).unwrap_or_else(|| Aabb::from_point(Vec3::new(0.0, 0.0, self.z)))
    }
}

/// Any narrow-phase collider
#[derive(Debug, Clone, PartialEq)]
pub enum Collider {
    Segment(Segment),
    Circle(Circle),
    Triangle(Triangle),
    Point(Point),
    Line3D(Line3D),
    Polygon(Polygon),
}

impl Collider {
    pub fn header(&self) -> &ColliderHeader {
        match self {
            Self::Segment(s) => &s.header,
            Self::Circle(c) => &c.header,
            Self::Triangle(t) => &t.header,
            Self::Point(p) => &p.header,
            Self::Line3D(l) => &l.header,
            Self::Polygon(p) => &p.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut ColliderHeader {
        match self {
            Self::Segment(s) => &mut s.header,
            Self::Circle(c) => &mut c.header,
            Self::Triangle(t) => &mut t.header,
            Self::Point(p) => &mut p.header,
            Self::Line3D(l) => &mut l.header,
            Self::Polygon(p) => &mut p.header,
        }
    }

    pub fn compute_bounding_box(&self) -> Aabb {
        match self {
            Self::Segment(s) => s.compute_bounding_box(),
            Self::Circle(c) => c.compute_bounding_box(),
            Self::Triangle(t) => t.compute_bounding_box(),
            Self::Point(p) => p.compute_bounding_box(),
            Self::Line3D(l) => l.compute_bounding_box(),
            Self::Polygon(p) => p.compute_bounding_box(),
        }
    }

    /// Depth band of extruded 2D shapes
    pub fn band(&self) -> Option<ZBand> {
        match self {
            Self::Segment(s) => Some(s.band),
            Self::Circle(c) => Some(c.band),
            _ => None,
        }
    }

    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Self::Segment(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Self::Circle(c) => Some(c),
            _ => None,
        }
    }
}

/// Anything that can be stamped with a broad-phase slot.
///
/// Composites forward the tag to every collider they hold.
pub trait BroadPhaseTagged {
    fn set_broad_phase_tag(&mut self, index: u32, version: u32);
}

impl BroadPhaseTagged for Collider {
    fn set_broad_phase_tag(&mut self, index: u32, version: u32) {
        self.header_mut().broad_phase = Some(BroadPhaseTag { index, version });
    }
}

impl BroadPhaseTagged for [Collider] {
    fn set_broad_phase_tag(&mut self, index: u32, version: u32) {
        for collider in self.iter_mut() {
            collider.set_broad_phase_tag(index, version);
        }
    }
}

impl BroadPhaseTagged for ItemColliders {
    fn set_broad_phase_tag(&mut self, index: u32, version: u32) {
        self.colliders.set_broad_phase_tag(index, version);
    }
}

/// Union of the bounding boxes of `colliders`
pub fn bounding_box_of(colliders: &[Collider]) -> Option<Aabb> {
    colliders
        .iter()
        .map(Collider::compute_bounding_box)
        .reduce(Aabb::union)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemKind, ItemTag};

    fn header() -> ColliderHeader {
        ColliderHeader::new(ItemTag::new("Gate1", ItemKind::Gate))
    }

    #[test]
    fn test_band_never_inverted() {
        let band = ZBand::new(5.0, 5.0);
        assert!(band.high > band.low);
        let band = ZBand::new(5.0, 2.0);
        assert_eq!(band.low, 5.0);
        assert!(band.high > band.low);
        assert_eq!(ZBand::new(1.0, 3.0).height(), 2.0);
    }

    #[test]
    fn test_band_widening_survives_large_heights() {
        for z in [500.0, 2048.0, 4096.0, 1.0e5, -3.0e4] {
            let band = ZBand::new(z, z);
            assert!(band.high > band.low, "empty band at {z}");
            assert!(band.height() < 0.1);
        }
    }

    #[test]
    fn test_segment_normal_and_length() {
        let seg = Segment::new(
            header(),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            ZBand::new(0.0, 1.0),
        );
        assert_eq!(seg.length, 10.0);
        assert!((seg.normal - Vec2::new(0.0, 1.0)).length() < 1e-6);
        assert!((seg.reversed().normal + seg.normal).length() < 1e-6);
    }

    #[test]
    fn test_zero_length_segment_has_zero_normal() {
        let seg = Segment::new(header(), Vec2::ONE, Vec2::ONE, ZBand::new(0.0, 1.0));
        assert_eq!(seg.length, 0.0);
        assert_eq!(seg.normal, Vec2::ZERO);
    }

    #[test]
    fn test_segment_bounding_box_extrudes_band() {
        let seg = Segment::new(
            header(),
            Vec2::new(3.0, -1.0),
            Vec2::new(-2.0, 4.0),
            ZBand::new(10.0, 12.0),
        );
        let aabb = seg.compute_bounding_box();
        assert_eq!(aabb.min, Vec3::new(-2.0, -1.0, 10.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 4.0, 12.0));
    }

    #[test]
    fn test_circle_bounding_box() {
        let circle = Circle::new(header(), Vec2::new(1.0, 1.0), 2.0, ZBand::new(0.0, 5.0));
        let aabb = circle.compute_bounding_box();
        assert_eq!(aabb.min, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 3.0, 5.0));
    }

    #[test]
    fn test_triangle_rejects_zero_area() {
        assert!(Triangle::new(header(), [Vec3::ZERO, Vec3::X, Vec3::X * 3.0]).is_none());

        let tri = Triangle::new(header(), [Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap();
        assert!((tri.normal - Vec3::Z).length() < 1e-6);
        let aabb = tri.compute_bounding_box();
        assert_eq!(aabb.min, Vec3::ZERO);
        assert_eq!(aabb.max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_point_box_is_degenerate() {
        let p = Point::new(header(), Vec3::new(1.0, 2.0, 3.0));
        let aabb = p.compute_bounding_box();
        assert_eq!(aabb.size(), Vec3::ZERO);
        assert!(aabb.contains(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_line3d_requires_distinct_endpoints() {
        assert!(Line3D::new(header(), Vec3::ONE, Vec3::ONE).is_none());
        let line = Line3D::new(header(), Vec3::ZERO, Vec3::new(0.0, 3.0, 4.0)).unwrap();
        assert_eq!(line.length(), 5.0);
    }

    #[test]
    fn test_polygon_area_and_box() {
        let square = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let poly = Polygon::new(header(), square, 7.0);
        assert_eq!(poly.signed_double_area(), 8.0);
        let aabb = poly.compute_bounding_box();
        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, 7.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 2.0, 7.0));
    }

    #[test]
    fn test_broad_phase_tag_forwarded_to_all_parts() {
        let mut item = ItemColliders::new(ItemTag::new("Gate1", ItemKind::Gate));
        let seg = Segment::new(header(), Vec2::ZERO, Vec2::X, ZBand::new(0.0, 1.0));
        item.colliders.push(Collider::Segment(seg.reversed()));
        item.colliders.push(Collider::Segment(seg));
        item.colliders.push(Collider::Point(Point::new(header(), Vec3::ZERO)));

        item.set_broad_phase_tag(17, 3);
        for collider in &item.colliders {
            assert_eq!(
                collider.header().broad_phase,
                Some(BroadPhaseTag {
                    index: 17,
                    version: 3
                })
            );
        }
    }

    #[test]
    fn test_bounding_box_of_union() {
        let colliders = vec![
            Collider::Point(Point::new(header(), Vec3::new(-1.0, 0.0, 0.0))),
            Collider::Point(Point::new(header(), Vec3::new(4.0, 2.0, 1.0))),
        ];
        let aabb = bounding_box_of(&colliders).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(4.0, 2.0, 1.0));
        assert!(bounding_box_of(&[]).is_none());
    }
}
