//! Drag-point splines.
//!
//! Authored outlines are lists of control points. Between two consecutive
//! points the outline follows a centripetal Catmull-Rom curve when the points
//! are marked smooth, and a straight line otherwise. The curve is flattened
//! into a polyline by recursive midpoint subdivision until each piece is
//! flat within the requested accuracy.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Recursion limit for spline subdivision
const MAX_SUBDIVISION_DEPTH: u32 = 16;

/// Span parameter used when two control points coincide
const MIN_SPAN_LENGTH: f32 = 1e-4;

/// Authored control point of an outline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DragPoint {
    pub position: Vec3,
    /// Curve through this point instead of a corner
    pub smooth: bool,
}

impl DragPoint {
    pub fn new(position: Vec3, smooth: bool) -> Self {
        Self { position, smooth }
    }

    pub fn corner(x: f32, y: f32) -> Self {
        Self::new(Vec3::new(x, y, 0.0), false)
    }

    pub fn smooth(x: f32, y: f32) -> Self {
        Self::new(Vec3::new(x, y, 0.0), true)
    }
}

/// Centripetal Catmull-Rom segment between `p1` and `p2` in the XY plane
#[derive(Debug, Clone, Copy)]
pub struct CatmullCurve {
    coefficients: [Vec2; 4],
}

impl CatmullCurve {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        let mut dt0 = p0.distance(p1).sqrt();
        let mut dt1 = p1.distance(p2).sqrt();
        let mut dt2 = p2.distance(p3).sqrt();

        if dt1 < MIN_SPAN_LENGTH {
            dt1 = 1.0;
        }
        if dt0 < MIN_SPAN_LENGTH {
            dt0 = dt1;
        }
        if dt2 < MIN_SPAN_LENGTH {
            dt2 = dt1;
        }

        // Tangents for a non-uniform parameterization, rescaled to [0, 1]
        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        Self {
            coefficients: [
                p1,
                t1,
                -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2,
                2.0 * p1 - 2.0 * p2 + t1 + t2,
            ],
        }
    }

    /// Point at parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f32) -> Vec2 {
        let [c0, c1, c2, c3] = self.coefficients;
        c0 + t * (c1 + t * (c2 + t * c3))
    }
}

/// `mid` lies within `accuracy` of the chord `v1`-`v2` (squared doubled area)
fn is_flat(v1: Vec2, v2: Vec2, mid: Vec2, accuracy: f32) -> bool {
    let doubled_area = (mid - v1).perp_dot(v2 - v1);
    // NaN coordinates must terminate the recursion too
    doubled_area.is_nan() || doubled_area * doubled_area < accuracy
}

fn subdivide(
    out: &mut Vec<Vec2>,
    curve: &CatmullCurve,
    (t1, t2): (f32, f32),
    (v1, v2): (Vec2, Vec2),
    accuracy: f32,
    depth: u32,
) {
    let t_mid = (t1 + t2) * 0.5;
    let mid = curve.point_at(t_mid);

    if depth >= MAX_SUBDIVISION_DEPTH || is_flat(v1, v2, mid, accuracy) {
        out.push(v1);
    } else {
        subdivide(out, curve, (t1, t_mid), (v1, mid), accuracy, depth + 1);
        subdivide(out, curve, (t_mid, t2), (mid, v2), accuracy, depth + 1);
    }
}

/// Flatten drag points into a polyline in the XY plane.
///
/// With `looped` the outline closes back onto the first point, and the
/// closing vertex is not repeated. Consecutive coincident points are skipped.
pub fn polyline(points: &[DragPoint], looped: bool, accuracy: f32) -> Vec<Vec2> {
    let count = points.len();
    let mut out = Vec::new();
    if count == 0 {
        return out;
    }

    let spans = if looped { count } else { count - 1 };
    for i in 0..spans {
        let p1 = points[i];
        let p2 = points[(i + 1) % count];
        if p1.position == p2.position {
            continue;
        }

        let prev = if p1.smooth {
            match i.checked_sub(1) {
                Some(j) => j,
                None if looped => count - 1,
                None => 0,
            }
        } else {
            i
        };
        let next = if p2.smooth { i + 2 } else { i + 1 };
        let next = match next {
            n if n < count => n,
            n if looped => n - count,
            _ => count - 1,
        };

        let v1 = p1.position.truncate();
        let v2 = p2.position.truncate();
        let curve = CatmullCurve::new(
            points[prev].position.truncate(),
            v1,
            v2,
            points[next].position.truncate(),
        );
        subdivide(&mut out, &curve, (0.0, 1.0), (v1, v2), accuracy, 0);
    }

    if !looped {
        out.push(points[count - 1].position.truncate());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCURACY: f32 = 4.0;

    fn square(smooth: bool) -> Vec<DragPoint> {
        [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]
            .into_iter()
            .map(|(x, y)| DragPoint::new(Vec3::new(x, y, 0.0), smooth))
            .collect()
    }

    #[test]
    fn test_curve_interpolates_endpoints() {
        let curve = CatmullCurve::new(
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 1.0),
        );
        assert!((curve.point_at(0.0) - Vec2::new(0.0, 0.0)).length() < 1e-5);
        assert!((curve.point_at(1.0) - Vec2::new(1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_straight_spans_stay_straight() {
        let curve = CatmullCurve::new(Vec2::ZERO, Vec2::ZERO, Vec2::X * 10.0, Vec2::X * 10.0);
        let mid = curve.point_at(0.5);
        assert!(mid.y.abs() < 1e-5);
        assert!(mid.x > 0.0 && mid.x < 10.0);
    }

    #[test]
    fn test_corner_loop_is_the_control_polygon() {
        let outline = polyline(&square(false), true, ACCURACY);
        assert_eq!(
            outline,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(0.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_smooth_loop_is_subdivided() {
        let outline = polyline(&square(true), true, ACCURACY);
        assert!(outline.len() > 4);
        assert_eq!(outline[0], Vec2::new(0.0, 0.0));
        // Smooth outline bulges past the control polygon
        assert!(outline.iter().any(|p| p.x > 100.0 || p.x < 0.0));
    }

    #[test]
    fn test_open_outline_keeps_last_point() {
        let points = vec![DragPoint::corner(0.0, 0.0), DragPoint::corner(10.0, 0.0)];
        assert_eq!(
            polyline(&points, false, ACCURACY),
            vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)]
        );
    }

    #[test]
    fn test_coincident_points_skipped() {
        let mut points = square(false);
        let first = points[0];
        points.insert(1, first);
        assert_eq!(polyline(&points, true, ACCURACY).len(), 4);
    }

    #[test]
    fn test_nan_points_terminate() {
        let points = vec![
            DragPoint::smooth(0.0, 0.0),
            DragPoint::smooth(f32::NAN, 5.0),
            DragPoint::smooth(10.0, 0.0),
        ];
        let outline = polyline(&points, true, ACCURACY);
        assert!(outline.len() <= 3 * (1 << MAX_SUBDIVISION_DEPTH));
    }

    #[test]
    fn test_empty_input() {
        assert!(polyline(&[], true, ACCURACY).is_empty());
    }
}
