//! Containment tests for the analytic ROI shapes.
//!
//! All tests are relaxed by [`EPSILON`] so points lying on a boundary, up to
//! floating point noise, count as inside.

use crate::point::Point3;

pub const EPSILON: f64 = 1e-5;

#[inline]
fn between(value: f64, a: f64, b: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    value >= lo - EPSILON && value <= hi + EPSILON
}

/// `corner0` and `corner1` may be given in either order.
pub fn point_in_box(p: Point3, corner0: Point3, corner1: Point3) -> bool {
    between(p.x, corner0.x, corner1.x)
        && between(p.y, corner0.y, corner1.y)
        && between(p.z, corner0.z, corner1.z)
}

pub fn point_in_ellipsoid(p: Point3, center: Point3, radius: Point3) -> bool {
    let d = (p - center).div(radius);
    d.dot(d) <= 1.0 + EPSILON
}

/// Cylinder axis runs along z. `radius.z` is ignored.
pub fn point_in_elliptic_cylinder(p: Point3, center: Point3, height: f64, radius: Point3) -> bool {
    let dx = (p.x - center.x) / radius.x;
    let dy = (p.y - center.y) / radius.y;
    let half_height = height / 2.0;

    dx * dx + dy * dy <= 1.0 + EPSILON
        && between(p.z, center.z - half_height, center.z + half_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_boundary_uses_epsilon_both_ways() {
        let c0 = Point3::ZERO;
        let c1 = Point3::new(10.0, 10.0, 10.0);
        assert!(point_in_box(Point3::new(5.0, 5.0, 5.0), c0, c1));
        assert!(!point_in_box(Point3::new(10.0 + 2.0 * EPSILON, 5.0, 5.0), c0, c1));
        assert!(point_in_box(Point3::new(10.0 - EPSILON / 2.0, 5.0, 5.0), c0, c1));
        assert!(point_in_box(Point3::new(10.0 + EPSILON / 2.0, 5.0, 5.0), c0, c1));
    }

    #[test]
    fn box_corners_in_either_order() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(point_in_box(p, Point3::new(2.0, 2.0, 2.0), Point3::ZERO));
    }

    #[test]
    fn ellipsoid_axes() {
        let center = Point3::new(5.0, 5.0, 5.0);
        let radius = Point3::new(5.0, 2.0, 1.0);
        assert!(point_in_ellipsoid(Point3::new(9.9, 5.0, 5.0), center, radius));
        assert!(!point_in_ellipsoid(Point3::new(5.0, 7.5, 5.0), center, radius));
        assert!(point_in_ellipsoid(Point3::new(5.0, 5.0, 6.0), center, radius));
        assert!(!point_in_ellipsoid(Point3::new(8.0, 6.8, 5.0), center, radius));
    }

    #[test]
    fn cylinder_ignores_radius_z_and_caps_height() {
        let center = Point3::new(0.0, 0.0, 0.0);
        let radius = Point3::new(1.0, 1.0, 0.001);
        assert!(point_in_elliptic_cylinder(Point3::new(0.5, 0.5, 2.9), center, 6.0, radius));
        assert!(!point_in_elliptic_cylinder(Point3::new(0.5, 0.5, 3.1), center, 6.0, radius));
        assert!(!point_in_elliptic_cylinder(Point3::new(0.8, 0.8, 0.0), center, 6.0, radius));
    }
}
