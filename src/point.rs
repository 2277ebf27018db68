use std::ops::{Add, Div, Index, Mul, Neg, Sub};

use crate::enums::Axis;

/// A position, direction or size in 3D space, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[allow(clippy::should_implement_trait)]
impl Point3 {
    pub const ZERO: Point3 = Point3::new(0.0, 0.0, 0.0);
    pub const ONE: Point3 = Point3::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn add(self, other: Point3) -> Point3 {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    #[inline]
    pub fn sub(self, other: Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Componentwise product.
    #[inline]
    pub fn mult(self, other: Point3) -> Point3 {
        Point3::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Componentwise quotient. Zero components in `other` yield infinities,
    /// callers that care check `is_finite`.
    #[inline]
    pub fn div(self, other: Point3) -> Point3 {
        Point3::new(self.x / other.x, self.y / other.y, self.z / other.z)
    }

    #[inline]
    pub fn abs(self) -> Point3 {
        Point3::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Absolute componentwise difference.
    #[inline]
    pub fn diff(self, other: Point3) -> Point3 {
        self.sub(other).abs()
    }

    #[inline]
    pub fn scale(self, factor: f64) -> Point3 {
        Point3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    #[inline]
    pub fn cross(self, other: Point3) -> Point3 {
        Point3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn min_dim(self) -> f64 {
        self.x.min(self.y).min(self.z)
    }

    /// Returns the magnitude, not the largest component. Size calculations
    /// throughout the viewer depend on this definition.
    #[inline]
    pub fn max_dim(self) -> f64 {
        self.magnitude()
    }

    #[inline]
    pub fn componentwise_min(self, other: Point3) -> Point3 {
        Point3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    #[inline]
    pub fn componentwise_max(self, other: Point3) -> Point3 {
        Point3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    #[inline]
    pub fn has_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Copy of `self` with the component on `axis` replaced.
    #[inline]
    pub fn with_component(self, axis: Axis, value: f64) -> Point3 {
        let mut p = self;
        match axis {
            Axis::X => p.x = value,
            Axis::Y => p.y = value,
            Axis::Z => p.z = value,
        }
        p
    }

    /// Rotates `self` by `theta` radians about `unit_axis` (right-handed),
    /// using the expanded Rodrigues rotation matrix.
    ///
    /// `unit_axis` must already be unit length; it is not renormalized here.
    pub fn rotate_about_axis(self, unit_axis: Point3, theta: f64) -> Point3 {
        debug_assert!(
            (unit_axis.magnitude() - 1.0).abs() < 1e-6,
            "rotation axis must be unit length, got {unit_axis:?}"
        );
        let Point3 { x: ux, y: uy, z: uz } = unit_axis;
        let (sin, cos) = theta.sin_cos();
        let t = 1.0 - cos;

        Point3::new(
            self.x * (cos + t * ux * ux)
                + self.y * (t * ux * uy - uz * sin)
                + self.z * (t * ux * uz + uy * sin),
            self.x * (t * ux * uy + uz * sin)
                + self.y * (cos + t * uy * uy)
                + self.z * (t * uy * uz - ux * sin),
            self.x * (t * ux * uz - uy * sin)
                + self.y * (t * uy * uz + ux * sin)
                + self.z * (cos + t * uz * uz),
        )
    }
}

impl Index<Axis> for Point3 {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl Add for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: Point3) -> Point3 {
        Point3::add(self, rhs)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    #[inline]
    fn sub(self, rhs: Point3) -> Point3 {
        Point3::sub(self, rhs)
    }
}

impl Neg for Point3 {
    type Output = Point3;

    #[inline]
    fn neg(self) -> Point3 {
        Point3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;

    #[inline]
    fn mul(self, rhs: f64) -> Point3 {
        self.scale(rhs)
    }
}

impl Div<f64> for Point3 {
    type Output = Point3;

    #[inline]
    fn div(self, rhs: f64) -> Point3 {
        Point3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Point3::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn assert_points_close(a: Point3, b: Point3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-9);
    }

    #[test]
    fn max_dim_is_magnitude() {
        let p = Point3::new(3.0, 4.0, 0.0);
        assert_eq!(p.max_dim(), 5.0);
        assert_eq!(p.min_dim(), 0.0);
    }

    #[test]
    fn cross_of_x_and_y_is_z() {
        let z = Point3::new(1.0, 0.0, 0.0).cross(Point3::new(0.0, 1.0, 0.0));
        assert_eq!(z, Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn diff_is_absolute() {
        let d = Point3::new(1.0, 5.0, -2.0).diff(Point3::new(3.0, 1.0, 2.0));
        assert_eq!(d, Point3::new(2.0, 4.0, 4.0));
    }

    #[test]
    fn rotate_quarter_turn_about_z() {
        let p = Point3::new(1.0, 0.0, 0.0).rotate_about_axis(Point3::new(0.0, 0.0, 1.0), PI / 2.0);
        assert_points_close(p, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn rotate_by_zero_and_full_turn() {
        let axis = Point3::new(1.0, 1.0, 1.0) / 3f64.sqrt();
        let p = Point3::new(2.5, -1.0, 7.0);
        assert_eq!(p.rotate_about_axis(axis, 0.0), p);
        assert_points_close(p.rotate_about_axis(axis, 2.0 * PI), p);
    }

    #[test]
    fn rotation_preserves_length() {
        let axis = Point3::new(0.0, 0.6, 0.8);
        let p = Point3::new(1.0, 2.0, 3.0);
        let rotated = p.rotate_about_axis(axis, 1.234);
        assert_abs_diff_eq!(rotated.magnitude(), p.magnitude(), epsilon = 1e-9);
    }
}
