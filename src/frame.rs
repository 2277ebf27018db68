//! Orthonormal coordinate frames and the transforms between a frame's local
//! ("alt") space and base space.

use tracing::warn;

use crate::enums::{Axis, Layout, View};
use crate::point::Point3;
use crate::view::view_axes;

pub const IDENTITY_AXES: [Point3; 3] = [
    Point3::new(1.0, 0.0, 0.0),
    Point3::new(0.0, 1.0, 0.0),
    Point3::new(0.0, 0.0, 1.0),
];

/// An offset plus three orthonormal axes, all expressed in base space.
///
/// The axes are orthonormalized on every mutation, so a frame is always
/// valid. Frames are small `Copy` values; volumes and ROIs own theirs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateFrame {
    offset: Point3,
    axes: [Point3; 3],
}

impl Default for CoordinateFrame {
    fn default() -> Self {
        Self::identity()
    }
}

/// Gram-Schmidt orthonormalization. The first axis keeps its direction.
///
/// Degenerate input (zero length or collinear axes) produces NaN/Inf
/// components; in that case the identity basis is returned instead.
pub fn orthonormalize(axes: [Point3; 3]) -> [Point3; 3] {
    let [a0, mut a1, mut a2] = axes;

    a1 = a1 - a0 * (a1.dot(a0) / a0.dot(a0));
    a2 = a2 - a0 * (a2.dot(a0) / a0.dot(a0));
    a2 = a2 - a1 * (a2.dot(a1) / a1.dot(a1));

    let result = [a0, a1, a2].map(|axis| axis / axis.magnitude());

    if result.iter().all(|axis| axis.is_finite()) {
        result
    } else {
        warn!(?axes, "degenerate axes, resetting to identity basis");
        IDENTITY_AXES
    }
}

impl CoordinateFrame {
    pub fn identity() -> Self {
        Self {
            offset: Point3::ZERO,
            axes: IDENTITY_AXES,
        }
    }

    pub fn new(offset: Point3, axes: [Point3; 3]) -> Self {
        let mut frame = Self::identity();
        frame.set_offset(offset);
        frame.set_axes(axes);
        frame
    }

    pub fn with_offset(offset: Point3) -> Self {
        Self::new(offset, IDENTITY_AXES)
    }

    #[inline]
    pub fn offset(&self) -> Point3 {
        self.offset
    }

    #[inline]
    pub fn axes(&self) -> &[Point3; 3] {
        &self.axes
    }

    #[inline]
    pub fn axis(&self, axis: Axis) -> Point3 {
        self.axes[axis.index()]
    }

    pub fn set_axes(&mut self, axes: [Point3; 3]) {
        self.axes = orthonormalize(axes);
    }

    pub fn set_offset(&mut self, offset: Point3) {
        if offset.has_nan() {
            warn!(?offset, "NaN offset, resetting to origin");
            self.offset = Point3::ZERO;
        } else {
            self.offset = offset;
        }
    }

    pub fn shift_offset(&mut self, delta: Point3) {
        self.set_offset(self.offset + delta);
    }

    /// Flips one axis. The result is still orthonormal but changes
    /// handedness.
    pub fn invert_axis(&mut self, axis: Axis) {
        let mut axes = self.axes;
        axes[axis.index()] = -axes[axis.index()];
        self.set_axes(axes);
    }

    /// Rotates the frame's axes about `unit_axis` (given in base space) so
    /// that content seen through the frame turns by `theta`. The offset does
    /// not move.
    pub fn rotate(&mut self, unit_axis: Point3, theta: f64) {
        let rotated = self.axes.map(|axis| axis.rotate_about_axis(unit_axis, -theta));
        self.set_axes(rotated);
    }

    /// A frame at the same offset whose axes are this frame's axes as seen
    /// from `view`.
    pub fn view_frame(&self, view: View, layout: Layout) -> Self {
        Self::new(self.offset, view_axes(&self.axes, view, layout))
    }

    // Rotation part of alt_to_base, without the offset.
    #[inline]
    fn rotate_to_base(&self, p: Point3) -> Point3 {
        self.axes[0] * p.x + self.axes[1] * p.y + self.axes[2] * p.z
    }

    // Rotation part of base_to_alt; the inverse rotation is the transpose.
    #[inline]
    fn rotate_to_alt(&self, p: Point3) -> Point3 {
        Point3::new(p.dot(self.axes[0]), p.dot(self.axes[1]), p.dot(self.axes[2]))
    }

    #[inline]
    pub fn alt_to_base(&self, p: Point3) -> Point3 {
        self.offset + self.rotate_to_base(p)
    }

    #[inline]
    pub fn base_to_alt(&self, p: Point3) -> Point3 {
        self.rotate_to_alt(p - self.offset)
    }

    /// Transforms a size (e.g. a voxel edge) from local to base space.
    ///
    /// Each local axis contributes the absolute value of its rotated size
    /// vector; the contributions are summed. This overestimates sizes for
    /// oblique frames, and every derived voxel and ROI size depends on it
    /// staying that way.
    pub fn alt_dim_to_base(&self, size: Point3) -> Point3 {
        Axis::ALL
            .iter()
            .map(|&axis| {
                let component = Point3::ZERO.with_component(axis, size[axis]);
                self.rotate_to_base(component).abs()
            })
            .fold(Point3::ZERO, |acc, contribution| acc + contribution)
    }

    /// Inverse counterpart of [`alt_dim_to_base`](Self::alt_dim_to_base),
    /// with the same per-axis approximation.
    pub fn base_dim_to_alt(&self, size: Point3) -> Point3 {
        Axis::ALL
            .iter()
            .map(|&axis| {
                let component = Point3::ZERO.with_component(axis, size[axis]);
                self.rotate_to_alt(component).abs()
            })
            .fold(Point3::ZERO, |acc, contribution| acc + contribution)
    }

    /// Maps a point in `self`'s local space into `to`'s local space.
    #[inline]
    pub fn alt_to_alt(&self, p: Point3, to: &CoordinateFrame) -> Point3 {
        to.base_to_alt(self.alt_to_base(p))
    }

    pub fn alt_dim_to_alt(&self, size: Point3, to: &CoordinateFrame) -> Point3 {
        to.base_dim_to_alt(self.alt_dim_to_base(size))
    }

    pub fn approx_eq(&self, other: &CoordinateFrame, tolerance: f64) -> bool {
        let close = |a: Point3, b: Point3| {
            let d = a.diff(b);
            d.x <= tolerance && d.y <= tolerance && d.z <= tolerance
        };
        close(self.offset, other.offset)
            && self
                .axes
                .iter()
                .zip(other.axes.iter())
                .all(|(&a, &b)| close(a, b))
    }
}
