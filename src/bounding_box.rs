use crate::frame::CoordinateFrame;
use crate::point::Point3;

/// Projects the axis-aligned box `in_corners`, given in `in_frame`, into
/// `out_frame` and returns the axis-aligned box there that encloses it.
///
/// The returned corners are ordered: `out[0] <= out[1]` on every axis.
pub fn enclosing_corners(
    in_frame: &CoordinateFrame,
    in_corners: [Point3; 2],
    out_frame: &CoordinateFrame,
) -> [Point3; 2] {
    let [c0, c1] = in_corners;
    let mut min = Point3::splat(f64::INFINITY);
    let mut max = Point3::splat(f64::NEG_INFINITY);

    for i in 0..8u8 {
        let corner = Point3::new(
            if i & 1 == 0 { c0.x } else { c1.x },
            if i & 2 == 0 { c0.y } else { c1.y },
            if i & 4 == 0 { c0.z } else { c1.z },
        );
        let projected = in_frame.alt_to_alt(corner, out_frame);
        min = min.componentwise_min(projected);
        max = max.componentwise_max(projected);
    }

    [min, max]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn identity_frames_sort_corners() {
        let frame = CoordinateFrame::identity();
        let [lo, hi] = enclosing_corners(
            &frame,
            [Point3::new(4.0, 0.0, 9.0), Point3::new(1.0, 2.0, 3.0)],
            &frame,
        );
        assert_eq!(lo, Point3::new(1.0, 0.0, 3.0));
        assert_eq!(hi, Point3::new(4.0, 2.0, 9.0));
    }

    #[test]
    fn rotated_square_grows_to_its_diagonal() {
        let base = CoordinateFrame::identity();
        let mut rotated = CoordinateFrame::identity();
        rotated.rotate(Point3::new(0.0, 0.0, 1.0), PI / 4.0);

        let [lo, hi] = enclosing_corners(
            &base,
            [Point3::ZERO, Point3::new(1.0, 1.0, 1.0)],
            &rotated,
        );
        assert_abs_diff_eq!(hi.x - lo.x, 2f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(hi.y - lo.y, 2f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(hi.z - lo.z, 1.0, epsilon = 1e-12);
    }
}
