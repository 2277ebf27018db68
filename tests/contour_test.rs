use std::f64::consts::PI;

use oblique_volume::{
    CoordinateFrame, Dim, GridVolume, Point3, ResampleRequest, Roi, RoiShape, Slice, resample,
    trace_boundary,
};

fn slice(width: usize, height: usize) -> Slice {
    let volume = GridVolume::filled(
        Dim::spatial(width, height, 1),
        Point3::ONE,
        CoordinateFrame::identity(),
        1.0f32,
    )
    .unwrap();
    resample(&volume, &ResampleRequest::default(), None).unwrap()
}

/// Splits a closed outline back into per-row (entry, exit) pairs.
fn row_pairs(points: &[Point3]) -> Vec<(Point3, Point3)> {
    assert_eq!(points.first(), points.last());
    points[..points.len() - 1]
        .chunks(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

#[test]
fn slice_inside_roi_closes_every_row() {
    let slice = slice(4, 4);
    let roi = Roi::new(
        RoiShape::Box,
        CoordinateFrame::with_offset(Point3::splat(-2.0)),
        Point3::splat(10.0),
    );

    let points = trace_boundary(&slice, &roi);

    assert_eq!(points.len(), 4 * 2 + 1);
    for (y, (entry, close)) in row_pairs(&points).into_iter().enumerate() {
        let row_y = y as f64 + 0.5;
        assert_eq!(entry, Point3::new(0.5, row_y, 0.5));
        assert_eq!(close, Point3::new(3.5, row_y, 0.5));
    }
}

#[test]
fn half_covered_slice_exits_once_per_row() {
    let slice = slice(4, 3);
    let roi = Roi::new(
        RoiShape::Box,
        CoordinateFrame::with_offset(Point3::new(-5.0, -5.0, -5.0)),
        Point3::new(7.0, 10.0, 10.0),
    );

    let points = trace_boundary(&slice, &roi);

    let pairs = row_pairs(&points);
    assert_eq!(pairs.len(), 3);
    for (entry, exit) in pairs {
        assert_eq!(entry.x, 0.5);
        assert_eq!(exit.x, 1.5);
        assert_eq!(entry.y, exit.y);
    }
}

#[test]
fn ellipsoid_outline_is_symmetric() {
    let slice = slice(20, 20);
    let roi = Roi::new(
        RoiShape::Ellipsoid,
        CoordinateFrame::with_offset(Point3::new(4.0, 4.0, -6.0)),
        Point3::splat(12.0),
    );

    let points = trace_boundary(&slice, &roi);

    let pairs = row_pairs(&points);
    assert!(pairs.len() >= 10);
    for (entry, exit) in &pairs {
        assert_eq!(entry.y, exit.y);
        assert!((entry.x + exit.x - 20.0).abs() < 1e-9);
    }
    let first_row = pairs.first().unwrap().0.y;
    let last_row = pairs.last().unwrap().0.y;
    assert!((first_row + last_row - 20.0).abs() < 1e-9);
}

#[test]
fn emitted_points_lie_inside_a_rotated_roi() {
    let slice = slice(16, 16);
    let mut frame = CoordinateFrame::with_offset(Point3::new(8.0, 2.0, -1.0));
    frame.rotate(Point3::new(0.0, 0.0, 1.0), PI / 4.0);
    let roi = Roi::new(RoiShape::EllipticCylinder, frame, Point3::new(6.0, 6.0, 4.0));

    let points = trace_boundary(&slice, &roi);

    assert!(!points.is_empty());
    for point in points {
        let in_base = slice.coord_frame().alt_to_base(point);
        assert!(roi.contains_base(in_base), "{point:?} is outside the ROI");
    }
}

#[test]
fn disjoint_roi_has_no_outline() {
    let slice = slice(5, 5);
    let roi = Roi::new(
        RoiShape::Box,
        CoordinateFrame::with_offset(Point3::new(0.0, 0.0, 50.0)),
        Point3::splat(3.0),
    );
    assert!(trace_boundary(&slice, &roi).is_empty());
}
