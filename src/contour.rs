use crate::point::Point3;
use crate::roi::Roi;
use crate::slice::Slice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowState {
    Outside,
    Inside,
}

/// Traces where `roi` crosses `slice`.
///
/// Pixel centres are walked row by row, left to right. Entering the ROI
/// emits the current centre, leaving it emits the previous one, and a row
/// that ends inside emits its last centre. Points are in the slice's local
/// space. A non-empty result is closed by repeating its first point.
pub fn trace_boundary(slice: &Slice, roi: &Roi) -> Vec<Point3> {
    let (width, height) = slice.dim();
    let slice_frame = slice.coord_frame();
    let roi_frame = roi.coord_frame();
    let mut points = Vec::new();

    for y in 0..height {
        let mut state = RowState::Outside;
        let mut previous = None;

        for x in 0..width {
            let point = slice.pixel_center(x, y);
            let inside = roi.contains(slice_frame.alt_to_alt(point, roi_frame));

            match (state, inside) {
                (RowState::Outside, true) => {
                    points.push(point);
                    state = RowState::Inside;
                }
                (RowState::Inside, false) => {
                    points.extend(previous);
                    state = RowState::Outside;
                }
                _ => {}
            }
            previous = Some(point);
        }

        if state == RowState::Inside {
            points.extend(previous);
        }
    }

    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}
