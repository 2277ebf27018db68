//! Mapping from anatomical views to the axes of a frame.
//!
//! Each view shows a frame's axes permuted and possibly negated. The mapping
//! is a fixed table indexed by view, layout and the axis being asked for.

use crate::enums::{Axis, Layout, View};
use crate::point::Point3;

/// One cell of the view table: which base axis to return, and its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisPick {
    axis: Axis,
    negate: bool,
}

const fn pick(axis: Axis) -> AxisPick {
    AxisPick { axis, negate: false }
}

const fn neg(axis: Axis) -> AxisPick {
    AxisPick { axis, negate: true }
}

// Rows: transverse, coronal, sagittal/orthogonal, sagittal/linear.
// Columns: requested X, Y, Z.
const VIEW_TABLE: [[AxisPick; 3]; 4] = [
    [pick(Axis::X), pick(Axis::Y), pick(Axis::Z)],
    [pick(Axis::X), neg(Axis::Z), pick(Axis::Y)],
    [pick(Axis::Z), pick(Axis::Y), pick(Axis::X)],
    [pick(Axis::Y), neg(Axis::Z), pick(Axis::X)],
];

fn table_row(view: View, layout: Layout) -> usize {
    match (view, layout) {
        (View::Transverse, _) => 0,
        (View::Coronal, _) => 1,
        (View::Sagittal, Layout::Orthogonal) => 2,
        (View::Sagittal, Layout::Linear) => 3,
    }
}

/// Returns the base axis (or its negation) that plays the role of
/// `requested` when `base_axes` is looked at in `view` under `layout`.
pub fn resolve(base_axes: &[Point3; 3], view: View, layout: Layout, requested: Axis) -> Point3 {
    let AxisPick { axis, negate } = VIEW_TABLE[table_row(view, layout)][requested.index()];
    let chosen = base_axes[axis.index()];
    if negate { -chosen } else { chosen }
}

/// The depth axis of `view`. Independent of layout.
pub fn normal_axis(base_axes: &[Point3; 3], view: View) -> Point3 {
    resolve(base_axes, view, Layout::Linear, Axis::Z)
}

/// All three resolved axes of `view`, in X, Y, Z order.
pub fn view_axes(base_axes: &[Point3; 3], view: View, layout: Layout) -> [Point3; 3] {
    Axis::ALL.map(|axis| resolve(base_axes, view, layout, axis))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: [Point3; 3] = [
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ];

    #[test]
    fn transverse_is_identity_for_both_layouts() {
        for layout in [Layout::Linear, Layout::Orthogonal] {
            assert_eq!(view_axes(&BASE, View::Transverse, layout), BASE);
        }
    }

    #[test]
    fn coronal_swaps_y_and_negated_z() {
        let axes = view_axes(&BASE, View::Coronal, Layout::Orthogonal);
        assert_eq!(axes, [BASE[0], -BASE[2], BASE[1]]);
    }

    #[test]
    fn sagittal_depends_on_layout() {
        assert_eq!(
            view_axes(&BASE, View::Sagittal, Layout::Orthogonal),
            [BASE[2], BASE[1], BASE[0]]
        );
        assert_eq!(
            view_axes(&BASE, View::Sagittal, Layout::Linear),
            [BASE[1], -BASE[2], BASE[0]]
        );
    }

    #[test]
    fn normal_axis_ignores_layout() {
        for view in View::ALL {
            for layout in [Layout::Linear, Layout::Orthogonal] {
                assert_eq!(normal_axis(&BASE, view), resolve(&BASE, view, layout, Axis::Z));
            }
        }
    }
}
