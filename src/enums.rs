/// Canonical anatomical viewing planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Transverse,
    Coronal,
    Sagittal,
}

impl View {
    pub const ALL: [View; 3] = [View::Transverse, View::Coronal, View::Sagittal];
}

/// Axis sign/order convention, only relevant for the sagittal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    #[default]
    Linear,
    Orthogonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    #[default]
    Nearest,
    Bilinear,
    Trilinear,
}

/// Where the per-row work of a resample runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Processor {
    Serial,
    #[default]
    Parallel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoiShape {
    Box,
    Ellipsoid,
    EllipticCylinder,
    Isocontour,
}
