use crate::enums::Interpolation;
use crate::point::Point3;
use crate::volume::{EMPTY, GridVolume, Voxel, VoxelIndex};

/// Samples one gate/frame of a volume at points given in the volume's local
/// space.
///
/// Linear schemes work on voxel-centre coordinates. The source axis most
/// aligned with the slice normal is the depth axis, the other two are the
/// in-plane axes: bilinear interpolates in-plane only and takes the
/// containing voxel along depth, trilinear interpolates along all three.
pub(crate) struct Interpolator<'a, T> {
    volume: &'a GridVolume<T>,
    gate: i64,
    frame: i64,
    dims: [i64; 3],
    depth_axis: usize,
    plane_axes: [usize; 2],
}

#[inline]
fn components(p: Point3) -> [f64; 3] {
    [p.x, p.y, p.z]
}

/// Linear interpolation between two nodes. Coincident nodes return the
/// first value instead of dividing by zero.
#[inline]
pub(crate) fn lerp(pos: f64, p0: f64, v0: f64, p1: f64, v1: f64) -> f64 {
    let separation = p1 - p0;
    if separation == 0.0 {
        return v0;
    }
    (v1 - v0).mul_add((pos - p0) / separation, v0)
}

/// Neighbouring voxel-centre indices around continuous coordinate `c`,
/// clamped into `[0, dim)`.
#[inline]
fn span(c: f64, dim: i64) -> (i64, i64) {
    let lo = c.floor() as i64;
    let last = dim - 1;
    (lo.clamp(0, last), (lo + 1).clamp(0, last))
}

impl<'a, T: Voxel> Interpolator<'a, T> {
    /// `normal` is the slice normal expressed in the volume's local space.
    pub(crate) fn new(
        volume: &'a GridVolume<T>,
        gate: usize,
        frame: usize,
        normal: Point3,
    ) -> Self {
        let dim = volume.dim();
        let n = components(normal.abs());
        let depth_axis = if n[2] >= n[0] && n[2] >= n[1] {
            2
        } else if n[1] >= n[0] {
            1
        } else {
            0
        };
        let plane_axes = match depth_axis {
            0 => [1, 2],
            1 => [0, 2],
            _ => [0, 1],
        };

        Self {
            volume,
            gate: gate as i64,
            frame: frame as i64,
            dims: [dim.x as i64, dim.y as i64, dim.z as i64],
            depth_axis,
            plane_axes,
        }
    }

    #[inline]
    fn value(&self, ix: [i64; 3]) -> f64 {
        self.volume
            .value_at(VoxelIndex::new(ix[0], ix[1], ix[2], self.gate, self.frame))
    }

    /// Containing voxel of `point`, or `None` if it lies outside the grid.
    #[inline]
    fn containing_cell(&self, point: Point3) -> Option<[i64; 3]> {
        let cell = point.div(self.volume.voxel_size());
        if !cell.is_finite() {
            return None;
        }
        let ix = components(cell).map(|c| c.floor() as i64);
        let inside = ix
            .iter()
            .zip(self.dims.iter())
            .all(|(&i, &d)| i >= 0 && i < d);
        inside.then_some(ix)
    }

    #[inline]
    pub(crate) fn sample(&self, interpolation: Interpolation, point: Point3) -> f64 {
        match interpolation {
            Interpolation::Nearest => self.nearest(point),
            Interpolation::Bilinear => self.bilinear(point),
            Interpolation::Trilinear => self.trilinear(point),
        }
    }

    pub(crate) fn nearest(&self, point: Point3) -> f64 {
        self.containing_cell(point).map_or(EMPTY, |ix| self.value(ix))
    }

    // In-plane interpolation at a fixed depth index.
    #[inline]
    fn plane(&self, c: &[f64; 3], cell: [i64; 3], depth_index: i64) -> f64 {
        let [a, b] = self.plane_axes;
        let (a0, a1) = span(c[a], self.dims[a]);
        let (b0, b1) = span(c[b], self.dims[b]);

        let corner = |ia: i64, ib: i64| {
            let mut ix = cell;
            ix[a] = ia;
            ix[b] = ib;
            ix[self.depth_axis] = depth_index;
            self.value(ix)
        };

        let v0 = lerp(c[a], a0 as f64, corner(a0, b0), a1 as f64, corner(a1, b0));
        let v1 = lerp(c[a], a0 as f64, corner(a0, b1), a1 as f64, corner(a1, b1));
        lerp(c[b], b0 as f64, v0, b1 as f64, v1)
    }

    #[inline]
    fn centre_coordinates(&self, point: Point3) -> [f64; 3] {
        components(point.div(self.volume.voxel_size())).map(|c| c - 0.5)
    }

    pub(crate) fn bilinear(&self, point: Point3) -> f64 {
        let Some(cell) = self.containing_cell(point) else {
            return EMPTY;
        };
        let c = self.centre_coordinates(point);
        self.plane(&c, cell, cell[self.depth_axis])
    }

    pub(crate) fn trilinear(&self, point: Point3) -> f64 {
        let Some(cell) = self.containing_cell(point) else {
            return EMPTY;
        };
        let c = self.centre_coordinates(point);
        let d = self.depth_axis;
        let (d0, d1) = span(c[d], self.dims[d]);

        let v0 = self.plane(&c, cell, d0);
        let v1 = self.plane(&c, cell, d1);
        lerp(c[d], d0 as f64, v0, d1 as f64, v1)
    }
}
