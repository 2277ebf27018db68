use half::f16;
use ndarray::Array5;
use thiserror::Error;

use crate::bounding_box;
use crate::frame::CoordinateFrame;
use crate::point::Point3;

/// Value returned for lookups outside the grid.
pub const EMPTY: f64 = 0.0;

#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("data has {actual} voxels but dimensions {dim:?} need {expected}")]
    ShapeMismatch {
        dim: Dim,
        expected: usize,
        actual: usize,
    },

    #[error("voxel size must be finite and non-negative, got {0:?}")]
    InvalidVoxelSize(Point3),
}

/// Scalar types a volume can store.
pub trait Voxel: Copy + Send + Sync + 'static {
    fn to_f64(self) -> f64;
}

macro_rules! impl_voxel {
    ($($ty:ty),*) => {
        $(impl Voxel for $ty {
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        })*
    };
}

impl_voxel!(u8, i8, u16, i16, u32, i32, f32, f64);

impl Voxel for f16 {
    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }
}

/// Grid dimensions: spatial extent plus gate and time frame counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dim {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub gate: usize,
    pub frame: usize,
}

impl Dim {
    pub const fn new(x: usize, y: usize, z: usize, gate: usize, frame: usize) -> Self {
        Self { x, y, z, gate, frame }
    }

    /// A static, ungated volume.
    pub const fn spatial(x: usize, y: usize, z: usize) -> Self {
        Self::new(x, y, z, 1, 1)
    }

    pub fn voxel_count(&self) -> usize {
        self.x * self.y * self.z * self.gate * self.frame
    }

    /// Shape in storage order `[frame, gate, z, y, x]`.
    fn shape(&self) -> (usize, usize, usize, usize, usize) {
        (self.frame, self.gate, self.z, self.y, self.x)
    }

    fn from_shape(shape: &[usize]) -> Self {
        Self::new(shape[4], shape[3], shape[2], shape[1], shape[0])
    }
}

/// A cell address. Signed so that indices computed from points outside the
/// grid are representable; they simply miss on lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VoxelIndex {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub gate: i64,
    pub frame: i64,
}

impl VoxelIndex {
    pub const fn new(x: i64, y: i64, z: i64, gate: i64, frame: i64) -> Self {
        Self { x, y, z, gate, frame }
    }
}

/// A gridded scalar dataset placed in base space by its own frame.
///
/// Voxel `(x, y, z)` covers `[x, x + 1) * voxel_size.x` (and so on) in the
/// volume's local space; the grid's near corner is the frame origin.
#[derive(Debug, Clone)]
pub struct GridVolume<T> {
    data: Array5<T>,
    voxel_size: Point3,
    coord_frame: CoordinateFrame,
    generation: u64,
}

fn check_voxel_size(voxel_size: Point3) -> Result<(), VolumeError> {
    let valid = voxel_size.is_finite() && voxel_size.min_dim() >= 0.0;
    if valid {
        Ok(())
    } else {
        Err(VolumeError::InvalidVoxelSize(voxel_size))
    }
}

impl<T: Voxel> GridVolume<T> {
    /// Wraps data laid out `[frame, gate, z, y, x]`.
    pub fn new(
        data: Array5<T>,
        voxel_size: Point3,
        coord_frame: CoordinateFrame,
    ) -> Result<Self, VolumeError> {
        check_voxel_size(voxel_size)?;
        Ok(Self {
            data,
            voxel_size,
            coord_frame,
            generation: 0,
        })
    }

    pub fn from_vec(
        dim: Dim,
        voxel_size: Point3,
        coord_frame: CoordinateFrame,
        values: Vec<T>,
    ) -> Result<Self, VolumeError> {
        let actual = values.len();
        let data = Array5::from_shape_vec(dim.shape(), values).map_err(|_| {
            VolumeError::ShapeMismatch {
                dim,
                expected: dim.voxel_count(),
                actual,
            }
        })?;
        Self::new(data, voxel_size, coord_frame)
    }

    pub fn filled(
        dim: Dim,
        voxel_size: Point3,
        coord_frame: CoordinateFrame,
        value: T,
    ) -> Result<Self, VolumeError> {
        Self::new(Array5::from_elem(dim.shape(), value), voxel_size, coord_frame)
    }

    pub fn from_fn(
        dim: Dim,
        voxel_size: Point3,
        coord_frame: CoordinateFrame,
        mut f: impl FnMut(VoxelIndex) -> T,
    ) -> Result<Self, VolumeError> {
        let data = Array5::from_shape_fn(dim.shape(), |(frame, gate, z, y, x)| {
            f(VoxelIndex::new(x as i64, y as i64, z as i64, gate as i64, frame as i64))
        });
        Self::new(data, voxel_size, coord_frame)
    }

    pub fn dim(&self) -> Dim {
        Dim::from_shape(self.data.shape())
    }

    pub fn voxel_size(&self) -> Point3 {
        self.voxel_size
    }

    pub fn coord_frame(&self) -> &CoordinateFrame {
        &self.coord_frame
    }

    /// Moves the volume. Counts as a change like [`data_mut`](Self::data_mut).
    pub fn set_coord_frame(&mut self, coord_frame: CoordinateFrame) {
        self.coord_frame = coord_frame;
        self.generation += 1;
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &Array5<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying data. Counts as a data
    /// change for anything keyed on [`generation`](Self::generation).
    pub fn data_mut(&mut self) -> &mut Array5<T> {
        self.generation += 1;
        &mut self.data
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, index: VoxelIndex) -> Option<T> {
        let to_usize = |v: i64| usize::try_from(v).ok();
        let idx = [
            to_usize(index.frame)?,
            to_usize(index.gate)?,
            to_usize(index.z)?,
            to_usize(index.y)?,
            to_usize(index.x)?,
        ];
        self.data.get(idx).copied()
    }

    /// The voxel value as `f64`, or [`EMPTY`] outside the grid.
    #[inline]
    pub fn value_at(&self, index: VoxelIndex) -> f64 {
        self.get(index).map_or(EMPTY, Voxel::to_f64)
    }

    /// Far corner of the grid in the volume's local space.
    pub fn corner(&self) -> Point3 {
        let dim = self.dim();
        Point3::new(dim.x as f64, dim.y as f64, dim.z as f64).mult(self.voxel_size)
    }

    pub fn min_voxel_dim(&self) -> f64 {
        self.voxel_size.min_dim()
    }

    /// Centre of a voxel in the volume's local space.
    pub fn voxel_center(&self, index: VoxelIndex) -> Point3 {
        Point3::new(
            index.x as f64 + 0.5,
            index.y as f64 + 0.5,
            index.z as f64 + 0.5,
        )
        .mult(self.voxel_size)
    }

    /// The voxel containing `point` (local space) for the given gate and
    /// frame. The result may lie outside the grid.
    pub fn index_of(&self, point: Point3, gate: usize, frame: usize) -> VoxelIndex {
        let cell = point.div(self.voxel_size);
        VoxelIndex::new(
            cell.x.floor() as i64,
            cell.y.floor() as i64,
            cell.z.floor() as i64,
            gate as i64,
            frame as i64,
        )
    }

    /// Bounding box of the whole grid, as seen from `out_frame`.
    pub fn enclosing_corners(&self, out_frame: &CoordinateFrame) -> [Point3; 2] {
        bounding_box::enclosing_corners(
            &self.coord_frame,
            [Point3::ZERO, self.corner()],
            out_frame,
        )
    }
}
