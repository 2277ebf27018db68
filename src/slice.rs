use image::{ImageBuffer, Luma};
use ndarray::{Array2, Axis};

use crate::frame::CoordinateFrame;
use crate::point::Point3;
use crate::volume::{GridVolume, VolumeError};

/// A resampled 2D raster lying in the x/y plane of its frame.
///
/// Pixel `(x, y)` covers `[x, x + 1) * voxel_size.x` by
/// `[y, y + 1) * voxel_size.y` in the slice's local space, and the slab
/// `[0, voxel_size.z]` in depth. The raster is stored `[row, column]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    coord_frame: CoordinateFrame,
    voxel_size: Point3,
    data: Array2<f32>,
}

impl Slice {
    pub(crate) fn new(coord_frame: CoordinateFrame, voxel_size: Point3, data: Array2<f32>) -> Self {
        Self {
            coord_frame,
            voxel_size,
            data,
        }
    }

    pub fn coord_frame(&self) -> &CoordinateFrame {
        &self.coord_frame
    }

    pub fn voxel_size(&self) -> Point3 {
        self.voxel_size
    }

    /// (width, height)
    pub fn dim(&self) -> (usize, usize) {
        let (height, width) = self.data.dim();
        (width, height)
    }

    /// Far corner of the slice in its local space.
    pub fn corner(&self) -> Point3 {
        let (width, height) = self.dim();
        Point3::new(width as f64, height as f64, 1.0).mult(self.voxel_size)
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    /// Row-major raster, first row first.
    pub fn as_slice(&self) -> Option<&[f32]> {
        self.data.as_slice()
    }

    pub fn into_raw(self) -> Vec<f32> {
        self.data.into_iter().collect()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        self.data.get((y, x)).copied()
    }

    /// Smallest and largest finite value, or `None` for an all-NaN raster.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Centre of pixel `(x, y)` in the slice's local space, halfway through
    /// the slab.
    pub fn pixel_center(&self, x: usize, y: usize) -> Point3 {
        Point3::new(x as f64 + 0.5, y as f64 + 0.5, 0.5).mult(self.voxel_size)
    }

    /// Hands the raster over as a single-channel float image. Values are
    /// passed through unchanged.
    pub fn to_image(&self) -> ImageBuffer<Luma<f32>, Vec<f32>> {
        let (width, height) = self.dim();
        ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
            Luma([self.data[(y as usize, x as usize)]])
        })
    }

    /// The slice as a depth-1 volume in its own frame.
    pub fn into_volume(self) -> Result<GridVolume<f32>, VolumeError> {
        let data = self
            .data
            .insert_axis(Axis(0))
            .insert_axis(Axis(0))
            .insert_axis(Axis(0));
        GridVolume::new(data, self.voxel_size, self.coord_frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::{Dim, VoxelIndex};
    use ndarray::array;

    fn sample() -> Slice {
        Slice::new(
            CoordinateFrame::with_offset(Point3::new(1.0, 1.0, 1.0)),
            Point3::new(2.0, 2.0, 4.0),
            array![[1.0, 2.0, 3.0], [4.0, f32::NAN, -6.0]],
        )
    }

    #[test]
    fn dims_are_width_then_height() {
        let slice = sample();
        assert_eq!(slice.dim(), (3, 2));
        assert_eq!(slice.corner(), Point3::new(6.0, 4.0, 4.0));
        assert_eq!(slice.get(2, 0), Some(3.0));
        assert_eq!(slice.get(0, 2), None);
    }

    #[test]
    fn min_max_skips_nan() {
        assert_eq!(sample().min_max(), Some((-6.0, 4.0)));
    }

    #[test]
    fn pixel_center_is_mid_slab() {
        assert_eq!(sample().pixel_center(1, 1), Point3::new(3.0, 3.0, 2.0));
    }

    #[test]
    fn image_matches_raster() {
        let image = sample().to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [-6.0]);
    }

    #[test]
    fn into_volume_keeps_layout() {
        let volume = sample().into_volume().unwrap();
        assert_eq!(volume.dim(), Dim::new(3, 2, 1, 1, 1));
        assert_eq!(volume.value_at(VoxelIndex::new(1, 0, 0, 0, 0)), 2.0);
        assert_eq!(volume.corner(), Point3::new(6.0, 4.0, 4.0));
    }
}
