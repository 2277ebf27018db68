//! Oblique slice extraction.
//!
//! A slice is cut from a volume along the x/y plane of a target frame,
//! starting `depth_start` along the frame's z axis and averaging a slab of
//! `thickness` millimetres.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ndarray::{Array2, ArrayViewMut1, Axis as ArrayAxis};
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;
use web_time::Instant;

use crate::enums::{Interpolation, Layout, Processor, View};
use crate::frame::CoordinateFrame;
use crate::interpolator::Interpolator;
use crate::point::Point3;
use crate::predicates::EPSILON;
use crate::slice::Slice;
use crate::volume::{GridVolume, Voxel};

#[derive(Debug, Error)]
pub enum ResampleError {
    #[error("resample cancelled")]
    Cancelled,
}

/// Cooperative cancellation flag, checked once per output row.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything that determines a slice, apart from the source data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResampleRequest {
    pub frame: CoordinateFrame,
    pub depth_start: f64,
    pub thickness: f64,
    pub zoom: f64,
    pub interpolation: Interpolation,
    pub gate: usize,
    pub time_frame: usize,
    pub processor: Processor,
}

impl Default for ResampleRequest {
    fn default() -> Self {
        Self {
            frame: CoordinateFrame::identity(),
            depth_start: 0.0,
            thickness: 1.0,
            zoom: 1.0,
            interpolation: Interpolation::default(),
            gate: 0,
            time_frame: 0,
            processor: Processor::default(),
        }
    }
}

impl ResampleRequest {
    /// A request looking at `base` from one of the anatomical views.
    pub fn for_view(base: &CoordinateFrame, view: View, layout: Layout) -> Self {
        Self::default().with_frame(base.view_frame(view, layout))
    }

    pub fn with_frame(mut self, frame: CoordinateFrame) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_depth(mut self, depth_start: f64, thickness: f64) -> Self {
        self.depth_start = depth_start;
        self.thickness = thickness;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_gate(mut self, gate: usize) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_time_frame(mut self, time_frame: usize) -> Self {
        self.time_frame = time_frame;
        self
    }

    pub fn with_processor(mut self, processor: Processor) -> Self {
        self.processor = processor;
        self
    }
}

/// One depth position in the slab and its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DepthSample {
    depth: f64,
    weight: f64,
}

/// Depth positions through the slab plus the divisor that turns the
/// weighted sum back into a per-unit-thickness value.
///
/// Samples are one source voxel length apart; the last one covers only the
/// fractional remainder of the slab and is weighted by it, never above one.
/// The divisor is the sum of the weights. A slab that is not positive, or a
/// voxel length that is not, collapses to one sample.
fn depth_samples(depth_start: f64, thickness: f64, voxel_length: f64) -> (Vec<DepthSample>, f64) {
    let ratio = thickness / voxel_length;
    if !(thickness > 0.0 && voxel_length > 0.0 && ratio.is_finite()) {
        let depth = depth_start + thickness.max(0.0) / 2.0;
        return (vec![DepthSample { depth, weight: 1.0 }], 1.0);
    }

    let count = ((ratio - EPSILON).ceil() as usize).max(1);
    // overshoot below EPSILON folds into the last whole sample
    let mut last_weight = (ratio - (count - 1) as f64).min(1.0);
    if last_weight <= 0.0 {
        last_weight = 1.0;
    }

    let samples = (0..count)
        .map(|i| {
            let start = depth_start + i as f64 * voxel_length;
            if i + 1 == count {
                DepthSample {
                    depth: start + last_weight * voxel_length / 2.0,
                    weight: last_weight,
                }
            } else {
                DepthSample {
                    depth: start + voxel_length / 2.0,
                    weight: 1.0,
                }
            }
        })
        .collect();

    // equals the ratio unless the last weight was clamped
    (samples, (count - 1) as f64 + last_weight)
}

/// Pixels needed to cover `extent` at `zoom`, at least one. Overshoot
/// below [`EPSILON`] does not add a pixel.
fn raster_len(extent: f64, zoom: f64, min_voxel: f64) -> usize {
    let n = (zoom * extent / min_voxel - EPSILON).ceil();
    if n.is_finite() && n >= 1.0 { n as usize } else { 1 }
}

/// Resamples `volume` into a slice as described by `request`.
///
/// Samples that fall outside the volume contribute [`EMPTY`]; degenerate
/// volumes and requests still produce a slice of at least 1x1 pixels. The
/// only error is observing `cancel`.
///
/// [`EMPTY`]: crate::volume::EMPTY
pub fn resample<T: Voxel>(
    volume: &GridVolume<T>,
    request: &ResampleRequest,
    cancel: Option<&CancelToken>,
) -> Result<Slice, ResampleError> {
    let started = Instant::now();
    let target = &request.frame;
    let source = volume.coord_frame();

    let zoom = if request.zoom.is_finite() && request.zoom > 0.0 {
        request.zoom
    } else {
        1.0
    };
    let min_voxel = volume.min_voxel_dim();
    let pixel = if min_voxel.is_finite() && min_voxel > 0.0 {
        min_voxel / zoom
    } else {
        1.0
    };

    // footprint of the whole source box in the target plane
    let [lo, hi] = volume.enclosing_corners(target);
    let width = raster_len(hi.x - lo.x, zoom, min_voxel);
    let height = raster_len(hi.y - lo.y, zoom, min_voxel);
    let origin_x = if lo.x.is_finite() { lo.x } else { 0.0 };
    let origin_y = if lo.y.is_finite() { lo.y } else { 0.0 };

    let voxel_length = source.alt_dim_to_alt(volume.voxel_size(), target).z;
    let (samples, normalizer) = depth_samples(request.depth_start, request.thickness, voxel_length);

    let normal = target.alt_to_alt(Point3::new(0.0, 0.0, 1.0), source)
        - target.alt_to_alt(Point3::ZERO, source);
    let sampler = Interpolator::new(volume, request.gate, request.time_frame, normal);
    let interpolation = request.interpolation;

    let fill_row = |(y, mut row): (usize, ArrayViewMut1<'_, f32>)| -> Result<(), ResampleError> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(ResampleError::Cancelled);
        }
        let local_y = origin_y + (y as f64 + 0.5) * pixel;
        for (x, out) in row.iter_mut().enumerate() {
            let local_x = origin_x + (x as f64 + 0.5) * pixel;
            let sum: f64 = samples
                .iter()
                .map(|sample| {
                    let local = Point3::new(local_x, local_y, sample.depth);
                    let point = target.alt_to_alt(local, source);
                    sampler.sample(interpolation, point) * sample.weight
                })
                .sum();
            *out = (sum / normalizer) as f32;
        }
        Ok(())
    };

    let mut data = Array2::<f32>::zeros((height, width));
    match request.processor {
        Processor::Parallel => data
            .axis_iter_mut(ArrayAxis(0))
            .into_par_iter()
            .enumerate()
            .try_for_each(fill_row)?,
        Processor::Serial => data
            .axis_iter_mut(ArrayAxis(0))
            .enumerate()
            .try_for_each(fill_row)?,
    }

    let offset = target.alt_to_base(Point3::new(origin_x, origin_y, request.depth_start));
    let slice_frame = CoordinateFrame::new(offset, *target.axes());
    let voxel_size = Point3::new(pixel, pixel, request.thickness.max(0.0));

    debug!(
        width,
        height,
        depth_samples = samples.len(),
        ?interpolation,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "resampled slice"
    );

    Ok(Slice::new(slice_frame, voxel_size, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn whole_voxel_slab_is_one_sample() {
        let (samples, normalizer) = depth_samples(0.0, 2.0, 2.0);
        assert_eq!(samples, vec![DepthSample { depth: 1.0, weight: 1.0 }]);
        assert_eq!(normalizer, 1.0);
    }

    #[test]
    fn fractional_slab_weights_last_sample() {
        let (samples, normalizer) = depth_samples(10.0, 5.0, 2.0);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], DepthSample { depth: 11.0, weight: 1.0 });
        assert_eq!(samples[1], DepthSample { depth: 13.0, weight: 1.0 });
        assert_abs_diff_eq!(samples[2].weight, 0.5);
        assert_abs_diff_eq!(samples[2].depth, 14.5);
        assert_abs_diff_eq!(normalizer, 2.5);
    }

    #[test]
    fn slab_just_over_a_voxel_keeps_weights_at_most_one() {
        let (samples, normalizer) = depth_samples(0.0, 1.000005, 1.0);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].weight, 1.0);
        assert_eq!(normalizer, 1.0);

        let (samples, normalizer) = depth_samples(0.0, 3.000001, 1.0);
        assert_eq!(samples.len(), 3);
        assert!(samples.iter().all(|s| s.weight > 0.0 && s.weight <= 1.0));
        assert_eq!(normalizer, 3.0);
    }

    #[test]
    fn zero_thickness_collapses_to_one_sample() {
        let (samples, normalizer) = depth_samples(3.0, 0.0, 2.0);
        assert_eq!(samples, vec![DepthSample { depth: 3.0, weight: 1.0 }]);
        assert_eq!(normalizer, 1.0);
    }

    #[test]
    fn raster_len_is_at_least_one() {
        assert_eq!(raster_len(8.0, 1.0, 2.0), 4);
        assert_eq!(raster_len(8.1, 1.0, 2.0), 5);
        assert_eq!(raster_len(8.0, 2.0, 2.0), 8);
        assert_eq!(raster_len(0.0, 1.0, 2.0), 1);
        assert_eq!(raster_len(8.0, 1.0, 0.0), 1);
        assert_eq!(raster_len(2.0 + 1e-15, 1.0, 1.0), 2);
    }

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
