use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::trace;

use crate::enums::{Interpolation, View};
use crate::frame::CoordinateFrame;
use crate::point::Point3;
use crate::resampler::{self, CancelToken, ResampleError, ResampleRequest};
use crate::slice::Slice;
use crate::volume::{GridVolume, Voxel};

/// Everything a cached slice depends on. The processor is left out, it does
/// not change the result.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SliceKey {
    source_frame: CoordinateFrame,
    voxel_size: Point3,
    frame: CoordinateFrame,
    depth_start: f64,
    thickness: f64,
    zoom: f64,
    interpolation: Interpolation,
    gate: usize,
    time_frame: usize,
    generation: u64,
}

impl SliceKey {
    fn new<T: Voxel>(volume: &GridVolume<T>, request: &ResampleRequest) -> Self {
        Self {
            source_frame: *volume.coord_frame(),
            voxel_size: volume.voxel_size(),
            frame: request.frame,
            depth_start: request.depth_start,
            thickness: request.thickness,
            zoom: request.zoom,
            interpolation: request.interpolation,
            gate: request.gate,
            time_frame: request.time_frame,
            generation: volume.generation(),
        }
    }
}

/// The most recent slice of one volume per view.
///
/// A slice is reused while the request, the volume's placement and its data
/// generation are unchanged. Use one cache per source volume.
#[derive(Debug, Default)]
pub struct SliceCache {
    entries: HashMap<View, (SliceKey, Slice)>,
}

impl SliceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, view: View) -> Option<&Slice> {
        self.entries.get(&view).map(|(_, slice)| slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_or_resample<T: Voxel>(
        &mut self,
        view: View,
        volume: &GridVolume<T>,
        request: &ResampleRequest,
        cancel: Option<&CancelToken>,
    ) -> Result<&Slice, ResampleError> {
        let key = SliceKey::new(volume, request);

        match self.entries.entry(view) {
            Entry::Occupied(mut entry) => {
                if entry.get().0 == key {
                    trace!(?view, "slice cache hit");
                } else {
                    trace!(?view, "slice cache stale");
                    let slice = resampler::resample(volume, request, cancel)?;
                    entry.insert((key, slice));
                }
                Ok(&entry.into_mut().1)
            }
            Entry::Vacant(entry) => {
                trace!(?view, "slice cache miss");
                let slice = resampler::resample(volume, request, cancel)?;
                Ok(&entry.insert((key, slice)).1)
            }
        }
    }

    pub fn invalidate(&mut self, view: View) {
        if self.entries.remove(&view).is_some() {
            trace!(?view, "slice invalidated");
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
