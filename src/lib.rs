//! # Oblique-volume library
//!
//! This crate is the geometry engine behind a medical image viewer: it
//! places volumes and regions of interest in space, cuts oblique slices
//! through volumes and traces where ROIs cross those slices.
//!
//! Everything is expressed with [`CoordinateFrame`]s: an offset plus three
//! orthonormal axes in a shared base (world) space. A [`GridVolume`] owns a
//! frame that positions its voxel grid; a slice is requested through another
//! frame, whose x/y plane becomes the slice plane and whose z axis is the
//! depth direction. Slices can be viewed along the three medical axes:
//!  - Transverse
//!  - Coronal
//!  - Sagittal
//!
//! Slices are resampled with nearest neighbour, bilinear or trilinear
//! interpolation and average a slab of configurable thickness. Output rows
//! are computed in parallel using rayon, and a [`CancelToken`] lets a caller
//! abandon a long request.
//!
//! Volumes may be gated and dynamic: voxels are addressed by
//! `(x, y, z, gate, frame)`. Lookups outside the grid read as [`EMPTY`].
//!
//! # Examples
//!
//! ## Cutting a coronal slice
//!
//! ```no_run
//! # use oblique_volume::{
//! #     CoordinateFrame, Dim, GridVolume, Interpolation, Layout, Point3, ResampleRequest, View,
//! #     resample,
//! # };
//! let volume = GridVolume::filled(
//!     Dim::spatial(64, 64, 32),
//!     Point3::new(1.0, 1.0, 2.5),
//!     CoordinateFrame::identity(),
//!     100u16,
//! )
//! .expect("voxel size is valid");
//!
//! let request = ResampleRequest::for_view(volume.coord_frame(), View::Coronal, Layout::Linear)
//!     .with_depth(-32.0, 2.0)
//!     .with_interpolation(Interpolation::Trilinear);
//! let slice = resample(&volume, &request, None).expect("not cancelled");
//! let image = slice.to_image();
//! # let _ = image;
//! ```
//!
//! ## Tracing an ROI on a slice
//!
//! ```no_run
//! # use oblique_volume::{CoordinateFrame, Point3, Roi, RoiShape, trace_boundary};
//! # fn demo(slice: &oblique_volume::Slice) {
//! let roi = Roi::new(RoiShape::Ellipsoid, CoordinateFrame::identity(), Point3::splat(20.0));
//! let outline = trace_boundary(slice, &roi);
//! # let _ = outline;
//! # }
//! ```

pub mod bounding_box;
pub mod cache;
pub mod contour;
pub mod enums;
pub mod frame;
mod interpolator;
pub mod point;
pub mod predicates;
pub mod resampler;
pub mod roi;
pub mod slice;
pub mod view;
pub mod volume;

pub use bounding_box::enclosing_corners;
pub use cache::SliceCache;
pub use contour::trace_boundary;
pub use enums::{Axis, Interpolation, Layout, Processor, RoiShape, View};
pub use frame::{CoordinateFrame, orthonormalize};
pub use point::Point3;
pub use resampler::{CancelToken, ResampleError, ResampleRequest, resample};
pub use roi::Roi;
pub use slice::Slice;
pub use volume::{Dim, EMPTY, GridVolume, Voxel, VolumeError, VoxelIndex};
