use crate::bounding_box;
use crate::enums::RoiShape;
use crate::frame::CoordinateFrame;
use crate::point::Point3;
use crate::predicates::{point_in_box, point_in_ellipsoid, point_in_elliptic_cylinder};
use crate::volume::GridVolume;

/// A region of interest.
///
/// The shape fills the box from the origin of its frame to `corner`.
/// Ellipsoids and cylinders are inscribed in that box. An isocontour ROI is
/// a mask volume laid out in the ROI's frame; non-zero voxels are inside.
#[derive(Debug, Clone)]
pub struct Roi {
    shape: RoiShape,
    coord_frame: CoordinateFrame,
    corner: Point3,
    mask: Option<GridVolume<u8>>,
}

impl Roi {
    /// An ROI without a mask. Isocontour ROIs created this way contain
    /// nothing until [`set_mask`](Self::set_mask) is called.
    pub fn new(shape: RoiShape, coord_frame: CoordinateFrame, corner: Point3) -> Self {
        Self {
            shape,
            coord_frame,
            corner,
            mask: None,
        }
    }

    /// An isocontour ROI placed at the mask's frame.
    pub fn isocontour(mask: GridVolume<u8>) -> Self {
        let mut roi = Self::new(RoiShape::Isocontour, *mask.coord_frame(), Point3::ZERO);
        roi.set_mask(mask);
        roi
    }

    pub fn shape(&self) -> RoiShape {
        self.shape
    }

    pub fn coord_frame(&self) -> &CoordinateFrame {
        &self.coord_frame
    }

    pub fn corner(&self) -> Point3 {
        self.corner
    }

    pub fn mask(&self) -> Option<&GridVolume<u8>> {
        self.mask.as_ref()
    }

    pub fn set_corner(&mut self, corner: Point3) {
        self.corner = corner;
    }

    /// Moves the ROI. A mask moves with it.
    pub fn set_coord_frame(&mut self, coord_frame: CoordinateFrame) {
        self.coord_frame = coord_frame;
        if let Some(mask) = &mut self.mask {
            mask.set_coord_frame(coord_frame);
        }
    }

    /// Installs `mask` in the ROI's frame and resizes the ROI to cover it.
    pub fn set_mask(&mut self, mut mask: GridVolume<u8>) {
        mask.set_coord_frame(self.coord_frame);
        self.corner = mask.corner();
        self.mask = Some(mask);
    }

    /// Centre of the ROI's box, in base space.
    pub fn center(&self) -> Point3 {
        self.coord_frame.alt_to_base(self.corner / 2.0)
    }

    /// Containment of a point given in the ROI's local space.
    pub fn contains(&self, p: Point3) -> bool {
        let half = self.corner / 2.0;
        match self.shape {
            RoiShape::Box => point_in_box(p, Point3::ZERO, self.corner),
            RoiShape::Ellipsoid => point_in_ellipsoid(p, half, half),
            RoiShape::EllipticCylinder => point_in_elliptic_cylinder(p, half, self.corner.z, half),
            RoiShape::Isocontour => self.mask.as_ref().is_some_and(|mask| {
                let index = mask.index_of(p, 0, 0);
                p.is_finite() && mask.get(index).is_some_and(|v| v != 0)
            }),
        }
    }

    /// Containment of a point given in base space.
    pub fn contains_base(&self, p: Point3) -> bool {
        self.contains(self.coord_frame.base_to_alt(p))
    }

    pub fn enclosing_corners(&self, out_frame: &CoordinateFrame) -> [Point3; 2] {
        bounding_box::enclosing_corners(&self.coord_frame, [Point3::ZERO, self.corner], out_frame)
    }
}
