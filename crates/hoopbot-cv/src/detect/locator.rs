//! Contour-and-moment blob location inside a region of interest.

use anyhow::Context;
use hoopbot_core::Point;
use log::debug;
use opencv::{
    core::{self, Mat, Point as CvPoint, Size, Vector},
    imgproc,
};

use super::config::{ElementKind, ElementProfile, KernelShape, MorphOp};
use crate::Result;
use crate::utils::ImageOps;

/// Locates plausible centroids for one element kind inside its region of
/// interest on a binarized frame.
pub struct BlobLocator {
    kind: ElementKind,
    profile: ElementProfile,
    kernel: Mat,
}

impl BlobLocator {
    pub fn new(kind: ElementKind, profile: ElementProfile) -> Result<Self> {
        let shape = match profile.kernel {
            KernelShape::Ellipse => imgproc::MORPH_ELLIPSE,
            KernelShape::Rect => imgproc::MORPH_RECT,
        };
        let kernel = imgproc::get_structuring_element(
            shape,
            Size::new(profile.kernel_size, profile.kernel_size),
            CvPoint::new(-1, -1),
        )
        .context("structuring element creation failed")?;

        Ok(Self {
            kind,
            profile,
            kernel,
        })
    }

    /// First centroid whose cleaned contour area falls strictly inside the
    /// profile's plausibility range, or `None`. Contour enumeration order
    /// decides between multiple qualifying blobs; a coarse tie-break, kept
    /// as tuned on the cabinet.
    pub fn locate(&self, binary: &Mat) -> Result<Option<Point>> {
        Ok(self.locate_all(binary)?.into_iter().next())
    }

    /// Every qualifying centroid, in contour enumeration order. The basket
    /// can legitimately produce several (rim and net markers both survive
    /// erosion); consumers that want a single answer use [`Self::locate`].
    pub fn locate_all(&self, binary: &Mat) -> Result<Vec<Point>> {
        let cropped = ImageOps::crop(binary, &self.profile.roi)?;
        let cleaned = self.cleanup(&cropped)?;

        let mut contours: Vector<Vector<CvPoint>> = Vector::new();
        imgproc::find_contours(
            &cleaned,
            &mut contours,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
            CvPoint::new(0, 0),
        )
        .context("contour extraction failed")?;

        let (min_area, max_area) = self.profile.area_range;
        let mut centers = Vec::new();
        for contour in contours.iter() {
            let area = imgproc::contour_area(&contour, false)?;
            if area <= min_area || area >= max_area {
                continue;
            }
            let moments = imgproc::moments(&contour, false)?;
            if moments.m00 == 0.0 {
                // degenerate contour, nothing to take a centroid of
                continue;
            }
            // restore crop-local centroids to absolute frame coordinates
            centers.push(Point::new(
                moments.m10 / moments.m00 + self.profile.roi.x0 as f64,
                moments.m01 / moments.m00 + self.profile.roi.y0 as f64,
            ));
        }

        debug!("{:?}: {} qualifying contour(s)", self.kind, centers.len());
        Ok(centers)
    }

    fn cleanup(&self, cropped: &Mat) -> Result<Mat> {
        let mut cleaned = Mat::default();
        let border = imgproc::morphology_default_border_value()?;
        match self.profile.op {
            MorphOp::Dilate => imgproc::dilate(
                cropped,
                &mut cleaned,
                &self.kernel,
                CvPoint::new(-1, -1),
                self.profile.iterations,
                core::BORDER_CONSTANT,
                border,
            )
            .context("dilation failed")?,
            MorphOp::Erode => imgproc::erode(
                cropped,
                &mut cleaned,
                &self.kernel,
                CvPoint::new(-1, -1),
                self.profile.iterations,
                core::BORDER_CONSTANT,
                border,
            )
            .context("erosion failed")?,
        }
        Ok(cleaned)
    }
}
