//! Frame-level image helpers shared by the detection and scoring paths.

use anyhow::Context;
use hoopbot_core::Roi;
use opencv::{
    core::{Mat, Rect},
    imgproc,
    prelude::*,
};

use crate::Result;

/// Image utility functions over raw OpenCV Mats.
pub struct ImageOps;

impl ImageOps {
    /// Grayscale conversion followed by a global Otsu threshold.
    pub fn binarize(frame: &Mat) -> Result<Mat> {
        let mut gray = Mat::default();
        imgproc::cvt_color(frame, &mut gray, imgproc::COLOR_BGR2GRAY, 0)
            .context("grayscale conversion failed")?;

        let mut binary = Mat::default();
        imgproc::threshold(
            &gray,
            &mut binary,
            0.0,
            255.0,
            imgproc::THRESH_BINARY + imgproc::THRESH_OTSU,
        )
        .context("Otsu threshold failed")?;

        Ok(binary)
    }

    /// Owned copy of `image` restricted to `roi`.
    pub fn crop(image: &Mat, roi: &Roi) -> Result<Mat> {
        let rect = Rect::new(roi.x0, roi.y0, roi.width(), roi.height());
        let view = Mat::roi(image, rect).with_context(|| format!("crop to {roi:?} failed"))?;
        view.try_clone().context("crop copy failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC3, Scalar};

    #[test]
    fn binarize_splits_foreground_from_background() {
        let mut frame =
            Mat::new_rows_cols_with_default(60, 60, CV_8UC3, Scalar::all(0.0)).unwrap();
        imgproc::rectangle(
            &mut frame,
            Rect::new(10, 10, 20, 20),
            Scalar::all(255.0),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )
        .unwrap();

        let binary = ImageOps::binarize(&frame).unwrap();
        assert_eq!(*binary.at_2d::<u8>(20, 20).unwrap(), 255);
        assert_eq!(*binary.at_2d::<u8>(50, 50).unwrap(), 0);
    }

    #[test]
    fn crop_has_the_region_extent() {
        let frame =
            Mat::new_rows_cols_with_default(100, 200, CV_8UC3, Scalar::all(0.0)).unwrap();
        let cropped = ImageOps::crop(&frame, &Roi::new(20, 120, 10, 60)).unwrap();
        assert_eq!(cropped.cols(), 100);
        assert_eq!(cropped.rows(), 50);
    }
}
