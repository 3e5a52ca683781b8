//! Printed-score extraction from fixed screen regions.

pub mod ocr;

pub use ocr::{OcrEngine, TesseractOcr};

use hoopbot_core::{Roi, ScoreReading};
use log::debug;
use opencv::core::Mat;

use crate::Result;
use crate::utils::ImageOps;

/// Reads the printed score, or the failure glyph, from a raw frame.
///
/// This is comparatively expensive (one OCR invocation per region), so the
/// pipeline only calls it once per attempt, on the ball-release edge.
pub struct ScoreReader {
    ocr: Box<dyn OcrEngine>,
    digits_roi: Roi,
    failure_roi: Roi,
}

impl ScoreReader {
    pub fn new(digits_roi: Roi, failure_roi: Roi, ocr: Box<dyn OcrEngine>) -> Self {
        Self {
            ocr,
            digits_roi,
            failure_roi,
        }
    }

    /// The failure glyph has priority: any text in the failure region means
    /// the throw missed, whatever the digit region contains.
    pub fn read(&self, frame: &Mat) -> Result<ScoreReading> {
        let failure_text = self
            .ocr
            .text(&ImageOps::crop(frame, &self.failure_roi)?, false)?;
        if !failure_text.trim().is_empty() {
            debug!("failure glyph read as {:?}", failure_text.trim());
            return Ok(ScoreReading::Missed);
        }

        let raw = self
            .ocr
            .text(&ImageOps::crop(frame, &self.digits_roi)?, true)?;
        // keep digits in order, drop whatever else the engine hallucinated
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        match digits.parse() {
            Ok(points) => Ok(ScoreReading::Points(points)),
            Err(_) => Ok(ScoreReading::Unreadable),
        }
    }
}
