//! OCR collaborator boundary.

use std::path::PathBuf;
use std::process::Command;

use anyhow::Context;
use opencv::{
    core::{Mat, Vector},
    imgcodecs,
};
use thiserror::Error;

use crate::Result;

/// Text recognition over a cropped screen region.
pub trait OcrEngine {
    /// Recognized text, including the engine's trailing whitespace.
    /// `single_token` constrains the engine to treat the region as one
    /// word, which is how the score digits are read.
    fn text(&self, image: &Mat, single_token: bool) -> Result<String>;
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("tesseract exited with {status}: {stderr}")]
    Engine {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Shells out to the `tesseract` executable with a temp-file round trip.
pub struct TesseractOcr {
    executable: PathBuf,
}

impl TesseractOcr {
    pub fn new() -> Self {
        Self {
            executable: "tesseract".into(),
        }
    }

    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractOcr {
    fn text(&self, image: &Mat, single_token: bool) -> Result<String> {
        let input = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .context("ocr input temp file")?;
        let input_path = input.path().to_string_lossy().to_string();
        imgcodecs::imwrite(&input_path, image, &Vector::new())
            .context("ocr input encode failed")?;

        let output = tempfile::Builder::new()
            .tempfile()
            .context("ocr output temp file")?;
        let output_base = output.path().to_string_lossy().to_string();

        // psm 8: single word; psm 6: uniform block of text
        let psm = if single_token { "8" } else { "6" };
        let run = Command::new(&self.executable)
            .arg(input.path())
            .arg(&output_base)
            .args(["--psm", psm])
            .output()
            .with_context(|| format!("failed to launch {:?}", self.executable))?;
        if !run.status.success() {
            return Err(OcrError::Engine {
                status: run.status,
                stderr: String::from_utf8_lossy(&run.stderr).into_owned(),
            }
            .into());
        }

        // tesseract appends .txt to the output base it is given
        let text_path = format!("{output_base}.txt");
        let text = std::fs::read_to_string(&text_path)
            .with_context(|| format!("missing ocr output {text_path}"))?;
        let _ = std::fs::remove_file(&text_path);
        Ok(text)
    }
}
