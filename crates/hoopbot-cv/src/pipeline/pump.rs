//! Pull-based frame pump: video source in, frame states out.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use hoopbot_core::FrameState;
use log::info;
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture},
};

use super::extractor::FrameStateExtractor;
use crate::Result;
use crate::detect::VisionConfig;
use crate::score::OcrEngine;

/// Where frames come from.
#[derive(Debug, Clone)]
pub enum VideoSource {
    Camera(i32),
    File(PathBuf),
}

/// Synchronous, pull-based producer of [`FrameState`] values.
///
/// The consumer iterates at its own pace; each pull reads one frame and
/// runs the extractor on it. Iteration ends at end-of-source, and dropping
/// the pump releases the capture handle.
pub struct FramePump {
    capture: VideoCapture,
    extractor: FrameStateExtractor,
    started: Instant,
}

impl FramePump {
    pub fn open(source: VideoSource, config: VisionConfig, ocr: Box<dyn OcrEngine>) -> Result<Self> {
        let capture = match &source {
            VideoSource::Camera(index) => VideoCapture::new(*index, videoio::CAP_ANY),
            VideoSource::File(path) => VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY),
        }
        .context("video capture init failed")?;
        if !capture.is_opened().context("video capture state query failed")? {
            bail!("could not open video source {source:?}");
        }
        info!("capturing from {source:?}");

        Ok(Self {
            capture,
            extractor: FrameStateExtractor::new(config, ocr)?,
            started: Instant::now(),
        })
    }

    fn pull(&mut self) -> Result<Option<FrameState>> {
        let mut frame = Mat::default();
        let grabbed = self.capture.read(&mut frame).context("frame read failed")?;
        if !grabbed || frame.empty() {
            return Ok(None);
        }
        let timestamp = self.started.elapsed().as_secs_f64();
        self.extractor.process(&frame, timestamp).map(Some)
    }
}

impl Iterator for FramePump {
    type Item = Result<FrameState>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull().transpose()
    }
}
