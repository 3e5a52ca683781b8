//! Perception for the basket-toss cabinet.
//!
//! Region-restricted blob detection, printed-score OCR, and the per-frame
//! state pipeline, built on OpenCV. Decision logic lives in `hoopbot-core`;
//! this crate only turns raw frames into [`hoopbot_core::FrameState`] values.

pub mod detect;
pub mod pipeline;
pub mod score;
pub mod utils;

// Re-export commonly used types
pub use detect::{BlobLocator, ElementKind, ElementProfile, VisionConfig};
pub use pipeline::{FramePump, FrameStateExtractor, VideoSource};
pub use score::{OcrEngine, ScoreReader, TesseractOcr};

// Error handling
pub type Result<T> = anyhow::Result<T>;
