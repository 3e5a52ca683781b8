//! Per-frame orchestration and the frame pump

pub mod extractor;
pub mod pump;

pub use extractor::FrameStateExtractor;
pub use pump::{FramePump, VideoSource};
