//! Decision core for the basket-toss arcade robot.
//!
//! Everything in this crate is pure logic: frame-space geometry and grid
//! quantization, the basket motion buffer, and the tabular value policy.
//! Nothing here touches OpenCV, the OCR engine, or the serial link.

pub mod geometry;
pub mod learning;
pub mod state;
pub mod track;

// Re-export commonly used types
pub use geometry::{Cell, GridSpec, Point, Roi};
pub use learning::{Action, Policy, PolicyConfig, QTable, QTableError};
pub use state::{FrameState, ScoreReading};
pub use track::BasketTracker;
