//! Shared per-frame state types.

use serde::{Deserialize, Serialize};

use crate::geometry::{Cell, Point};

/// Outcome of reading the machine's printed score for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreReading {
    /// The machine displayed a score for the attempt.
    Points(u32),
    /// The machine showed its failure glyph; the throw missed.
    Missed,
    /// No usable digits yet. Covers both "not read this attempt" and a
    /// failed read that may be retried on a later frame.
    Unreadable,
}

impl ScoreReading {
    /// True once the attempt has a definitive outcome.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, ScoreReading::Unreadable)
    }
}

/// Externally visible snapshot of one processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameState {
    /// Ball position quantized to the ball grid, when the ball is on screen.
    pub ball_cell: Option<Cell>,
    /// Basket position quantized to the basket grid. Only searched for on
    /// frames where the ball was found.
    pub basket_cell: Option<Cell>,
    /// Score of the most recently completed attempt.
    pub score: ScoreReading,
    /// One-frame-ahead basket position estimate, best effort.
    pub predicted_basket: Option<Point>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unreadable_is_unresolved() {
        assert!(ScoreReading::Points(0).is_resolved());
        assert!(ScoreReading::Missed.is_resolved());
        assert!(!ScoreReading::Unreadable.is_resolved());
    }
}
