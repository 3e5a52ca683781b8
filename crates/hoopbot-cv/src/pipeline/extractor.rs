//! Per-frame orchestration: detection, quantization, scoring.

use hoopbot_core::{BasketTracker, FrameState, ScoreReading};
use log::{debug, info};
use opencv::core::Mat;

use crate::Result;
use crate::detect::{BlobLocator, ElementKind, VisionConfig};
use crate::score::{OcrEngine, ScoreReader};
use crate::utils::ImageOps;

/// Attempt-tracking phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No ball in its region; the previous throw is in flight or resolved.
    WaitingForBall,
    /// A ball is on screen, an attempt is in progress.
    Tracking,
}

/// Turns raw frames into [`FrameState`] snapshots.
///
/// Score reading is edge-triggered: the ball leaving its region ends an
/// attempt and arms one read, retried on later ball-less frames only while
/// the region stays unreadable.
pub struct FrameStateExtractor {
    config: VisionConfig,
    ball: BlobLocator,
    basket: BlobLocator,
    scores: ScoreReader,
    tracker: BasketTracker,
    phase: Phase,
    score_pending: bool,
    score: ScoreReading,
}

impl FrameStateExtractor {
    pub fn new(config: VisionConfig, ocr: Box<dyn OcrEngine>) -> Result<Self> {
        let ball = BlobLocator::new(ElementKind::Ball, config.ball)?;
        let basket = BlobLocator::new(ElementKind::Basket, config.basket)?;
        let scores = ScoreReader::new(config.digits_roi, config.failure_roi, ocr);
        Ok(Self {
            config,
            ball,
            basket,
            scores,
            tracker: BasketTracker::new(),
            phase: Phase::WaitingForBall,
            score_pending: false,
            score: ScoreReading::Unreadable,
        })
    }

    /// Process one raw frame captured at `timestamp` seconds.
    pub fn process(&mut self, frame: &Mat, timestamp: f64) -> Result<FrameState> {
        let binary = ImageOps::binarize(frame)?;
        let ball_center = self.ball.locate(&binary)?;
        // No ball in its region means the throw already happened; searching
        // for the basket then is wasted work.
        let basket_center = match ball_center {
            Some(_) => self.basket.locate(&binary)?,
            None => None,
        };
        self.tracker.observe(basket_center, timestamp);

        match (self.phase, ball_center.is_some()) {
            (Phase::Tracking, false) => {
                info!("ball released, attempt over");
                self.phase = Phase::WaitingForBall;
                self.score_pending = true;
            }
            (Phase::WaitingForBall, true) => {
                debug!("new ball on screen");
                self.phase = Phase::Tracking;
                self.score_pending = false;
                self.score = ScoreReading::Unreadable;
            }
            _ => {}
        }

        if self.score_pending {
            let reading = self.scores.read(frame)?;
            if reading.is_resolved() {
                info!("attempt resolved: {reading:?}");
                self.score = reading;
                self.score_pending = false;
            }
        }

        Ok(FrameState {
            ball_cell: ball_center.map(|c| self.config.ball_grid.cell_of(c)),
            basket_cell: basket_center.map(|c| self.config.basket_grid.cell_of(c)),
            score: self.score,
            predicted_basket: self.tracker.predict(),
        })
    }
}
