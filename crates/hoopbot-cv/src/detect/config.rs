//! Perception configuration

use hoopbot_core::{GridSpec, Roi};
use serde::{Deserialize, Serialize};

/// Screen element a locator is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Ball,
    Basket,
}

/// Morphological cleanup operator applied before contour extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MorphOp {
    Dilate,
    Erode,
}

/// Shape of the structuring element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KernelShape {
    Ellipse,
    Rect,
}

/// Cleanup operator and plausibility bounds for one element kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementProfile {
    /// Region the element is searched in.
    pub roi: Roi,
    pub op: MorphOp,
    pub kernel: KernelShape,
    pub kernel_size: i32,
    pub iterations: i32,
    /// Exclusive (min, max) bounds a contour's area must fall inside.
    pub area_range: (f64, f64),
}

/// Main perception configuration: element profiles, OCR regions, and the
/// grids their detections are quantized against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    pub ball: ElementProfile,
    pub basket: ElementProfile,
    /// Region showing the printed score digits.
    pub digits_roi: Roi,
    /// Region where the failure glyph appears after a missed throw.
    pub failure_roi: Roi,
    pub ball_grid: GridSpec,
    pub basket_grid: GridSpec,
}

impl VisionConfig {
    pub fn profile(&self, kind: ElementKind) -> &ElementProfile {
        match kind {
            ElementKind::Ball => &self.ball,
            ElementKind::Basket => &self.basket,
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        // Values tuned against the cabinet's 202px-wide screen feed. The
        // ball blob is small and fragmented, so it gets a round kernel and
        // heavy dilation; the basket is a large solid and gets one erosion.
        let ball_roi = Roi::new(0, 202, 250, 360);
        let basket_roi = Roi::new(0, 202, 50, 200);
        Self {
            ball: ElementProfile {
                roi: ball_roi,
                op: MorphOp::Dilate,
                kernel: KernelShape::Ellipse,
                kernel_size: 5,
                iterations: 6,
                area_range: (0.0, 1250.0),
            },
            basket: ElementProfile {
                roi: basket_roi,
                op: MorphOp::Erode,
                kernel: KernelShape::Rect,
                kernel_size: 5,
                iterations: 1,
                area_range: (700.0, 900.0),
            },
            digits_roi: Roi::new(0, 202, 200, 275),
            failure_roi: Roi::new(0, 202, 150, 200),
            ball_grid: GridSpec::new(ball_roi, 7, 1),
            basket_grid: GridSpec::new(basket_roi, 9, 9),
        }
    }
}
