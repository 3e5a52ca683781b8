//! Process configuration: perception, policy, serial link, arm geometry.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hoopbot_core::PolicyConfig;
use hoopbot_cv::VisionConfig;
use serde::{Deserialize, Serialize};

/// Serial link settings for the arm controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyACM0".into(),
            baud_rate: 9600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub vision: VisionConfig,
    pub policy: PolicyConfig,
    pub serial: SerialConfig,
    /// Physical arm x coordinate for each ball grid column.
    pub column_positions: Vec<u32>,
    /// Seconds to let the machine settle after an action before trusting
    /// the next reading.
    pub settle_secs: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vision: VisionConfig::default(),
            policy: PolicyConfig::default(),
            serial: SerialConfig::default(),
            column_positions: vec![100, 220, 340, 460, 580, 700, 820],
            settle_secs: 5.0,
        }
    }
}

impl AppConfig {
    /// Load overrides from `path` when it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text =
            fs::read_to_string(path).with_context(|| format!("failed to read {path:?}"))?;
        serde_json::from_str(&text).with_context(|| format!("bad config in {path:?}"))
    }
}
