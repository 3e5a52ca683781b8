//! Robot brain: pull frame states, learn from each attempt, drive the arm.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use hoopbot_core::{Cell, Policy, ScoreReading};
use hoopbot_cv::{FramePump, TesseractOcr, VideoSource};
use log::info;

mod actuation;
mod config;

use actuation::ArmLink;
use config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::load_or_default(Path::new("hoopbot.json"))?;
    let source = video_source_from_args();

    let mut policy = Policy::new(config.policy.clone())?;
    let mut arm = ArmLink::open(&config.serial)?;
    let mut pump = FramePump::open(source, config.vision.clone(), Box::new(TesseractOcr::new()))?;
    info!("everything initialised");

    // First attempt: position under the ball and throw, nothing to learn yet.
    let Some((cell, _)) = next_attempt(&mut pump)? else {
        bail!("video source ended before the first ball appeared");
    };
    let mut state = cell.i as usize;
    let mut action = policy.choose_action(state);
    arm.send_position(column_position(&config, state)?)?;
    arm.send_action(action)?;

    let settle = Duration::from_secs_f64(config.settle_secs);
    loop {
        // let the cabinet settle before trusting the next reading
        thread::sleep(settle);

        let Some((cell, outcome)) = next_attempt(&mut pump)? else {
            info!("video source ended");
            break;
        };
        let previous = state;
        state = cell.i as usize;

        policy.update(previous, action, outcome)?;
        action = policy.choose_action(state);
        arm.send_position(column_position(&config, state)?)?;
        arm.send_action(action)?;
    }

    Ok(())
}

/// Advance the pump to the next frame with a ball on screen, remembering the
/// last resolved score seen on the way: the outcome of the attempt that just
/// finished.
fn next_attempt(pump: &mut FramePump) -> Result<Option<(Cell, ScoreReading)>> {
    let mut outcome = ScoreReading::Unreadable;
    for state in pump.by_ref() {
        let state = state?;
        if state.score.is_resolved() {
            outcome = state.score;
        }
        if let Some(cell) = state.ball_cell {
            return Ok(Some((cell, outcome)));
        }
    }
    Ok(None)
}

fn column_position(config: &AppConfig, state: usize) -> Result<u32> {
    config
        .column_positions
        .get(state)
        .copied()
        .with_context(|| format!("no arm position configured for ball column {state}"))
}

fn video_source_from_args() -> VideoSource {
    let arg = std::env::args().nth(1).unwrap_or_else(|| "0".to_string());
    match arg.parse::<i32>() {
        Ok(index) => VideoSource::Camera(index),
        Err(_) => VideoSource::File(PathBuf::from(arg)),
    }
}
