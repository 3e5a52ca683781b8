//! Serial command channel to the arm controller.
//!
//! The firmware accepts newline-terminated ASCII. `A<action>` performs a
//! discrete throw action; a position move is three tokens in order — the
//! horizontal coordinate with a fixed trailing calibration digit, the
//! fixed vertical coordinate, and the fixed depth coordinate. Nothing is
//! read back; transport errors surface to the caller.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use hoopbot_core::Action;
use log::debug;
use serialport::SerialPort;

use crate::config::SerialConfig;

const HORIZONTAL_SUFFIX: &str = "2";
const VERTICAL_COORD: &str = "955";
const DEPTH_COORD: &str = "61";

pub struct ArmLink<W: Write> {
    channel: W,
}

impl ArmLink<Box<dyn SerialPort>> {
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let channel = serialport::new(&config.port, config.baud_rate)
            .timeout(Duration::from_secs(1))
            .open()
            .with_context(|| format!("failed to open serial port {}", config.port))?;
        debug!("serial link up on {}", config.port);
        Ok(Self { channel })
    }
}

impl<W: Write> ArmLink<W> {
    pub fn from_writer(channel: W) -> Self {
        Self { channel }
    }

    /// Perform a discrete throw action.
    pub fn send_action(&mut self, action: Action) -> Result<()> {
        debug!("sending action {}", action.id());
        writeln!(self.channel, "A{}", action.id()).context("action write failed")?;
        Ok(())
    }

    /// Drive the arm to a horizontal position; vertical and depth are fixed
    /// by the cabinet geometry.
    pub fn send_position(&mut self, x: u32) -> Result<()> {
        debug!("sending arm x coordinate {x}");
        writeln!(self.channel, "{x}{HORIZONTAL_SUFFIX}").context("position write failed")?;
        writeln!(self.channel, "{VERTICAL_COORD}").context("position write failed")?;
        writeln!(self.channel, "{DEPTH_COORD}").context("position write failed")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_command_is_one_terminated_line() {
        let mut link = ArmLink::from_writer(Vec::new());
        link.send_action(Action::from_id(3)).unwrap();
        assert_eq!(link.channel, b"A3\n");
    }

    #[test]
    fn position_command_orders_its_three_tokens() {
        let mut link = ArmLink::from_writer(Vec::new());
        link.send_position(455).unwrap();
        assert_eq!(link.channel, b"4552\n955\n61\n");
    }
}
