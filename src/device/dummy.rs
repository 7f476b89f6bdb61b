use std::fmt::Write;

use async_trait::async_trait;

use super::{Device, DeviceError};
use crate::models::{Color, DummyDeviceMode};

/// Device that writes pulses to the log, for running without hardware
#[derive(Debug)]
pub struct DummyDevice {
    mode: DummyDeviceMode,
    ansi_buf: String,
}

impl DummyDevice {
    pub fn new(mode: DummyDeviceMode) -> Self {
        Self {
            mode,
            ansi_buf: String::new(),
        }
    }

    fn render(&mut self, color: Option<Color>) -> Result<&str, DeviceError> {
        self.ansi_buf.clear();

        match (self.mode, color) {
            (DummyDeviceMode::Text, Some(color)) => {
                write!(
                    &mut self.ansi_buf,
                    "on  {:3} {:3} {:3}",
                    color.red, color.green, color.blue
                )?;
            }
            (DummyDeviceMode::Text, None) => {
                write!(&mut self.ansi_buf, "off")?;
            }
            (DummyDeviceMode::Ansi, Some(color)) => {
                // Truecolor block, then reset
                write!(
                    &mut self.ansi_buf,
                    "\x1B[38;2;{red};{green};{blue}m█\x1B[0m",
                    red = color.red,
                    green = color.green,
                    blue = color.blue
                )?;
            }
            (DummyDeviceMode::Ansi, None) => {
                write!(&mut self.ansi_buf, " ")?;
            }
        }

        Ok(&self.ansi_buf)
    }
}

#[async_trait]
impl Device for DummyDevice {
    async fn on(&mut self, color: Color) -> Result<(), DeviceError> {
        info!("{}", self.render(Some(color))?);
        Ok(())
    }

    async fn off(&mut self) -> Result<(), DeviceError> {
        info!("{}", self.render(None)?);
        Ok(())
    }
}
