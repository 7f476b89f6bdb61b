//! Light device adapters

use std::process::ExitStatus;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{self, Color};

mod blink1;
pub use blink1::Blink1Tool;

mod dummy;
pub use dummy::DummyDevice;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{tool} exited with {status}")]
    ExitStatus { tool: String, status: ExitStatus },
    #[error("format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// A light that can be switched on with a color, and off
///
/// Both calls are assumed to take a fixed amount of time, which is accounted for by the
/// emitter schedule. Errors are reported to the caller but do not affect the schedule.
#[async_trait]
pub trait Device: Send {
    /// Turn the light on with the given color
    async fn on(&mut self, color: Color) -> Result<(), DeviceError>;

    /// Turn the light off
    async fn off(&mut self) -> Result<(), DeviceError>;
}

#[async_trait]
impl<D: Device + ?Sized> Device for Box<D> {
    async fn on(&mut self, color: Color) -> Result<(), DeviceError> {
        (**self).on(color).await
    }

    async fn off(&mut self) -> Result<(), DeviceError> {
        (**self).off().await
    }
}

/// Build the device for the given configuration
///
/// With `dry_run`, pulses are written to the log instead of the blink(1).
#[instrument(skip(config))]
pub fn from_config(config: &models::Device, dry_run: bool) -> Box<dyn Device> {
    if dry_run {
        Box::new(DummyDevice::new(config.dry_run_mode))
    } else {
        Box::new(Blink1Tool::new(config))
    }
}
