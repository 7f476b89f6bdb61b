use std::process::Stdio;

use async_trait::async_trait;

use super::{Device, DeviceError};
use crate::{
    color,
    models::{self, Color},
};

/// blink(1) USB light, driven through the `blink1-tool` executable
///
/// Every call spawns the tool and waits for it to exit.
#[derive(Debug, Clone)]
pub struct Blink1Tool {
    path: String,
    fade_time: String,
}

impl Blink1Tool {
    pub fn new(config: &models::Device) -> Self {
        Self {
            path: config.path.clone(),
            fade_time: config.fade_time.to_string(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<(), DeviceError> {
        let mut process = tokio::process::Command::new(&self.path);
        process
            .args(args)
            .args(&["-m", self.fade_time.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::null());

        trace!(path = %self.path, ?args, "spawning blink1-tool");

        let status = process.status().await?;
        if status.success() {
            Ok(())
        } else {
            Err(DeviceError::ExitStatus {
                tool: self.path.clone(),
                status,
            })
        }
    }
}

#[async_trait]
impl Device for Blink1Tool {
    async fn on(&mut self, color: Color) -> Result<(), DeviceError> {
        let rgb = color::to_hex(color);
        self.run(&["--rgb", rgb.as_str()]).await
    }

    async fn off(&mut self) -> Result<(), DeviceError> {
        self.run(&["--off"]).await
    }
}
