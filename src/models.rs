use std::time::Duration;

use serde_derive::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};
use thiserror::Error;
use validator::Validate;

pub type Color = palette::Srgb<u8>;

fn default_false() -> bool {
    false
}

fn default_white() -> Color {
    Color::new(255, 255, 255)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Timing {
    /// Duration of a dit, in milliseconds
    #[validate(range(min = 1))]
    pub unit: u32,
    /// Time taken by a single device call, in milliseconds
    pub latency: u32,
}

impl Timing {
    pub fn unit(&self) -> Duration {
        Duration::from_millis(self.unit as _)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency as _)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            unit: 100,
            latency: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DummyDeviceMode {
    Text,
    Ansi,
}

impl Default for DummyDeviceMode {
    fn default() -> Self {
        Self::Text
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Device {
    /// Path to the blink1-tool executable
    #[validate(length(min = 1))]
    pub path: String,
    /// Fade time passed to blink1-tool, in milliseconds
    pub fade_time: u32,
    /// Output format of the dry-run device
    pub dry_run_mode: DummyDeviceMode,
}

impl Default for Device {
    fn default() -> Self {
        Self {
            path: "blink1-tool".to_owned(),
            fade_time: 0,
            dry_run_mode: Default::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Signal {
    /// Color of the pulses, or starting color when shifting
    #[serde(default = "default_white", with = "crate::serde::color_spec")]
    pub color: Color,
    /// Color of the last pulse when shifting
    #[serde(default = "default_white", with = "crate::serde::color_spec")]
    pub target_color: Color,
    #[serde(default = "default_false")]
    pub shift: bool,
}

impl Signal {
    /// Target color if color shifting is enabled
    pub fn shift_to(&self) -> Option<Color> {
        if self.shift {
            Some(self.target_color)
        } else {
            None
        }
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self {
            color: default_white(),
            target_color: default_white(),
            shift: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[validate(nested)]
    pub timing: Timing,
    #[validate(nested)]
    pub device: Device,
    #[validate(nested)]
    pub signal: Signal,
}

impl Config {
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        use tokio::io::AsyncReadExt;

        let mut file = tokio::fs::File::open(path).await?;
        let mut full = String::new();
        file.read_to_string(&mut full).await?;

        Self::parse(&full)
    }

    pub fn to_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
