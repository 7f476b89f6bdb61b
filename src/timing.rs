//! Morse timing with device latency compensation

use std::time::Duration;

use crate::{models, morse::Mark};

/// Durations of the Morse elements for a given base unit
///
/// Every pause of the schedule, except word spaces, directly follows a device call which is
/// assumed to take `latency`. [Timing::sleep_for] removes that latency from the requested
/// interval so the wall-clock time matches the Morse timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    unit: Duration,
    latency: Duration,
}

impl Timing {
    pub fn new(unit: Duration, latency: Duration) -> Self {
        Self { unit, latency }
    }

    pub fn unit(&self) -> Duration {
        self.unit
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Time the light stays on for a mark
    pub fn pulse_duration(&self, mark: Mark) -> Duration {
        match mark {
            Mark::Dit => self.unit,
            Mark::Dah => self.unit * 3,
        }
    }

    /// Gap between two marks of the same character
    pub fn post_pulse_wait(&self) -> Duration {
        self.unit
    }

    /// Gap added after the last mark of a character
    pub fn character_wait(&self) -> Duration {
        self.unit * 3
    }

    /// Gap for a word space
    ///
    /// No device call precedes it, so the latency is added back before compensation.
    pub fn word_wait(&self) -> Duration {
        self.unit * 4 + self.latency
    }

    /// Actual sleep needed to cover `target` after a device call
    pub fn sleep_for(&self, target: Duration) -> Duration {
        target.saturating_sub(self.latency)
    }
}

impl Default for Timing {
    fn default() -> Self {
        (&models::Timing::default()).into()
    }
}

impl From<&models::Timing> for Timing {
    fn from(config: &models::Timing) -> Self {
        Self::new(config.unit(), config.latency())
    }
}
