//! Morse signal emission
//!
//! Emission is split in two passes: [EmissionPlan::build] turns the symbols into a fixed
//! schedule of device calls and pauses, then [Emitter::run] plays that schedule on a
//! [Device]. The schedule never depends on the outcome of device calls.

use crate::device::Device;

mod plan;
pub use plan::{EmissionPlan, Pause, Step};

#[cfg(test)]
mod tests;

/// Outcome of an emission run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub pulses: usize,
    pub device_calls: usize,
    pub failed_calls: usize,
}

pub struct Emitter<D> {
    device: D,
}

impl<D: Device> Emitter<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    pub fn into_inner(self) -> D {
        self.device
    }

    /// Play `plan` on the device, sequentially
    ///
    /// Failed device calls are logged and counted, and the schedule continues.
    #[instrument(skip(self, plan), fields(pulses = plan.pulses()))]
    pub async fn run(&mut self, plan: &EmissionPlan) -> Summary {
        let mut summary = Summary::default();

        for step in plan.steps() {
            let result = match *step {
                Step::On { color, mark } => {
                    debug!(color = %crate::color::to_hex(color), %mark, "on");
                    summary.pulses += 1;
                    self.device.on(color).await
                }
                Step::Off => self.device.off().await,
                Step::Pause { pause, duration } => {
                    if !duration.is_zero() {
                        trace!(%pause, ?duration, "pause");
                        tokio::time::sleep(duration).await;
                    }

                    continue;
                }
            };

            summary.device_calls += 1;

            if let Err(error) = result {
                summary.failed_calls += 1;
                warn!(error = %error, "device call failed");
            }
        }

        summary
    }
}

impl<D> std::fmt::Debug for Emitter<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter").finish()
    }
}
