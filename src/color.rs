//! Pulse colors and linear color shifting

use crate::models::Color;

mod resolve;
pub use resolve::{resolve, InvalidColor, InvalidColorReason};

/// Format a color the way blink1-tool expects it on its command line (`#rrggbb`)
pub fn to_hex(color: Color) -> String {
    let (r, g, b) = color.into_components();
    format!("#{}", hex::encode([r, g, b]))
}

/// Per-channel increment used to shift the pulse color towards a target
///
/// Deltas are computed once per message so that the target is (more or less) reached on the
/// last pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStep {
    target: Color,
    delta: [i16; 3],
}

impl ColorStep {
    /// Compute the step going from `base` to `target` in `pulses` pulses
    ///
    /// A channel that differs between `base` and `target` always gets a non-zero delta, even if
    /// the exact increment rounds to zero.
    pub fn new(base: Color, target: Color, pulses: usize) -> Self {
        let stops = pulses.saturating_sub(1).max(1) as f64;
        let (br, bg, bb) = base.into_components();
        let (tr, tg, tb) = target.into_components();

        let channel = |base: u8, target: u8| -> i16 {
            let diff = target as i16 - base as i16;
            let delta = (diff as f64 / stops).round_ties_even() as i16;

            if delta == 0 {
                diff.signum()
            } else {
                delta
            }
        };

        Self {
            target,
            delta: [channel(br, tr), channel(bg, tg), channel(bb, tb)],
        }
    }

    pub fn target(&self) -> Color {
        self.target
    }

    /// Signed (red, green, blue) deltas
    pub fn delta(&self) -> [i16; 3] {
        self.delta
    }

    /// Move every channel of `current` one step towards the target
    ///
    /// Channels are only clamped to the 0-255 range, never to the target value: when the delta
    /// does not divide the remaining distance, a channel steps past its target and comes back
    /// on the next call.
    pub fn advance(&self, current: Color) -> Color {
        let (cr, cg, cb) = current.into_components();
        let (tr, tg, tb) = self.target.into_components();
        let [dr, dg, db] = self.delta;

        let channel = |current: u8, target: u8, delta: i16| -> u8 {
            let current = current as i16;
            let target = target as i16;
            let delta = delta.abs();

            if current < target {
                (current + delta).min(255) as u8
            } else if current > target {
                (current - delta).max(0) as u8
            } else {
                current as u8
            }
        };

        Color::new(channel(cr, tr, dr), channel(cg, tg, dg), channel(cb, tb, db))
    }
}
