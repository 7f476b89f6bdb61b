use std::time::Duration;

use parse_display::Display;

use crate::{
    color::ColorStep,
    models::Color,
    morse::{self, Mark, Symbol},
    timing::Timing,
};

/// Kind of idle time in an emission plan
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
#[display(style = "snake_case")]
pub enum Pause {
    /// Light is on, holding a mark
    Hold,
    /// Gap after a mark
    Mark,
    /// Gap after the last mark of a character
    Character,
    /// Word space
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    On { color: Color, mark: Mark },
    Off,
    Pause { pause: Pause, duration: Duration },
}

impl Step {
    pub fn is_device_call(&self) -> bool {
        matches!(self, Self::On { .. } | Self::Off)
    }
}

/// Timed sequence of device calls for a message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmissionPlan {
    steps: Vec<Step>,
    pulses: usize,
}

struct Builder<'t> {
    timing: &'t Timing,
    color: Color,
    shift: Option<ColorStep>,
    blinks: usize,
    steps: Vec<Step>,
}

impl Builder<'_> {
    fn pause(&mut self, pause: Pause, target: Duration) {
        self.steps.push(Step::Pause {
            pause,
            duration: self.timing.sleep_for(target),
        });
    }

    fn mark(&mut self, mark: Mark) {
        if let Some(step) = &self.shift {
            if self.blinks > 0 {
                self.color = step.advance(self.color);
            }
        }

        self.steps.push(Step::On {
            color: self.color,
            mark,
        });
        self.pause(Pause::Hold, self.timing.pulse_duration(mark));
        self.steps.push(Step::Off);
        self.pause(Pause::Mark, self.timing.post_pulse_wait());

        self.blinks += 1;
    }

    fn symbol(&mut self, symbol: Symbol) {
        match symbol {
            Symbol::WordSpace => {
                trace!("word space");
                self.pause(Pause::Word, self.timing.word_wait());
            }
            Symbol::Character(pattern) => {
                trace!(%pattern, "character");
                for mark in pattern.marks() {
                    self.mark(mark);
                }
                self.pause(Pause::Character, self.timing.character_wait());
            }
        }
    }
}

impl EmissionPlan {
    /// Build the plan for a symbol sequence
    ///
    /// Pulses use `color`. With `shift_to`, the color of each pulse after the first one moves
    /// one [ColorStep] towards the target, the step being sized for the whole message.
    pub fn build<I>(symbols: I, color: Color, shift_to: Option<Color>, timing: &Timing) -> Self
    where
        I: IntoIterator<Item = Symbol>,
        I::IntoIter: Clone,
    {
        let symbols = symbols.into_iter();
        let pulses = morse::count_marks(symbols.clone());
        let shift = shift_to.map(|target| ColorStep::new(color, target, pulses));

        if let Some(step) = &shift {
            debug!(pulses, delta = ?step.delta(), "computed color step");
        }

        let mut builder = Builder {
            timing,
            color,
            shift,
            blinks: 0,
            steps: Vec::with_capacity(pulses * 4),
        };

        for symbol in symbols {
            builder.symbol(symbol);
        }

        Self {
            steps: builder.steps,
            pulses,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of light pulses
    pub fn pulses(&self) -> usize {
        self.pulses
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Expected wall-clock duration, assuming every device call takes the configured latency
    pub fn estimated_duration(&self, timing: &Timing) -> Duration {
        self.steps
            .iter()
            .map(|step| match step {
                Step::On { .. } | Step::Off => timing.latency(),
                Step::Pause { duration, .. } => *duration,
            })
            .sum()
    }
}
