use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use tokio::time::Instant;

use super::*;
use crate::{
    device::DeviceError,
    models::Color,
    morse::{encode, Mark},
    timing::Timing,
};

const WHITE: Color = Color::new(255, 255, 255);

fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn timing() -> Timing {
    Timing::new(ms(100), ms(50))
}

fn plan(text: &str, color: Color, shift_to: Option<Color>) -> EmissionPlan {
    EmissionPlan::build(encode(text), color, shift_to, &timing())
}

fn pulse_colors(plan: &EmissionPlan) -> Vec<Color> {
    plan.steps()
        .iter()
        .filter_map(|step| match step {
            Step::On { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    On(Color),
    Off,
}

/// Records device calls with their start time, each call taking `latency`
#[derive(Clone)]
struct Recorder {
    calls: Arc<Mutex<Vec<(Duration, Call)>>>,
    start: Instant,
    latency: Duration,
    fail: bool,
}

impl Recorder {
    fn new(latency: Duration, fail: bool) -> Self {
        Self {
            calls: Default::default(),
            start: Instant::now(),
            latency,
            fail,
        }
    }

    fn calls(&self) -> Vec<(Duration, Call)> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&mut self, call: Call) -> Result<(), DeviceError> {
        self.calls
            .lock()
            .unwrap()
            .push((self.start.elapsed(), call));

        tokio::time::sleep(self.latency).await;

        if self.fail {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "unplugged").into())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Device for Recorder {
    async fn on(&mut self, color: Color) -> Result<(), DeviceError> {
        self.record(Call::On(color)).await
    }

    async fn off(&mut self) -> Result<(), DeviceError> {
        self.record(Call::Off).await
    }
}

#[test]
fn plan_single_dit() {
    let plan = plan("e", WHITE, None);

    assert_eq!(plan.pulses(), 1);
    assert_eq!(
        plan.steps(),
        &[
            Step::On {
                color: WHITE,
                mark: Mark::Dit
            },
            Step::Pause {
                pause: Pause::Hold,
                duration: ms(50)
            },
            Step::Off,
            Step::Pause {
                pause: Pause::Mark,
                duration: ms(50)
            },
            Step::Pause {
                pause: Pause::Character,
                duration: ms(250)
            },
        ]
    );
}

#[test]
fn plan_dah_hold() {
    let plan = plan("t", WHITE, None);

    assert_eq!(
        plan.steps()[1],
        Step::Pause {
            pause: Pause::Hold,
            duration: ms(250)
        }
    );
}

#[test]
fn plan_word_space_between_letters() {
    let plan = plan("A B", WHITE, None);
    let steps = plan.steps();

    assert_eq!(plan.pulses(), 6);

    // A is .-, so the first letter ends with the second Off
    let first_off = steps
        .iter()
        .enumerate()
        .filter(|(_, step)| **step == Step::Off)
        .nth(1)
        .map(|(i, _)| i)
        .unwrap();
    let next_on = first_off
        + steps[first_off..]
            .iter()
            .position(|step| matches!(step, Step::On { .. }))
            .unwrap();

    let between = &steps[first_off + 1..next_on];
    assert!(between.iter().all(|step| !step.is_device_call()));

    let words: Vec<_> = between
        .iter()
        .filter(|step| matches!(step, Step::Pause { pause: Pause::Word, .. }))
        .collect();
    assert_eq!(
        words,
        vec![&Step::Pause {
            pause: Pause::Word,
            duration: ms(400)
        }]
    );

    assert_eq!(
        steps
            .iter()
            .filter(|step| matches!(step, Step::Pause { pause: Pause::Word, .. }))
            .count(),
        1
    );
}

#[test]
fn plan_empty_text() {
    let plan = plan("###", WHITE, Some(Color::new(0, 0, 0)));

    assert!(plan.is_empty());
    assert_eq!(plan.pulses(), 0);
    assert_eq!(plan.estimated_duration(&timing()), Duration::ZERO);
}

#[test]
fn plan_fixed_color() {
    let red = Color::new(255, 0, 0);
    let plan = plan("hello world", red, None);

    assert!(pulse_colors(&plan).iter().all(|&color| color == red));
}

#[test]
fn plan_color_shift_reaches_target() {
    // 9 pulses, 8 steps of 2
    let plan = plan("SOS", Color::new(0, 0, 0), Some(Color::new(16, 0, 0)));
    let reds: Vec<_> = pulse_colors(&plan).iter().map(|color| color.red).collect();

    assert_eq!(reds, vec![0, 2, 4, 6, 8, 10, 12, 14, 16]);
}

#[test]
fn plan_color_shift_ignores_word_spaces() {
    let base = Color::new(200, 0, 0);
    let target = Color::new(0, 0, 200);
    let plan = plan("E E", base, Some(target));

    assert_eq!(pulse_colors(&plan), vec![base, target]);
}

#[test]
fn plan_color_shift_overshoots() {
    // 7 pulses: 11 / 6 rounds to 2 and the last pulse goes past the target
    let plan = plan("HS", Color::new(0, 0, 0), Some(Color::new(11, 0, 0)));
    let reds: Vec<_> = pulse_colors(&plan).iter().map(|color| color.red).collect();

    assert_eq!(reds, vec![0, 2, 4, 6, 8, 10, 12]);
}

#[test]
fn plan_estimated_duration() {
    assert_eq!(plan("e", WHITE, None).estimated_duration(&timing()), ms(450));
    // 450 + 200 for the extra hold of a dah
    assert_eq!(plan("t", WHITE, None).estimated_duration(&timing()), ms(650));
    assert_eq!(plan(" ", WHITE, None).estimated_duration(&timing()), ms(400));
}

#[tokio::test(start_paused = true)]
async fn run_compensates_device_latency() {
    let recorder = Recorder::new(ms(50), false);
    let plan = plan("et", WHITE, None);
    let start = Instant::now();

    let summary = Emitter::new(recorder.clone()).run(&plan).await;

    assert_eq!(
        summary,
        Summary {
            pulses: 2,
            device_calls: 4,
            failed_calls: 0
        }
    );

    let calls = recorder.calls();
    assert_eq!(
        calls,
        vec![
            (ms(0), Call::On(WHITE)),
            (ms(100), Call::Off),
            (ms(450), Call::On(WHITE)),
            (ms(750), Call::Off),
        ]
    );

    assert_eq!(start.elapsed(), plan.estimated_duration(&timing()));
}

#[tokio::test(start_paused = true)]
async fn run_keeps_mark_spacing_within_character() {
    let recorder = Recorder::new(ms(50), false);
    let plan = plan("s", WHITE, None);

    Emitter::new(recorder.clone()).run(&plan).await;

    let times: Vec<_> = recorder.calls().into_iter().map(|(time, _)| time).collect();
    // on/off every unit
    assert_eq!(
        times,
        vec![ms(0), ms(100), ms(200), ms(300), ms(400), ms(500)]
    );
}

#[tokio::test(start_paused = true)]
async fn run_continues_after_device_failures() {
    let recorder = Recorder::new(ms(50), true);
    let plan = plan("SOS", WHITE, None);
    let start = Instant::now();

    let summary = Emitter::new(recorder.clone()).run(&plan).await;

    assert_eq!(summary.pulses, 9);
    assert_eq!(summary.device_calls, 18);
    assert_eq!(summary.failed_calls, 18);
    assert_eq!(recorder.calls().len(), 18);
    assert_eq!(start.elapsed(), plan.estimated_duration(&timing()));
}

#[tokio::test(start_paused = true)]
async fn run_word_space_has_no_device_call() {
    let recorder = Recorder::new(ms(50), false);
    let plan = plan("e e", WHITE, None);

    Emitter::new(recorder.clone()).run(&plan).await;

    let calls = recorder.calls();
    assert_eq!(calls.len(), 4);
    // off at 100, then 50 latency, 50 mark gap, 250 character gap and 400 word gap
    assert_eq!(calls[2], (ms(850), Call::On(WHITE)));
}

#[tokio::test(start_paused = true)]
async fn run_shifted_colors_in_order() {
    let recorder = Recorder::new(Duration::ZERO, false);
    let plan = plan("ee", Color::new(0, 0, 0), Some(Color::new(0, 100, 0)));

    Emitter::new(recorder.clone()).run(&plan).await;

    let ons: Vec<_> = recorder
        .calls()
        .into_iter()
        .filter_map(|(_, call)| match call {
            Call::On(color) => Some(color),
            Call::Off => None,
        })
        .collect();
    assert_eq!(ons, vec![Color::new(0, 0, 0), Color::new(0, 100, 0)]);
}

#[tokio::test(start_paused = true)]
async fn run_empty_plan() {
    let recorder = Recorder::new(ms(50), false);
    let summary = Emitter::new(recorder.clone()).run(&EmissionPlan::default()).await;

    assert_eq!(summary, Summary::default());
    assert!(recorder.calls().is_empty());
}
