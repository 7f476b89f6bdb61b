#[macro_use]
extern crate tracing;

use std::path::PathBuf;

use color_eyre::eyre::eyre;
use structopt::StructOpt;
use tokio::runtime::Builder;
use validator::Validate;

use morselight::{
    color,
    device,
    emitter::{EmissionPlan, Emitter},
    models::{Config, DummyDeviceMode},
    morse,
    timing::Timing,
};

/// Send text as Morse code on a blink(1)
#[derive(Debug, StructOpt)]
struct Opts {
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u32,
    /// TOML configuration file
    #[structopt(long = "config")]
    config_path: Option<PathBuf>,
    /// Print the effective configuration and exit
    #[structopt(long)]
    dump_config: bool,
    /// (Initial) color of the pulses: R,G,B, hex or color name [default: 255,255,255]
    #[structopt(short, long)]
    color: Option<String>,
    /// Shift the color of the pulses towards --target-color
    #[structopt(short, long)]
    shift: bool,
    /// Color of the last pulse when shifting [default: 255,255,255]
    #[structopt(short = "T", long)]
    target_color: Option<String>,
    /// Duration of a dit in milliseconds [default: 100]
    #[structopt(short, long)]
    time: Option<u32>,
    /// Duration of a blink1-tool call in milliseconds [default: 50]
    #[structopt(long)]
    latency: Option<u32>,
    /// Path to blink1-tool [default: blink1-tool]
    #[structopt(long)]
    tool: Option<String>,
    /// Log the pulses instead of using the blink(1)
    #[structopt(long)]
    dry_run: bool,
    /// Dry-run output: text or ansi
    #[structopt(long)]
    dry_run_mode: Option<DummyDeviceMode>,
    /// Text to send
    text: Option<String>,
}

impl Opts {
    /// Override configuration values with the ones given on the command line
    fn apply(&self, config: &mut Config) -> Result<(), color::InvalidColor> {
        if let Some(spec) = self.color.as_deref() {
            config.signal.color = color::resolve(spec)?;
        }

        if let Some(spec) = self.target_color.as_deref() {
            config.signal.target_color = color::resolve(spec)?;
        }

        if self.shift {
            config.signal.shift = true;
        }

        if let Some(unit) = self.time {
            config.timing.unit = unit;
        }

        if let Some(latency) = self.latency {
            config.timing.latency = latency;
        }

        if let Some(tool) = &self.tool {
            config.device.path = tool.clone();
        }

        if let Some(mode) = self.dry_run_mode {
            config.device.dry_run_mode = mode;
        }

        Ok(())
    }
}

async fn run(opts: Opts) -> color_eyre::eyre::Result<()> {
    // Load configuration
    let mut config = if let Some(config_path) = opts.config_path.as_deref() {
        Config::load_file(config_path).await?
    } else {
        Config::default()
    };

    // Colors are resolved here, before any device is touched
    opts.apply(&mut config)?;
    config.validate()?;

    // Dump configuration if this was asked
    if opts.dump_config {
        print!("{}", config.to_string()?);
        return Ok(());
    }

    let text = opts
        .text
        .as_deref()
        .ok_or_else(|| eyre!("no text to send, see --help for usage"))?;

    let timing = Timing::from(&config.timing);
    let plan = EmissionPlan::build(
        morse::encode(text),
        config.signal.color,
        config.signal.shift_to(),
        &timing,
    );

    if plan.is_empty() {
        warn!(%text, "no supported character to send");
        return Ok(());
    }

    info!(
        pulses = plan.pulses(),
        estimated_duration = ?plan.estimated_duration(&timing),
        "sending message"
    );

    let device = device::from_config(&config.device, opts.dry_run);
    let summary = Emitter::new(device).run(&plan).await;

    if summary.failed_calls > 0 {
        warn!(
            failed = summary.failed_calls,
            total = summary.device_calls,
            "some device calls failed"
        );
    }

    info!(pulses = summary.pulses, "message sent");
    Ok(())
}

fn install_tracing(opts: &Opts) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let fmt_layer = fmt::layer();

    let filter_layer = EnvFilter::try_from_env("MORSELIGHT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match opts.verbose {
            0 => "morselight=info",
            1 => "morselight=debug",
            _ => "morselight=trace",
        })
    });

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()
}

#[paw::main]
fn main(opts: Opts) -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;
    install_tracing(&opts)?;

    // Pulses are emitted sequentially, a single thread is enough
    let rt = Builder::new_current_thread().enable_all().build()?;
    rt.block_on(run(opts))
}
