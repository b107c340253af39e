// src/main.rs
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;

use eyewidth::eye::EyeHistogramFile;
use eyewidth::filter::{create_filter, StreamDescriptor, Waveform, END_VOLTAGE, START_VOLTAGE};

/// Measure the horizontal eye opening of an eye histogram over a voltage band.
#[derive(Parser, Debug)]
#[command(name = "eyewidth", about = "Eye width across a voltage band, printed as JSON")]
struct Cli {
    /// Eye histogram JSON file.
    histogram: PathBuf,

    /// Start of the voltage band, in volts.
    #[arg(long, allow_negative_numbers = true)]
    start: Option<f32>,

    /// End of the voltage band, in volts.
    #[arg(long, allow_negative_numbers = true)]
    end: Option<f32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let path = cli.histogram.display();

    let raw = fs::read_to_string(&cli.histogram).with_context(|| format!("failed to read {path}"))?;
    let file: EyeHistogramFile =
        serde_json::from_str(&raw).with_context(|| format!("{path} is not an eye histogram"))?;
    let histogram = file.into_histogram()?;
    info!(
        "loaded {} x {} eye histogram from {path}",
        histogram.height(),
        histogram.width()
    );

    let mut filter =
        create_filter("Eye Width").ok_or_else(|| anyhow!("eye width filter is not registered"))?;
    for (name, value) in [(START_VOLTAGE, cli.start), (END_VOLTAGE, cli.end)] {
        if let (Some(value), Some(parameter)) = (value, filter.parameters_mut().get_mut(name)) {
            parameter.set_float_value(value);
        }
    }

    let input = Waveform::Eye(histogram);
    filter.refresh(&[Some(StreamDescriptor::of(&input))]);
    println!("{}", serde_json::to_string_pretty(filter.streams())?);
    Ok(())
}
