//! Command-line front end: prompt, report, chart and CSV exports.

use std::io::{BufRead, Write};
use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use crate::clock::Clock;
use crate::config::{SimulationConfig, INTERACTIVE_MAX_PER_SECOND};
use crate::detector::{render_report, DDoSDetector, DEFAULT_THRESHOLD};
use crate::error::{DDoSError, Result};
use crate::generator::DEFAULT_DURATION_SECS;
use crate::presenter::{render_chart, zero_filled, ChartOptions};
use crate::random::RngCountSource;
use crate::{export, run_simulation};

pub const PROMPT: &str = "Enter the IP address to check for DDoS attack:";

#[derive(Parser, Debug)]
#[command(about = "Simulate per-IP request logs and flag minutes over a request threshold")]
pub struct Args {
    /// IP address to simulate. Prompted for when omitted.
    #[arg(long, env = "DDOS_SIM_IP")]
    ip: Option<String>,

    #[arg(
        long,
        env = "DDOS_SIM_DURATION",
        default_value_t = DEFAULT_DURATION_SECS as i64,
        allow_negative_numbers = true
    )]
    duration: i64,

    #[arg(
        long,
        env = "DDOS_SIM_MAX_PER_SECOND",
        default_value_t = INTERACTIVE_MAX_PER_SECOND,
        allow_negative_numbers = true
    )]
    max_per_second: i64,

    /// Requests per minute above which an IP is flagged.
    #[arg(
        long,
        env = "DDOS_SIM_THRESHOLD",
        default_value_t = DEFAULT_THRESHOLD as i64,
        allow_negative_numbers = true
    )]
    threshold: i64,

    /// Seed for a reproducible request pattern.
    #[arg(long, env = "DDOS_SIM_SEED")]
    seed: Option<u64>,

    /// Plot all 60 seconds, including ones without requests.
    #[arg(long)]
    zero_fill: bool,

    #[arg(long)]
    no_chart: bool,

    /// Write per-minute bucket counts to this CSV file.
    #[arg(long, env = "DDOS_SIM_MINUTES_CSV")]
    minutes_csv: Option<PathBuf>,

    /// Write the second-of-minute series to this CSV file.
    #[arg(long, env = "DDOS_SIM_SERIES_CSV")]
    series_csv: Option<PathBuf>,
}

fn prompt_identifier<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(DDoSError::invalid("ip", "no input on stdin"));
    }
    Ok(line.trim().to_string())
}

/// Runs one simulation. Prompts on `input` when no `--ip` was given and
/// writes the report and chart to `output`.
pub fn run<R: BufRead, W: Write>(
    args: Args,
    input: &mut R,
    output: &mut W,
    clock: &dyn Clock,
) -> Result<()> {
    let identifier = match args.ip {
        Some(ip) => ip,
        None => prompt_identifier(input, output)?,
    };

    let config = SimulationConfig {
        identifier,
        duration_seconds: args.duration,
        max_per_second: args.max_per_second,
        threshold: args.threshold,
        seed: args.seed,
    }
    .validate()?;

    if config.identifier.parse::<IpAddr>().is_err() {
        let ip = &config.identifier;
        warn!("'{}' is not an IP address, simulating it anyway", ip);
    }

    let mut counts = match config.seed {
        Some(seed) => RngCountSource::seeded(seed),
        None => RngCountSource::from_entropy(),
    };

    info!(
        "Simulating {}s of traffic from {} (up to {}/s, threshold {}/min)",
        config.generator.duration_seconds,
        config.identifier,
        config.generator.max_per_second,
        config.threshold
    );
    let outcome = run_simulation(&config, clock, &mut counts);
    info!("Generated {} requests", outcome.log.len());

    writeln!(output, "{}", render_report(&outcome.detection))?;

    if let Some(path) = &args.minutes_csv {
        let detector = DDoSDetector::new(config.threshold);
        export::write_minute_counts(path, &outcome.log, &detector)?;
    }
    if let Some(path) = &args.series_csv {
        export::write_series(path, &outcome.series)?;
    }

    if !args.no_chart {
        let series = if args.zero_fill {
            zero_filled(&outcome.series)
        } else {
            outcome.series
        };
        writeln!(output)?;
        writeln!(output, "{}", render_chart(&series, &ChartOptions::default()))?;
    }

    Ok(())
}

/// Process exit status for a finished run.
pub fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
