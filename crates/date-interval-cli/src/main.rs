use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use clap::{ArgAction, Parser, Subcommand};
use date_interval::{CalculationRequest, CalculatorOptions, DateIntervalCalculator};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "date-interval",
    version,
    about = "Days, weekdays, or whole weeks between two timestamps"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print the result record without the one-element array envelope
    #[arg(long, global = true)]
    bare: bool,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// IANA zone used when a request names none
    #[arg(long, global = true, value_name = "ZONE", default_value = "UTC")]
    default_time_zone: String,

    /// Log to stderr; repeat for more detail (RUST_LOG overrides)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate from command-line flags
    Calc {
        /// Start timestamp, YYYY-MM-DDTHH:MM:SS
        #[arg(long)]
        start: String,

        /// End timestamp, YYYY-MM-DDTHH:MM:SS
        #[arg(long)]
        end: String,

        /// days, weekdays, or weeks
        #[arg(long = "type", value_name = "TYPE")]
        interval_type: String,

        /// seconds, minutes, hours, or years
        #[arg(long)]
        unit: Option<String>,

        /// IANA zone the timestamps are in
        #[arg(long, value_name = "ZONE")]
        time_zone: Option<String>,
    },

    /// Calculate from a JSON request read from FILE, or stdin when omitted or "-"
    Request { file: Option<PathBuf> },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Print the response for one request. Returns whether the calculation succeeded.
fn run(cli: &Cli) -> Result<bool> {
    let default_time_zone: Tz = cli
        .default_time_zone
        .parse()
        .map_err(|_| anyhow!("unknown default time zone '{}'", cli.default_time_zone))?;

    let request = match &cli.command {
        Command::Calc {
            start,
            end,
            interval_type,
            unit,
            time_zone,
        } => {
            let mut request = CalculationRequest::new(start, end, interval_type);
            if let Some(unit) = unit {
                request = request.with_conversion_unit(unit);
            }
            if let Some(zone) = time_zone {
                request = request.with_time_zone(zone);
            }
            request
        }
        Command::Request { file } => read_request(file.as_deref())?,
    };

    let calculator = DateIntervalCalculator::with_options(CalculatorOptions { default_time_zone });
    let result = calculator.calculate(&request);
    let success = result.is_success();

    let output = if cli.bare {
        to_json(&result, cli.pretty)?
    } else {
        to_json(&result.into_envelope(), cli.pretty)?
    };
    println!("{output}");

    Ok(success)
}

fn read_request(file: Option<&Path>) -> Result<CalculationRequest> {
    let input = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    tracing::debug!(bytes = input.len(), "request read");
    serde_json::from_str(&input).context("invalid request JSON")
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
