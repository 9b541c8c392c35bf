//! Bank teller queue simulator.
//!
//! Simulates one business day of customers arriving at a bank, waiting in a
//! single line and being served by a pool of tellers, then reports wait-time
//! statistics. Values not given as flags are prompted for on stdin.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use bank_queue::config::{parse_lambda, parse_tellers, prompt_line};
use bank_queue::{BUSINESS_DAY_MINUTES, ConfigError, Report, SimulationConfig};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Single-line, multi-teller bank queue simulation
#[derive(Parser)]
#[command(name = "bank_queue", version)]
struct Args {
    /// Average number of customers arriving per minute (prompted if omitted)
    #[arg(short, long, value_parser = parse_lambda)]
    lambda: Option<f64>,

    /// Number of tellers (prompted if omitted)
    #[arg(short, long, value_parser = parse_tellers)]
    tellers: Option<usize>,

    /// Minutes to simulate
    #[arg(long, value_name = "MINUTES", default_value_t = BUSINESS_DAY_MINUTES)]
    horizon: usize,

    /// Seed for the random source; a fresh one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Include run-summary lines in the text report
    #[arg(short, long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

/// Initialize structured logging on stderr, keeping stdout for the report
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Use the flag value if present, otherwise prompt for it.
fn resolve<T, R: BufRead, W: Write>(
    given: Option<T>,
    input: &mut R,
    output: &mut W,
    message: &str,
    field: &'static str,
    parse: fn(&str) -> Result<T, ConfigError>,
) -> Result<T> {
    if let Some(value) = given {
        return Ok(value);
    }
    let line = prompt_line(input, output, message)
        .with_context(|| format!("Failed to read {field}"))?
        .ok_or(ConfigError::MissingInput { field })?;
    Ok(parse(&line)?)
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let lambda = resolve(
        args.lambda,
        &mut input,
        &mut output,
        "Enter the average number of customers arriving per minute (lambda): ",
        "lambda",
        parse_lambda,
    )?;
    let tellers = resolve(
        args.tellers,
        &mut input,
        &mut output,
        "Enter the number of tellers: ",
        "tellers",
        parse_tellers,
    )?;

    let config = SimulationConfig::new(lambda, tellers).with_horizon(args.horizon);
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level)?;

    let config = load_config(&args).context("Invalid simulation input")?;

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    info!(seed, "seeding random source");

    let outcome = bank_queue::run(&config, StdRng::seed_from_u64(seed))
        .context("Simulation failed")?;
    let report = Report::new(config, seed, &outcome);

    let mut stdout = io::stdout().lock();
    if args.json {
        let json = report.render_json().context("Failed to serialize report")?;
        writeln!(stdout, "{json}")?;
    } else {
        writeln!(stdout)?;
        write!(stdout, "{}", report.render_text(args.verbose))?;
    }
    stdout.flush()?;

    Ok(())
}
