//! ucal command line calculator
//!
//! Usage: ucal [--measure] [--json] [--precision N] [EXPR...]
//!
//! Each expression given on the command line is interpreted in order.
//! Without expressions, lines are read from stdin until EOF.
//!
//! Logging goes to stderr and is controlled by RUST_LOG.

use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{error, info};
use ucal::{Engine, EngineConfig, UcalError};

/// Unit-aware calculator
///
/// Evaluates expressions such as "5km + 1mi" or "1in^2 to mm^2".
/// Reads one expression per line from stdin when no EXPR is given.
#[derive(Parser, Debug)]
#[command(name = "ucal")]
#[command(version)]
struct Cli {
    /// Append the measured quantity, e.g. "3 m [length]"
    #[arg(long)]
    measure: bool,

    /// Print one JSON object per input
    #[arg(long)]
    json: bool,

    /// Significant digits in results (default 16)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    precision: Option<u32>,

    /// Expressions to interpret, in order
    #[arg(value_name = "EXPR", allow_hyphen_values = true)]
    expressions: Vec<String>,
}

/// One line of `--json` output
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<UcalError>,
}

/// Interpret one input and print the outcome; false on error
fn run_one(engine: &mut Engine, input: &str, json: bool, out: &mut impl Write) -> io::Result<bool> {
    let outcome = engine.interpret(input);
    let ok = outcome.is_ok();

    if json {
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(e) => (None, Some(e)),
        };
        let line = serde_json::to_string(&JsonOutput { input, result, error })
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(out, "{}", line)?;
    } else {
        match outcome {
            Ok(result) => writeln!(out, "{}", result)?,
            Err(e) => eprintln!("error: {}", e.message),
        }
    }

    out.flush()?;
    Ok(ok)
}

fn run(cli: Cli) -> Result<bool, String> {
    let mut config = EngineConfig::new().with_measure(cli.measure);
    if let Some(digits) = cli.precision {
        config = config.with_output_precision(digits);
    }

    let mut engine = Engine::with_config(config).map_err(|e| e.to_string())?;
    info!(units = engine.registry().len(), "engine ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_ok = true;

    if !cli.expressions.is_empty() {
        for input in &cli.expressions {
            all_ok &= run_one(&mut engine, input, cli.json, &mut out)
                .map_err(|e| e.to_string())?;
        }
        return Ok(all_ok);
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        all_ok &= run_one(&mut engine, input, cli.json, &mut out)
            .map_err(|e| e.to_string())?;
    }

    Ok(all_ok)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(message) => {
            error!(%message, "ucal failed");
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}
