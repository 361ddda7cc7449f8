//! trapgend - Platform Trap Generator
//!
//! Reads one trap envelope (file or stdin) and writes the generated traps
//! to stdout. Logs go to stderr.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sonic_trapgend::tables::TRAPGEND_CONFIG_FILE;
use sonic_trapgend::{parse_envelope_reader, render_output, TrapEngine, TrapGenConfig, TrapGenError};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

/// SONiC platform trap generator
#[derive(Parser, Debug)]
#[command(name = "trapgend")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short = 'c', long, default_value = TRAPGEND_CONFIG_FILE)]
    config: PathBuf,

    /// Envelope to read ("-" for stdin)
    #[arg(short = 'i', long, default_value = "-")]
    input: String,

    /// Pretty-print the output
    #[arg(short = 'p', long)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

fn init_logging(log_level: &str, format: LogFormat) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let layer = fmt::layer().with_writer(io::stderr).with_target(true);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .init(),
    }
}

/// Exit status for a bad envelope from the host.
const EXIT_BAD_INPUT: u8 = 2;

/// Malformed input gets its own exit status so the host can tell it apart
/// from local configuration or IO failures.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<TrapGenError>() {
        Some(e) if e.is_input_error() => ExitCode::from(EXIT_BAD_INPUT),
        _ => ExitCode::FAILURE,
    }
}

fn run(args: &Args) -> anyhow::Result<usize> {
    let config = TrapGenConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    config.validate().context("validating configuration")?;

    let engine = TrapEngine::from_config(&config);
    info!("Trap handlers: {:?}", engine.handler_names());

    let envelope = if args.input == "-" {
        parse_envelope_reader(io::stdin().lock()).context("parsing envelope from stdin")?
    } else {
        let file = File::open(&args.input).with_context(|| format!("opening {}", args.input))?;
        parse_envelope_reader(BufReader::new(file))
            .with_context(|| format!("parsing envelope from {}", args.input))?
    };

    let output = engine.process(&envelope);
    let text = render_output(&output, args.pretty)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text).context("writing traps")?;
    Ok(output.len())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_format);

    match run(&args) {
        Ok(count) => {
            info!("trapgend emitted {} traps", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("trapgend failed: {:#}", e);
            exit_code_for(&e)
        }
    }
}
