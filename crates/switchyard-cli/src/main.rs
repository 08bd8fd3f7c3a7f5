use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use switchyard_core::impls::PrintingHandler;
use switchyard_core::{DecodeMode, Dispatcher, DispatcherConfig, SAMPLE_STREAM};

#[derive(Parser)]
#[command(
    name = "switchyard",
    version,
    about = "Decode a stream of kind-tagged JSON envelopes and dispatch each one"
)]
struct Cli {
    /// File to read envelopes from. `-` or nothing reads stdin.
    input: Option<PathBuf>,

    /// Replay the built-in three-envelope sample instead of reading INPUT.
    #[arg(long)]
    demo: bool,

    /// Reject payloads that omit a field instead of zero-filling it.
    #[arg(long, env = "SWITCHYARD_STRICT")]
    strict: bool,

    /// JSON dispatcher config, e.g. {"decode_mode": "strict"}.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print per-kind counts as JSON after a successful run.
    #[arg(long)]
    summary: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .init();
    }
}

/// Defaults, then the config file, then `--strict`.
fn load_config(cli: &Cli) -> anyhow::Result<DispatcherConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("open config {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => DispatcherConfig::default(),
    };
    if cli.strict {
        config.decode_mode = DecodeMode::Strict;
    }
    Ok(config)
}

fn open_input(cli: &Cli) -> anyhow::Result<Box<dyn Read>> {
    if cli.demo {
        return Ok(Box::new(SAMPLE_STREAM.as_bytes()));
    }
    match cli.input.as_deref() {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path == Path::new("-") => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("open input {}", path.display()))?;
            Ok(Box::new(file))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    info!(decode_mode = ?config.decode_mode, "dispatcher configured");
    let dispatcher = Dispatcher::for_commands(config)?;

    let input = BufReader::new(open_input(cli)?);
    let mut printer = PrintingHandler::new(io::stdout().lock());
    let stats = dispatcher.consume_commands(input, &mut printer)?;
    info!(handled = stats.handled, "all envelopes handled");

    let mut out = printer.into_inner();
    if cli.summary {
        serde_json::to_writer(&mut out, &stats)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_telemetry(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
