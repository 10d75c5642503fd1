//! The overlay-mosaic Command-Line Interface.
//!
//! This module is the main entry point for the CLI and orchestrates the
//! core library functions: load the config, read the input, format the
//! rows and hand them to a sink.

use std::{path::PathBuf, process};

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    cli::args::MosaicArgs,
    config::{FormatConfig, RowPolicy},
    errors::{print_error, MosaicError},
    input::InputSource,
    output::{default_output_path, write_lines, FileSink, StdoutSink},
    pipeline::format_rows,
};

pub mod args;
pub mod output;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The input held no non-blank rows; nothing was written.
    Empty,
    Written {
        path: PathBuf,
        rows: usize,
        skipped: usize,
    },
    Printed {
        rows: usize,
        skipped: usize,
    },
}

/// The main entry point for the CLI.
pub fn run() {
    let args = MosaicArgs::parse();
    init_logging(args.verbose);

    match execute(&args) {
        Ok(outcome) => output::print_outcome(&outcome),
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

/// Runs one conversion for already-parsed arguments.
pub fn execute(args: &MosaicArgs) -> Result<Outcome, MosaicError> {
    let config = resolve_config(args)?;
    let source = InputSource::read(&args.input)?;

    let raw_rows = source.rows(&config);
    if raw_rows.is_empty() {
        return Ok(Outcome::Empty);
    }

    let batch = format_rows(&raw_rows, &source, &config)?;

    let rows = batch.lines.len();
    let skipped = batch.skipped.len();

    if args.stdout {
        write_lines(&mut StdoutSink, &batch.lines)?;
        return Ok(Outcome::Printed { rows, skipped });
    }

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, &config.output_suffix));
    let mut sink = FileSink::create(&path)?;
    write_lines(&mut sink, &batch.lines)?;
    info!(destination = %sink.path().display(), rows, "wrote annotated rows");

    Ok(Outcome::Written {
        path,
        rows,
        skipped,
    })
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn resolve_config(args: &MosaicArgs) -> Result<FormatConfig, MosaicError> {
    let mut config = match &args.config {
        Some(path) => FormatConfig::load(path, args.profile)?,
        None => FormatConfig::for_profile(args.profile),
    };
    if args.skip_malformed {
        config.on_malformed_segment = RowPolicy::Skip;
    }
    Ok(config)
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
