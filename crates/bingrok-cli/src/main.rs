mod cli;
mod cli_utils;
mod commands;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use bingrok_core::{Diagnostics, NoDiagnostics, TracingDiagnostics};
use clap::Parser;
use cli::{Args, Mode};
use commands::Outcome;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // RUST_LOG wins; otherwise warn, or trace with --verbose
    let default_filter = if args.verbose {
        "bingrok=trace,bingrok_core=trace"
    } else {
        "bingrok=warn,bingrok_core=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let outcome = if args.verbose {
        run(&args, &mut TracingDiagnostics)?
    } else {
        run(&args, &mut NoDiagnostics)?
    };

    Ok(outcome.exit_code())
}

fn run<D: Diagnostics>(args: &Args, diagnostics: &mut D) -> Result<Outcome> {
    let mode = args.mode()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match mode {
        Mode::Search(request, layout) => {
            commands::search::run(&args.filepath, &request, &layout, diagnostics, &mut out)
        }
        Mode::Unpack(request) => {
            commands::unpack::run(&args.filepath, &request, diagnostics, &mut out)
        }
        Mode::Dump(request, layout) => {
            commands::dump::run(&args.filepath, &request, &layout, diagnostics, &mut out)
        }
    }?;

    out.flush()?;
    Ok(outcome)
}
