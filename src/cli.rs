use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::dump::{Conversion, Summary, run_conversion};

/// Arguments shared by both dump converters.
///
/// Running without any arguments reads the default dump file from the working
/// directory and prints the JSON document to stdout.
#[derive(Parser, Debug)]
#[command(version)]
pub struct DumpArgs {
    /// The dump file to convert (defaults to the converter's usual file name)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    #[arg(short = 'o', long, value_name = "FILE")]
    /// Write the JSON document to this file instead of stdout
    pub output: Option<PathBuf>,

    /// Report skipped lines and a summary on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl DumpArgs {
    pub fn input_or_default<C: Conversion>(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| PathBuf::from(C::DEFAULT_INPUT))
    }
}

/// Installs a stderr subscriber when `verbose` is set. Without it the
/// converters stay silent.
pub fn init_tracing(verbose: bool) {
    if !verbose {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,unlockdump=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Converts the chosen dump and writes the document in one go, so a failed
/// conversion never leaves partial output behind.
pub fn run<C: Conversion>(args: &DumpArgs) -> anyhow::Result<Summary> {
    let input = args.input_or_default::<C>();

    let mut document = vec![];
    let summary = run_conversion::<C, _>(&input, &mut document)?;

    match &args.output {
        Some(path) => fs::write(path, &document)
            .with_context(|| format!("Unable to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&document)
                .and_then(|_| stdout.flush())
                .context("Unable to write to stdout")?;
        }
    }

    Ok(summary)
}

/// Maps the outcome of a conversion to the process exit code, reporting a
/// fatal error on stderr.
pub fn exit_status<T>(dump_name: &str, result: anyhow::Result<T>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Unable to convert {dump_name} dump. Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
