use std::process::ExitCode;

use clap::Parser;
use unlockdump::{SkinDump, cli::DumpArgs};

fn main() -> ExitCode {
    let args = DumpArgs::parse();
    unlockdump::cli::init_tracing(args.verbose);

    unlockdump::cli::exit_status("skin", unlockdump::cli::run::<SkinDump>(&args))
}
