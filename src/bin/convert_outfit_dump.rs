use std::process::ExitCode;

use clap::Parser;
use unlockdump::{OutfitDump, cli::DumpArgs};

fn main() -> ExitCode {
    let args = DumpArgs::parse();
    unlockdump::cli::init_tracing(args.verbose);

    unlockdump::cli::exit_status("outfit", unlockdump::cli::run::<OutfitDump>(&args))
}
