//! acctstat - usage reports from LSF accounting files.

mod commands;
mod logging;

use acctstat_cli::Args;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level(), args.log_format)?;
    commands::run(&args)
}
