//! CLI argument parsing for acctstat.

use acctstat_report::BucketKey;
use camino::Utf8PathBuf;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "acctstat", version)]
#[command(about = "Usage reports from LSF accounting files")]
pub struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// Stop at the first job-finish line that fails to decode
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Log level selected by the verbosity flag.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the queue of every finished job
    Queues(InputArgs),

    /// Usage totals per queue and per user, users with the most wasted CPU time first
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Group jobs by a list of attributes and write one CSV row per group
    Buckets {
        #[command(flatten)]
        input: InputArgs,

        /// Write CSV data to this file
        #[arg(short, long)]
        output: Utf8PathBuf,

        /// Comma-separated attributes to group by, in order
        #[arg(long, value_delimiter = ',', default_values_t = BucketKey::DEFAULT.to_vec())]
        keys: Vec<BucketKey>,
    },
}

impl Command {
    pub fn input(&self) -> &InputArgs {
        match self {
            Command::Queues(input) => input,
            Command::Stats { input, .. } => input,
            Command::Buckets { input, .. } => input,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct InputArgs {
    /// Read from this lsb.acct file
    #[arg(short, long)]
    pub file: Utf8PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}
