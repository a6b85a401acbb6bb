use std::path::PathBuf;

use balance_core::config::DEFAULT_CONFIG_FILE;
use clap::Parser;

/// Print the balance of a billing contract.
#[derive(Parser, Debug)]
#[command(name = "balance")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log verbosity: -v for progress, -vv for request details
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Append log output to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Session cache location (overrides `session_file` from the config)
    #[arg(long, value_name = "FILE")]
    pub session_file: Option<PathBuf>,

    /// Ignore the cached session and authenticate first
    #[arg(long)]
    pub force_refresh: bool,
}

impl Cli {
    /// Default filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "error",
            1 => "info",
            _ => "debug",
        }
    }
}
