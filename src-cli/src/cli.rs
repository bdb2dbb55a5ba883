use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Numscope - phone number intelligence reports
#[derive(Parser, Debug)]
#[command(name = "numscope", version, about = "Phone number intelligence reports")]
pub struct Cli {
    /// Configuration file path
    #[arg(long, global = true, env = "NUMSCOPE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a number and request an intelligence report
    Scan {
        /// Number in international format, e.g. +6281234567890
        number: String,
        /// API key to use ahead of every other source
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
    },
    /// Only validate and normalize a number
    Validate {
        number: String,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
    },
    /// Print the effective configuration with secrets redacted
    Config,
}
