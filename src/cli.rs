use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dcm-harvest",
    version,
    about = "Clone repositories, run Dart Code Metrics on each, and collect the results as CSV"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Pretty-print JSON output (default: compact)
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze every repository in the list and write results.csv
    Run {
        /// File with one repository URL per line
        #[arg(short, long, default_value = "repositories.txt")]
        repos: PathBuf,

        /// Directory receiving the workspace and results.csv (default: current directory)
        #[arg(short = 'd', long, default_value = ".")]
        results_dir: PathBuf,

        /// CSV output path (default: <results-dir>/results.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep cloned checkouts; a later run reuses them instead of cloning
        #[arg(long)]
        keep_workspace: bool,
    },

    /// Parse a saved analyzer report and print the extracted metrics
    Parse {
        /// Report file (default: stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the analyzer options written into each repository
    Options,

    /// Check that the clone client and the analyzer can be launched
    Doctor,

    /// Generate default configuration file
    Init {
        /// Path to write the configuration file (default: ~/.config/dcm-harvest/config.toml)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}
