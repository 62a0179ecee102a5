//! Application configuration from CLI flags and environment.

use clap::Parser;

use chudpi_core::constants::{PARALLEL_RANGE_THRESHOLD, SPLIT_RATIO};

/// chudpi: compute digits of pi with the Chudnovsky series.
#[derive(Parser, Debug)]
#[command(name = "chudpi", version, about)]
pub struct AppConfig {
    /// Number of significant digits of pi to compute.
    #[arg(short = 'n', long, default_value_t = 100, env = "CHUDPI_DIGITS")]
    pub digits: u64,

    /// Thread budget (0 = all available cores).
    #[arg(short, long, default_value_t = 1, env = "CHUDPI_THREADS")]
    pub threads: usize,

    /// Float backend for the finishing step: native, gmp, or all.
    #[arg(long, default_value = "native")]
    pub backend: String,

    /// Calculate and display the digits.
    #[arg(short, long)]
    pub calculate: bool,

    /// Verbose output (full digit string, progress logging).
    #[arg(short, long)]
    pub verbose: bool,

    /// Show detailed information.
    #[arg(short, long)]
    pub details: bool,

    /// Output file path.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Quiet mode (only output the digits).
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Show a progress bar on stderr.
    #[arg(long)]
    pub progress: bool,

    /// Memory limit (e.g., "8G", "512M").
    #[arg(long, default_value = "")]
    pub memory_limit: String,

    /// Fraction of each range assigned to its left half.
    #[arg(long, default_value_t = SPLIT_RATIO)]
    pub split_ratio: f64,

    /// Minimum range width in terms before fanning out.
    #[arg(long, default_value_t = PARALLEL_RANGE_THRESHOLD)]
    pub parallel_threshold: u64,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
