use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_positive_u64, parse_positive_usize};
use super::types::{OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fire a fixed number of HTTP GET requests at a URL from a bounded worker pool and report throughput, success rate, and status codes.",
    next_help_heading = "Advanced Options"
)]
pub struct LoadArgs {
    /// Target URL for the load test
    #[arg(long, short, env = "LOADGEN_URL", help_heading = "Common Options")]
    pub url: Option<String>,

    /// Total number of requests to send
    #[arg(
        long,
        short = 'n',
        env = "LOADGEN_REQUESTS",
        value_parser = parse_positive_u64,
        help_heading = "Common Options"
    )]
    pub requests: Option<PositiveU64>,

    /// Number of concurrent workers (clamped to --requests)
    #[arg(
        long,
        short = 'c',
        env = "LOADGEN_CONCURRENCY",
        value_parser = parse_positive_usize,
        help_heading = "Common Options"
    )]
    pub concurrency: Option<PositiveUsize>,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "30s",
        value_parser = parse_duration_arg,
        help_heading = "Common Options"
    )]
    pub request_timeout: Duration,

    /// Hard cap on concurrent workers, applied after clamping to --requests
    #[arg(
        long = "max-concurrency",
        default_value = "10000",
        value_parser = parse_positive_usize
    )]
    pub max_concurrency: PositiveUsize,

    /// Report format written to stdout or --output
    #[arg(long = "output-format", default_value = "text", value_enum)]
    pub output_format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<String>,

    /// Suppress the periodic progress lines
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Path to a TOML or JSON config file (defaults to ./loadgen.toml or ./loadgen.json)
    #[arg(long = "config")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}
