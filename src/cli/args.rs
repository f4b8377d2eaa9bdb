use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "batch_fanout")]
#[command(about = "Run independent work items concurrently and aggregate their results")]
#[command(version)]
pub struct Cli {
    /// Suppress per-item log lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Measure how long every URL takes to respond, all at once
    Fetch {
        /// URLs to fetch
        #[arg(required = true)]
        urls: Vec<String>,

        /// Whole-request timeout in seconds (connect + body)
        #[arg(long)]
        timeout: Option<f64>,

        /// Per-task timeout in seconds
        #[arg(long)]
        task_timeout: Option<f64>,

        /// User-Agent header to send
        #[arg(long)]
        user_agent: Option<String>,
    },

    /// Verify content signatures listed in a JSON manifest
    Validate {
        /// Manifest file: [{"name", "signature", "content" | "path"}]
        manifest: PathBuf,

        /// Digest algorithm used for the signatures
        #[arg(short = 'a', long, value_enum, default_value = "sha1")]
        algorithm: DigestAlgorithm,

        /// Per-task timeout in seconds
        #[arg(long)]
        task_timeout: Option<f64>,

        /// Print the matched/mismatched lists as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
}
