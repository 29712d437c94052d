use std::path::PathBuf;

use clap::Parser;

/// Recommend articles based on a reading history.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the history file (a JSON array of article titles)
    pub history: PathBuf,

    /// Number of articles to return.
    /// Defaults to `default_k` from the config (10).
    #[clap(short, long, allow_negative_numbers = true)]
    pub k: Option<i64>,

    /// Path to the output file. Prints to stdout when omitted.
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose logging
    #[clap(short, long, default_value = "false")]
    pub verbose: bool,

    /// Path to the vector index (overrides `index_path` from the config)
    #[clap(short, long)]
    pub index: Option<PathBuf>,

    /// Path to a YAML config file
    #[clap(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Requested number of recommendations; non-positive values mean none.
    pub fn resolve_k(&self, default_k: usize) -> usize {
        match self.k {
            Some(k) => usize::try_from(k).unwrap_or(0),
            None => default_k,
        }
    }
}
