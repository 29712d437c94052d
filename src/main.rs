use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod vectors;

use config::Config;
use vectors::{emit_output, History, IndexStorage, RecommendationService};

/// Log to stderr so stdout only carries the recommendations.
///
/// `RUST_LOG` wins when set, otherwise `warn` (`info` with `--verbose`).
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    init_logging(args.verbose);

    let config = Config::load(args.config.as_deref()).context("failed to load config")?;
    let index_path = args.index.clone().unwrap_or_else(|| config.index_path.clone());
    let k = args.resolve_k(config.default_k);

    log::info!("Starting recommendation based on {}...", args.history.display());

    let store = IndexStorage::new(index_path.clone())
        .load()
        .with_context(|| format!("failed to load vector index {}", index_path.display()))?;

    if store.is_empty() {
        log::warn!("index {} holds no articles", index_path.display());
    }

    log::info!(
        "Loaded index: {} articles, {} terms.",
        store.len(),
        store.dimensions()
    );

    let history = History::load(&args.history).context("failed to load history")?;

    log::info!("Loaded history.");

    let recommendations = RecommendationService::new(&store)
        .recommend(history.titles(), k)
        .context("failed to rank articles")?;

    emit_output(&recommendations, args.output.as_deref())
        .context("failed to write recommendations")?;

    Ok(())
}
