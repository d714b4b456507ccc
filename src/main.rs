//! Pokedex - A command-line PokeAPI client
//!
//! Reads commands from stdin; responses are cached in memory for the
//! configured TTL.

use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex_cache::{repl, Cli, Config, Fetcher, HttpUpstream, PokeApi, ResponseCache, Session};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Parse command-line flags
/// 2. Initialize tracing subscriber for logging (stderr)
/// 3. Load configuration from environment variables, apply flag overrides
/// 4. Create the response cache and start its background sweep
/// 5. Build the HTTP upstream, fetcher and API client
/// 6. Run the REPL until `exit` or end of input
/// 7. Stop the sweep task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Defaults to "warn" so logs stay out of the prompt; RUST_LOG overrides
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex_cache=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env().with_cli(&cli);
    info!(
        "Configuration loaded: ttl={}s, sweep_interval={}ms, max_entries={:?}, refresh_policy={}, api_base={}",
        config.cache_ttl_secs,
        config.sweep_interval_ms,
        config.max_entries,
        config.refresh_policy,
        config.api_base
    );

    let (cache, sweeper) = ResponseCache::from_config(&config).spawn(config.sweep_interval());
    info!("Response cache initialized");

    let upstream =
        HttpUpstream::new(config.http_timeout()).context("Failed to build HTTP client")?;
    let fetcher = Fetcher::new(cache, Arc::new(upstream));
    let mut session = Session::new(PokeApi::new(fetcher, config.api_base.clone()));

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();
    let result = repl::run(&mut session, stdin, &mut stdout).await;

    sweeper.stop().await;
    info!("Pokedex shutdown complete");

    result.context("Terminal I/O failed")
}
