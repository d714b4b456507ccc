//! Configuration Module
//!
//! Handles loading client configuration from environment variables, with
//! command-line flags layered on top.

use std::env;
use std::time::Duration;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

use crate::cache::RefreshPolicy;

/// Base address of the public PokeAPI.
pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2/";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Time-to-live of cached responses, in seconds
    pub cache_ttl_secs: u64,
    /// Period of the background sweep, in milliseconds
    pub sweep_interval_ms: u64,
    /// Optional capacity bound; `None` keeps the cache unbounded
    pub max_entries: Option<usize>,
    /// Behaviour of a cache write to an existing key
    pub refresh_policy: RefreshPolicy,
    /// Base address every resource URL is built from
    pub api_base: String,
    /// Upstream request timeout, in seconds
    pub http_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_TTL_SECS` - Cache TTL in seconds (default: 5)
    /// - `POKEDEX_SWEEP_INTERVAL_MS` - Sweep period in milliseconds (default: 1000)
    /// - `POKEDEX_MAX_ENTRIES` - Capacity bound (default: unbounded)
    /// - `POKEDEX_REFRESH_POLICY` - `replace` or `touch` (default: replace)
    /// - `POKEDEX_API_BASE` - API base address (default: PokeAPI v2)
    /// - `POKEDEX_HTTP_TIMEOUT_SECS` - Upstream timeout (default: 10)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl_secs: parse_env("POKEDEX_CACHE_TTL_SECS")
                .unwrap_or(defaults.cache_ttl_secs),
            sweep_interval_ms: parse_env::<u64>("POKEDEX_SWEEP_INTERVAL_MS")
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.sweep_interval_ms),
            max_entries: parse_env::<usize>("POKEDEX_MAX_ENTRIES").filter(|max| *max > 0),
            refresh_policy: parse_env("POKEDEX_REFRESH_POLICY")
                .unwrap_or(defaults.refresh_policy),
            api_base: env::var("POKEDEX_API_BASE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.api_base),
            http_timeout_secs: parse_env("POKEDEX_HTTP_TIMEOUT_SECS")
                .unwrap_or(defaults.http_timeout_secs),
        }
    }

    /// Applies command-line overrides on top of this configuration.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(ttl) = cli.ttl_secs {
            self.cache_ttl_secs = ttl;
        }
        if let Some(ms) = cli.sweep_interval_ms {
            self.sweep_interval_ms = ms;
        }
        if let Some(max) = cli.max_entries {
            self.max_entries = Some(max);
        }
        if let Some(policy) = cli.refresh_policy {
            self.refresh_policy = policy;
        }
        if let Some(base) = &cli.api_base {
            self.api_base = base.clone();
        }
        self
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 5,
            sweep_interval_ms: 1000,
            max_entries: None,
            refresh_policy: RefreshPolicy::ReplacePayload,
            api_base: DEFAULT_API_BASE.to_string(),
            http_timeout_secs: 10,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

// == Command Line ==
/// Pokedex - explore PokeAPI location areas and catch pokemon from a prompt
#[derive(Parser, Debug, Default)]
#[command(name = "pokedex")]
#[command(about = "Interactive Pokedex backed by a time-bounded response cache")]
#[command(version)]
pub struct Cli {
    /// Seconds a cached response is kept before the sweep may remove it
    #[arg(long, value_name = "SECS")]
    pub ttl_secs: Option<u64>,

    /// Milliseconds between background cache sweeps
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub sweep_interval_ms: Option<u64>,

    /// Bound the cache to this many entries (least recently added evicted first)
    #[arg(long, value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub max_entries: Option<usize>,

    /// What a repeated write to a cached key does: `replace` or `touch`
    #[arg(long, value_name = "POLICY")]
    pub refresh_policy: Option<RefreshPolicy>,

    /// Base address of the resource API
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,
}
