//! Pokedex - A command-line PokeAPI client
//!
//! Provides a REPL for browsing location areas and catching pokemon, backed by
//! an in-memory response cache with TTL expiry and a cancellable background
//! sweep.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApi;
pub use cache::{RefreshPolicy, ResponseCache};
pub use config::{Cli, Config};
pub use error::{CommandError, FetchError};
pub use fetch::{Fetcher, HttpUpstream, Upstream};
pub use repl::Session;
pub use tasks::{spawn_sweep_task, SweepHandle};
