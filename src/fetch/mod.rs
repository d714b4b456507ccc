//! Fetch Module
//!
//! Cache-transparent retrieval of upstream resources.
//!
//! # Components
//! - `Upstream`: anything that can turn a resource address into raw bytes
//! - `HttpUpstream`: the reqwest-backed implementation
//! - `Fetcher`: checks the response cache before asking the upstream

mod fetcher;
mod upstream;

pub use fetcher::Fetcher;
pub use upstream::{HttpUpstream, Upstream};
