//! API Module
//!
//! Typed PokeAPI endpoints on top of the cache-fronted fetcher.
//!
//! # Endpoints
//! - `GET /location-area/` - paginated list of location areas
//! - `GET /location-area/{name}` - pokemon encountered in an area
//! - `GET /pokemon/{name}` - a single pokemon

pub mod client;

pub use client::PokeApi;
