//! Models Module
//!
//! Resource shapes returned by the PokeAPI, decoded from cached or freshly
//! fetched response bodies.

pub mod location;
pub mod pokemon;

pub use location::{LocationArea, LocationAreaPage, NamedResource, PokemonEncounter};
pub use pokemon::{CaughtPokemon, Pokemon, PokemonStat, PokemonType};
