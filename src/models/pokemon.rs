//! Pokemon DTOs
//!
//! The subset of `GET /pokemon/{name}` the client displays, plus the record
//! kept for each pokemon the user catches.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::NamedResource;

#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Some forms report `null`; treated as zero
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

impl Pokemon {
    pub fn base_experience(&self) -> u32 {
        self.base_experience.unwrap_or(0)
    }
}

// == Caught Pokemon ==
/// A pokemon in the user's collection.
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

impl CaughtPokemon {
    /// Records a catch at the current time.
    pub fn now(pokemon: Pokemon) -> Self {
        Self {
            pokemon,
            caught_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pokemon_decodes_stats_and_types() {
        let body = r#"{
            "id": 25,
            "name": "pikachu",
            "base_experience": 112,
            "height": 4,
            "weight": 60,
            "stats": [
                {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/"}}
            ],
            "types": [
                {"slot": 1, "type": {"name": "electric", "url": "https://pokeapi.co/api/v2/type/13/"}}
            ],
            "moves": []
        }"#;

        let pokemon: Pokemon = serde_json::from_str(body).unwrap();
        assert_eq!(pokemon.name, "pikachu");
        assert_eq!(pokemon.base_experience(), 112);
        assert_eq!(pokemon.stats[0].stat.name, "hp");
        assert_eq!(pokemon.types[0].kind.name, "electric");
    }

    #[test]
    fn test_null_base_experience_is_zero() {
        let body = r#"{"id": 10001, "name": "deoxys-attack", "base_experience": null}"#;

        let pokemon: Pokemon = serde_json::from_str(body).unwrap();
        assert_eq!(pokemon.base_experience(), 0);
        assert!(pokemon.stats.is_empty());
    }
}
