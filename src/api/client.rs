//! PokeAPI Client
//!
//! Builds resource addresses and decodes responses. Every call goes through
//! the `Fetcher`, so repeated requests for the same address within the cache
//! TTL are served from memory.

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

const LOCATION_AREA: &str = "location-area";
const POKEMON: &str = "pokemon";

/// Typed access to the PokeAPI resources the REPL uses.
#[derive(Clone)]
pub struct PokeApi {
    fetcher: Fetcher,
    base: String,
}

impl PokeApi {
    /// Creates a client rooted at `base` (for example `https://pokeapi.co/api/v2/`).
    pub fn new(fetcher: Fetcher, base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { fetcher, base }
    }

    /// Address of the first page of location areas.
    pub fn first_location_page(&self) -> String {
        format!("{}{}/", self.base, LOCATION_AREA)
    }

    /// Address of a named resource, e.g. `<base>/pokemon/pikachu`.
    pub fn resource_address(&self, resource: &str, name: &str) -> String {
        format!("{}{}/{}", self.base, resource, name.trim().to_lowercase())
    }

    // == Location Areas ==
    /// Fetches one page of location areas.
    ///
    /// `page` is a cursor taken from a previous page's `next`/`previous`;
    /// `None` fetches the first page.
    pub async fn location_areas(&self, page: Option<&str>) -> Result<LocationAreaPage> {
        let address = match page {
            Some(address) => address.to_string(),
            None => self.first_location_page(),
        };
        self.fetcher.fetch_json(&address).await
    }

    // == Explore ==
    /// Fetches the detail of a single location area.
    pub async fn explore(&self, area: &str) -> Result<LocationArea> {
        let address = self.resource_address(LOCATION_AREA, area);
        self.fetcher.fetch_json(&address).await
    }

    // == Pokemon ==
    /// Fetches a single pokemon by name.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let address = self.resource_address(POKEMON, name);
        self.fetcher.fetch_json(&address).await
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }
}
