//! REPL session state and command execution.

use std::collections::BTreeMap;
use std::io::Write;

use rand::Rng;
use tracing::debug;

use crate::api::PokeApi;
use crate::error::CommandError;
use crate::models::{CaughtPokemon, LocationAreaPage};
use crate::repl::commands::{usage_error, Command, COMMANDS};

/// Upper bound (exclusive) of a catch roll.
pub const CATCH_ROLL_MAX: u32 = 700;

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// == Pagination ==
/// Cursor state of the location-area listing.
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    pub next: Option<String>,
    pub previous: Option<String>,
    /// Set once any page has been shown
    pub started: bool,
}

impl Pagination {
    fn update(&mut self, page: &LocationAreaPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
        self.started = true;
    }
}

type Roller = Box<dyn FnMut() -> u32 + Send>;

// == Session ==
/// Everything one interactive session owns: the API client, listing cursors
/// and the caught collection.
pub struct Session {
    api: PokeApi,
    pagination: Pagination,
    pokedex: BTreeMap<String, CaughtPokemon>,
    roll: Roller,
}

impl Session {
    pub fn new(api: PokeApi) -> Self {
        Self {
            api,
            pagination: Pagination::default(),
            pokedex: BTreeMap::new(),
            roll: Box::new(|| rand::thread_rng().gen_range(0..CATCH_ROLL_MAX)),
        }
    }

    /// Replaces the catch roll, for deterministic catches.
    pub fn with_roll(mut self, roll: impl FnMut() -> u32 + Send + 'static) -> Self {
        self.roll = Box::new(roll);
        self
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn pokedex(&self) -> &BTreeMap<String, CaughtPokemon> {
        &self.pokedex
    }

    /// Parses and runs one input line, writing its output to `out`.
    pub async fn execute_line<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> Result<Flow, CommandError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command, out).await,
            None => Ok(Flow::Continue),
        }
    }

    /// Runs one parsed command.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Flow, CommandError> {
        debug!(?command, "Executing command");
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map_forward(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
            Command::Cache => self.cache_stats(out).await?,
        }
        Ok(Flow::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for spec in COMMANDS {
            writeln!(out, "{}: {}", spec.usage, spec.description)?;
        }
        Ok(())
    }

    async fn map_forward<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        if self.pagination.started && self.pagination.next.is_none() {
            writeln!(out, "you're on the last page")?;
            return Ok(());
        }
        let cursor = self.pagination.next.clone();
        self.show_page(cursor.as_deref(), out).await
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        let Some(cursor) = self.pagination.previous.clone() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };
        self.show_page(Some(&cursor), out).await
    }

    async fn show_page<W: Write>(
        &mut self,
        cursor: Option<&str>,
        out: &mut W,
    ) -> Result<(), CommandError> {
        let page = self.api.location_areas(cursor).await?;
        self.pagination.update(&page);
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<(), CommandError> {
        let area = required_name("explore", area)?;
        writeln!(out, "Exploring {}...", area)?;
        let location = self.api.explore(area).await?;

        if location.pokemon_encounters.is_empty() {
            writeln!(out, "No pokemon found")?;
            return Ok(());
        }
        writeln!(out, "Found Pokemon:")?;
        for name in location.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<(), CommandError> {
        let name = required_name("catch", name)?;
        let pokemon = self.api.pokemon(name).await?;
        writeln!(out, "Throwing a Pokeball at {}...", pokemon.name)?;

        let roll = (self.roll)();
        debug!(roll, base_experience = pokemon.base_experience(), "Catch roll");
        if roll > pokemon.base_experience() {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex
                .insert(pokemon.name.clone(), CaughtPokemon::now(pokemon));
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<(), CommandError> {
        let name = required_name("inspect", name)?;
        let Some(caught) = self.pokedex.get(&name.to_lowercase()) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        let pokemon = &caught.pokemon;
        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        writeln!(
            out,
            "Caught: {}",
            caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your Pokedex is empty")?;
            return Ok(());
        }
        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn cache_stats<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        let cache = self.api.fetcher().cache();
        let stats = cache.stats().await;
        writeln!(out, "Entries: {}", stats.total_entries)?;
        writeln!(out, "Hits: {}", stats.hits)?;
        writeln!(out, "Misses: {}", stats.misses)?;
        writeln!(out, "Hit rate: {:.1}%", stats.hit_rate() * 100.0)?;
        writeln!(out, "Swept: {}", stats.swept)?;
        writeln!(out, "TTL: {:?}", cache.ttl())?;
        if let Some(max) = cache.max_entries() {
            writeln!(out, "Evicted: {} (max {})", stats.evictions, max)?;
        }
        Ok(())
    }
}

/// Trims a command's name argument, rejecting one that is blank.
fn required_name<'a>(command: &'static str, name: &'a str) -> Result<&'a str, CommandError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(usage_error(command));
    }
    Ok(name)
}
