//! Command table and line parsing.

use crate::error::CommandError;

/// Name, usage and help text of one REPL command.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

/// Every command the REPL understands, in help order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "cache",
        usage: "cache",
        description: "Show response cache statistics",
    },
    CommandSpec {
        name: "catch",
        usage: "catch <pokemon>",
        description: "Try to catch a pokemon",
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        description: "Exit the Pokedex",
    },
    CommandSpec {
        name: "explore",
        usage: "explore <area_name>",
        description: "List the pokemon found in a location area",
    },
    CommandSpec {
        name: "help",
        usage: "help",
        description: "Display this help message",
    },
    CommandSpec {
        name: "inspect",
        usage: "inspect <pokemon>",
        description: "Show details of a caught pokemon",
    },
    CommandSpec {
        name: "map",
        usage: "map",
        description: "Display the next 20 location areas",
    },
    CommandSpec {
        name: "mapb",
        usage: "mapb",
        description: "Display the previous 20 location areas",
    },
    CommandSpec {
        name: "pokedex",
        usage: "pokedex",
        description: "List your caught pokemon",
    },
];

// == Command ==
/// A parsed REPL command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
    Cache,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let spec = COMMANDS
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| CommandError::UnknownCommand(line.trim().to_string()))?;

        let command = match (spec.name, args.as_slice()) {
            ("help", []) => Command::Help,
            ("exit", []) => Command::Exit,
            ("map", []) => Command::Map,
            ("mapb", []) => Command::MapBack,
            ("pokedex", []) => Command::Pokedex,
            ("cache", []) => Command::Cache,
            ("explore", [area]) => Command::Explore(area.to_string()),
            ("catch", [name]) => Command::Catch(name.to_string()),
            ("inspect", [name]) => Command::Inspect(name.to_string()),
            _ => {
                return Err(CommandError::Usage {
                    command: spec.name,
                    usage: spec.usage,
                })
            }
        };
        Ok(Some(command))
    }
}

/// Usage error for the named command, with its usage line from `COMMANDS`.
pub fn usage_error(command: &'static str) -> CommandError {
    let usage = COMMANDS
        .iter()
        .find(|spec| spec.name == command)
        .map_or(command, |spec| spec.usage);
    CommandError::Usage { command, usage }
}
