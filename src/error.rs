//! Error types for the Pokedex client
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; every failure surfaces at the fetcher or the command layer.

use thiserror::Error;

// == Fetch Error Enum ==
/// Failure to obtain or interpret an upstream resource.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Upstream reported the resource does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The retrieval attempt itself failed; safe to retry
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Retrieved bytes did not have the expected structure
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

// == Command Error Enum ==
/// Failure of a single REPL command. Never ends the session.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Wrong number or shape of arguments
    #[error("Invalid arguments for {command}; usage: {usage}")]
    Usage {
        command: &'static str,
        usage: &'static str,
    },

    /// No command with that name
    #[error("Invalid command: {0}")]
    UnknownCommand(String),

    /// The command's fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Writing command output failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages_are_distinct() {
        let url = "https://pokeapi.co/api/v2/pokemon/missingno";
        let messages = [
            FetchError::NotFound(url.to_string()).to_string(),
            FetchError::Transport("connection refused".to_string()).to_string(),
            FetchError::MalformedPayload("expected value".to_string()).to_string(),
        ];

        assert!(messages[0].starts_with("Resource not found"));
        assert!(messages[1].starts_with("Transport failure"));
        assert!(messages[2].starts_with("Malformed payload"));
    }

    #[test]
    fn test_command_error_wraps_fetch_error() {
        let err: CommandError = FetchError::NotFound("area".to_string()).into();
        assert_eq!(err.to_string(), "Resource not found: area");
    }

    #[test]
    fn test_usage_message() {
        let err = CommandError::Usage {
            command: "explore",
            usage: "explore <area_name>",
        };
        assert_eq!(
            err.to_string(),
            "Invalid arguments for explore; usage: explore <area_name>"
        );
    }
}
