//! REPL Module
//!
//! Interactive command loop over the PokeAPI client.
//!
//! Each command maps to at most one fetch plus local bookkeeping (listing
//! cursors, the caught collection). A failing command prints an error and the
//! loop carries on; only `exit` or end of input stops it.

pub mod commands;
pub mod session;

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::error::CommandError;

pub use commands::{Command, CommandSpec, COMMANDS};
pub use session::{Flow, Pagination, Session, CATCH_ROLL_MAX};

/// Prompt printed before each line is read.
pub const PROMPT: &str = "Pokedex > ";

/// Reads commands from `input` until `exit` or end of input.
///
/// Only a failure to read input or write output ends the loop with an error.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            info!("End of input, leaving REPL");
            return Ok(());
        };

        match session.execute_line(&line, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(CommandError::UnknownCommand(command)) => {
                writeln!(out, "Invalid command: {}", command)?;
                writeln!(out, "Use 'help' for more information")?;
            }
            Err(CommandError::Io(err)) => return Err(err),
            Err(err) => writeln!(out, "Error: {}", err)?,
        }
    }
}
