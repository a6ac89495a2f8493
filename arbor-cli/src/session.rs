//! The read-command / print-tree loop.

use std::io::{BufRead, Write};

use arbor::TreeStore;

use crate::command::{Command, Flow, HELP};
use crate::error::CliError;
use crate::render;

/// Apply commands from `input` to `store` until `quit` or end of input.
///
/// The tree is printed once up front and after every command that changes
/// state. Command errors are reported on `output` and do not end the session.
pub fn run(
    store: &TreeStore<String>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<(), CliError> {
    write!(output, "{}", render::outline(&store.state(), store.current()))?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "error: {e}")?;
                continue;
            }
        };

        match command {
            Command::Help => writeln!(output, "{HELP}")?,
            command => match command.execute(store) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {
                    write!(output, "{}", render::outline(&store.state(), store.current()))?;
                }
                Err(e) => writeln!(output, "error: {e}")?,
            },
        }
        output.flush()?;
    }
    Ok(())
}
