//! Line commands understood by the CLI.

use arbor::{Direction, TreeStore, id};

use crate::error::CliError;

pub const HELP: &str = "\
commands:
  select <label>     mark a node as selected
  deselect <label>   clear a node's selection
  toggle <label>     expand or collapse a node
  current <label>    move the cursor to a node
  up | down          move the cursor over visible rows
  parent | child     move the cursor to the parent / first child
  expand | collapse  expand or collapse every node
  clear              clear the selection
  show               print the tree
  help               print this help
  quit               exit";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(String),
    Deselect(String),
    Toggle(String),
    Current(String),
    Move(Direction),
    ExpandAll,
    CollapseAll,
    ClearSelection,
    Show,
    Help,
    Quit,
}

/// Whether the session goes on after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    /// Parse one line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CliError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let label = |name: &'static str| {
            if rest.is_empty() {
                Err(CliError::MissingLabel(name))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match word.to_lowercase().as_str() {
            "select" | "s" => Self::Select(label("select")?),
            "deselect" => Self::Deselect(label("deselect")?),
            "toggle" | "t" => Self::Toggle(label("toggle")?),
            "current" | "c" => Self::Current(label("current")?),
            "up" | "k" => Self::Move(Direction::Up),
            "down" | "j" => Self::Move(Direction::Down),
            "parent" | "h" => Self::Move(Direction::Parent),
            "child" | "l" => Self::Move(Direction::FirstChild),
            "expand" => Self::ExpandAll,
            "collapse" => Self::CollapseAll,
            "clear" => Self::ClearSelection,
            "show" | "ls" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }

    /// Run the command against `store`.
    ///
    /// Labels are matched by key, the same way the store matches values.
    pub fn execute(&self, store: &TreeStore<String>) -> Result<Flow, CliError> {
        match self {
            Self::Select(label) => store.select_key(resolve(store, label)?),
            Self::Deselect(label) => store.deselect_key(resolve(store, label)?),
            Self::Toggle(label) => store.toggle_key(resolve(store, label)?),
            Self::Current(label) => {
                let key = resolve(store, label)?;
                let node = store
                    .state()
                    .find_id(&key)
                    .ok_or_else(|| CliError::NoSuchNode(label.clone()))?;
                store.set_current(node);
            }
            Self::Move(direction) => store.move_current(*direction),
            Self::ExpandAll => store.expand_all(),
            Self::CollapseAll => store.collapse_all(),
            Self::ClearSelection => store.clear_selection(),
            Self::Show | Self::Help => {}
            Self::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

/// Key for a label, if some node carries it.
fn resolve(store: &TreeStore<String>, label: &str) -> Result<String, CliError> {
    let key = id::build(label, &[]);
    if store.state().find_id(&key).is_some() {
        Ok(key)
    } else {
        Err(CliError::NoSuchNode(label.to_string()))
    }
}
