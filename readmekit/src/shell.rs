//! Line-oriented interactive front end
//!
//! Reads one command per line, turns it into session operations and prints
//! the resulting state. `edit` switches to multi-line input until a line
//! containing a single `.`.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::collection::Placement;
use crate::export::{self, ExportError};
use crate::session::{Operation, Session};

/// Errors raised by the interactive shell
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Expected 'before' or 'after', found '{0}'")]
    BadPlacement(String),

    #[error("No section selected")]
    NoSelection,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the section list
    List,
    /// Select a section
    Select(String),
    /// Print a section (active one by default)
    Show(Option<String>),
    /// Replace a section's content from the following lines
    Edit(Option<String>),
    /// Insert a catalog template by id
    Add(String),
    /// Create a custom section with the given title
    New(String),
    /// Delete a section
    Delete(String),
    /// Move a section relative to another
    Move { id: String, placement: Placement },
    /// Rename a section
    Rename { id: String, title: String },
    /// Reset a section's content
    Reset(String),
    /// Restore the default document
    ResetAll,
    /// Empty the document
    Clean,
    /// List addable templates matching a search term (all when omitted)
    Available(Option<String>),
    /// Print the composed document
    Preview,
    /// Write the composed document
    Save(Option<PathBuf>),
    /// Print usage
    Help,
    /// Leave the shell
    Quit,
}

const HELP: &str = "\
Commands:
  list                         show sections (> marks the active one)
  select <id>                  make a section active
  show [id]                    print a section
  edit [id]                    replace content; end input with a line containing '.'
  add <template-id>            insert a catalog template
  new <title>                  create a custom section
  delete <id>                  remove a section
  move <id> before|after <id>  reorder
  rename <id> <title>          change a section title
  reset <id>                   restore a section's default content
  reset-all                    restore the default document
  clean                        remove every section
  available [search]           list templates that can be added (all if no search)
  preview                      print the composed README
  save [path]                  write the composed README
  help                         show this message
  quit                         leave";

impl Command {
    /// Parse one input line
    ///
    /// # Returns
    /// * `Ok(None)` - Blank line
    /// * `Ok(Some(Command))` - Parsed command
    /// * `Err(ShellError)` - Unknown command or missing arguments
    pub fn parse(line: &str) -> Result<Option<Self>, ShellError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let optional = || (!rest.is_empty()).then(|| rest.to_string());

        let command = match name {
            "list" | "ls" => Command::List,
            "select" => Command::Select(required(rest, "select", "a section id")?),
            "show" => Command::Show(optional()),
            "edit" => Command::Edit(optional()),
            "add" => Command::Add(required(rest, "add", "a template id")?),
            "new" => Command::New(required(rest, "new", "a title")?),
            "delete" | "rm" => Command::Delete(required(rest, "delete", "a section id")?),
            "move" | "mv" => parse_move(rest)?,
            "rename" => {
                let (id, title) = rest.split_once(char::is_whitespace).ok_or(
                    ShellError::MissingArgument {
                        command: "rename",
                        argument: "a section id and a title",
                    },
                )?;
                Command::Rename {
                    id: id.to_string(),
                    title: title.trim().to_string(),
                }
            }
            "reset" => Command::Reset(required(rest, "reset", "a section id")?),
            "reset-all" => Command::ResetAll,
            "clean" => Command::Clean,
            "available" => Command::Available(optional()),
            "preview" => Command::Preview,
            "save" => Command::Save(optional().map(PathBuf::from)),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn required(rest: &str, command: &'static str, argument: &'static str) -> Result<String, ShellError> {
    if rest.is_empty() {
        Err(ShellError::MissingArgument { command, argument })
    } else {
        Ok(rest.to_string())
    }
}

fn parse_move(rest: &str) -> Result<Command, ShellError> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let [id, relation, anchor] = parts.as_slice() else {
        return Err(ShellError::MissingArgument {
            command: "move",
            argument: "<id> before|after <id>",
        });
    };

    let placement = match *relation {
        "before" => Placement::Before(anchor.to_string()),
        "after" => Placement::After(anchor.to_string()),
        other => return Err(ShellError::BadPlacement(other.to_string())),
    };

    Ok(Command::Move {
        id: id.to_string(),
        placement,
    })
}

/// Run the shell until `quit` or end of input
///
/// Command errors are printed and the loop continues; only I/O failures on
/// `input`/`out` end the session early.
///
/// # Parameters
/// * `session` - Session to drive
/// * `output_path` - Default destination for `save`
/// * `input` - Command source
/// * `out` - Where listings and messages go
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    output_path: &Path,
    input: R,
    mut out: W,
) -> Result<(), ShellError> {
    let mut lines = input.lines();
    writeln!(out, "Type 'help' for a list of commands.")?;

    while let Some(line) = lines.next() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        let content = if let Command::Edit(_) = command {
            let mut buffer: Vec<String> = Vec::new();
            for line in lines.by_ref() {
                let line = line?;
                if line.trim_end() == "." {
                    break;
                }
                buffer.push(line);
            }
            Some(buffer.join("\n"))
        } else {
            None
        };

        match execute(session, command, content, output_path, &mut out) {
            Ok(()) => {}
            Err(ShellError::Io(e)) => return Err(ShellError::Io(e)),
            Err(e) => writeln!(out, "error: {}", e)?,
        }
    }

    Ok(())
}

fn execute<W: Write>(
    session: &mut Session,
    command: Command,
    content: Option<String>,
    output_path: &Path,
    out: &mut W,
) -> Result<(), ShellError> {
    let operation = match command {
        Command::List => return print_list(session, out),
        Command::Show(id) => {
            let collection = session.collection();
            let section = match id {
                Some(id) => collection.get(&id),
                None => collection.active(),
            };
            match section {
                Some(section) => writeln!(out, "{}\n\n{}", section, section.content)?,
                None => writeln!(out, "(no such section)")?,
            }
            return Ok(());
        }
        Command::Edit(id) => {
            let id = id
                .or_else(|| session.collection().active_id().map(str::to_string))
                .ok_or(ShellError::NoSelection)?;
            Operation::SetContent {
                id,
                content: content.unwrap_or_default(),
            }
        }
        Command::Select(id) => Operation::Select { id },
        Command::Add(id) => Operation::AddTemplate { id },
        Command::New(title) => Operation::Add {
            content: format!("## {}", title),
            title,
        },
        Command::Delete(id) => Operation::Delete { id },
        Command::Move { id, placement } => Operation::Move { id, placement },
        Command::Rename { id, title } => Operation::Rename { id, title },
        Command::Reset(id) => Operation::ResetContent { id },
        Command::ResetAll => Operation::ResetAll,
        Command::Clean => Operation::CleanStart,
        Command::Available(term) => {
            session.apply(&Operation::Search {
                term: term.unwrap_or_default(),
            });
            return print_available(session, out);
        }
        Command::Preview => {
            out.write_all(session.compose().as_bytes())?;
            out.flush()?;
            return Ok(());
        }
        Command::Save(path) => {
            let path = path.unwrap_or_else(|| output_path.to_path_buf());
            export::write_document(&session.compose(), &path)?;
            writeln!(out, "Saved {}", path.display())?;
            return Ok(());
        }
        Command::Help => {
            writeln!(out, "{}", HELP)?;
            return Ok(());
        }
        Command::Quit => return Ok(()),
    };

    if session.apply(&operation) {
        print_list(session, out)
    } else {
        writeln!(out, "(nothing changed)")?;
        Ok(())
    }
}

fn print_list<W: Write>(session: &Session, out: &mut W) -> Result<(), ShellError> {
    let collection = session.collection();
    if collection.is_empty() {
        writeln!(out, "(no sections)")?;
        return Ok(());
    }

    for (index, section) in collection.sections().iter().enumerate() {
        let marker = if collection.active_id() == Some(section.id.as_str()) {
            ">"
        } else {
            " "
        };
        writeln!(out, "{} {:>2}. {}", marker, index + 1, section)?;
    }
    Ok(())
}

fn print_available<W: Write>(session: &Session, out: &mut W) -> Result<(), ShellError> {
    let templates = session.available();
    if templates.is_empty() {
        writeln!(out, "(nothing to add)")?;
    }
    for template in templates {
        writeln!(out, "  {:<20} {}", template.id, template.title)?;
    }
    Ok(())
}
