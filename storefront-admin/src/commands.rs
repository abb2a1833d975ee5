//! Line commands of the interactive prompt.

use std::str::FromStr;

/// A parsed prompt command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Page(usize),
    Sort(String),
    /// Search text; empty clears the filter.
    Search(String),
    Rows(usize),
    Select(String),
    Selected,
    Edit(String),
    Delete(String),
    Add,
    Refresh,
    Help,
    Quit,
}

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}', type 'help' for the list")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{command}' expects a number, got '{value}'")]
    InvalidNumber { command: &'static str, value: String },
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
Commands:
  next | n              next page
  prev | p              previous page
  page <n>              go to page n
  sort <field>          sort by field, again to reverse
  search [text]         filter rows, no text clears
  rows <n>              rows per page
  select <id>           toggle selection of a row
  selected              list selected rows
  edit <id>             edit a row
  delete <id>           delete a row
  add                   add a row
  refresh | r           reload from the server
  help | ?              this help
  quit | q              exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name.to_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "page" => Command::Page(number("page", rest)?),
            "sort" => Command::Sort(argument("sort", "a field", rest)?),
            "search" | "/" => Command::Search(rest.to_string()),
            "rows" => Command::Rows(number("rows", rest)?),
            "select" => Command::Select(argument("select", "a row id", rest)?),
            "selected" => Command::Selected,
            "edit" => Command::Edit(argument("edit", "a row id", rest)?),
            "delete" => Command::Delete(argument("delete", "a row id", rest)?),
            "add" => Command::Add,
            "refresh" | "r" => Command::Refresh,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn argument(command: &'static str, what: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: what,
        });
    }
    Ok(rest.to_string())
}

fn number(command: &'static str, rest: &str) -> Result<usize, CommandError> {
    let value = argument(command, "a number", rest)?;
    value
        .parse()
        .map_err(|_| CommandError::InvalidNumber { command, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("next".parse::<Command>(), Ok(Command::Next));
        assert_eq!("  P ".parse::<Command>(), Ok(Command::Prev));
        assert_eq!("selected".parse::<Command>(), Ok(Command::Selected));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!("page 3".parse::<Command>(), Ok(Command::Page(3)));
        assert_eq!("sort brand.name".parse::<Command>(), Ok(Command::Sort("brand.name".into())));
        assert_eq!("search  red shoes ".parse::<Command>(), Ok(Command::Search("red shoes".into())));
        assert_eq!("search".parse::<Command>(), Ok(Command::Search(String::new())));
        assert_eq!("delete sku-12".parse::<Command>(), Ok(Command::Delete("sku-12".into())));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "launch".parse::<Command>(),
            Err(CommandError::Unknown("launch".into()))
        );
        assert_eq!(
            "rows ten".parse::<Command>(),
            Err(CommandError::InvalidNumber {
                command: "rows",
                value: "ten".into()
            })
        );
        let err = "edit".parse::<Command>().unwrap_err();
        assert_eq!(err.to_string(), "'edit' needs a row id");
    }
}
