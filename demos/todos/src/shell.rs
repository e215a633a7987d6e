//! Line commands understood by the `todos` binary.

use crate::error::TodoError;
use crate::types::{Filter, TodoId};
use crate::view::UiEvent;

/// Usage text printed by `help`
pub const HELP: &str = "\
Commands:
  add <name>        create a todo
  toggle <id>       flip a todo between completed and incomplete
  filter <which>    show all, completed or incompleted todos
  hide <id>         dismiss a notification
  list              render the current view
  help              show this text
  quit              exit";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Something to dispatch to the store
    Event(UiEvent),
    /// Print the view without changing anything
    List,
    /// Print [`HELP`]
    Help,
    /// Leave the shell
    Quit,
}

/// Parses one line of input; blank lines yield `None`
///
/// # Errors
///
/// Returns [`TodoError::InvalidInput`] for unknown commands or a missing
/// argument, and [`TodoError::InvalidFilter`] for an unknown filter name.
pub fn parse_command(line: &str) -> Result<Option<Command>, TodoError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "add" => Command::Event(UiEvent::Submit {
            name: required(word, rest)?.to_string(),
        }),
        "toggle" => Command::Event(UiEvent::Toggle {
            id: TodoId::new(required(word, rest)?),
        }),
        "filter" => Command::Event(UiEvent::SelectFilter {
            filter: required(word, rest)?.parse::<Filter>()?,
        }),
        "hide" => Command::Event(UiEvent::Dismiss {
            id: TodoId::new(required(word, rest)?),
        }),
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(TodoError::InvalidInput(format!(
                "Unknown command '{other}' (try 'help')"
            )));
        },
    };

    Ok(Some(command))
}

fn required<'a>(command: &str, argument: &'a str) -> Result<&'a str, TodoError> {
    if argument.is_empty() {
        Err(TodoError::InvalidInput(format!("'{command}' needs an argument")))
    } else {
        Ok(argument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_the_whole_name() {
        assert_eq!(
            parse_command("add  Buy oat milk ").unwrap(),
            Some(Command::Event(UiEvent::Submit {
                name: "Buy oat milk".to_string()
            }))
        );
    }

    #[test]
    fn filter_accepts_short_names() {
        assert_eq!(
            parse_command("filter completed").unwrap(),
            Some(Command::Event(UiEvent::SelectFilter {
                filter: Filter::ShowCompleted
            }))
        );
        assert!(matches!(
            parse_command("filter someday"),
            Err(TodoError::InvalidFilter(_))
        ));
    }

    #[test]
    fn bare_words_and_blank_lines() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("LIST").unwrap(), Some(Command::List));
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("help").unwrap(), Some(Command::Help));
    }

    #[test]
    fn missing_argument_and_unknown_command_are_errors() {
        assert!(matches!(parse_command("toggle"), Err(TodoError::InvalidInput(_))));
        assert!(matches!(parse_command("delete 3"), Err(TodoError::InvalidInput(_))));
    }
}
