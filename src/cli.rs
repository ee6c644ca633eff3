use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error as ThisError;

use crate::form::FormField;

/// One line typed into the terminal host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Count,
    Search(String),
    List,
    Add(Vec<FormField>),
    Update { id: String, fields: Vec<FormField> },
    Delete(String),
    Clear,
    Download(PathBuf),
    Help,
    Quit,
}

#[derive(Debug, ThisError)]
pub enum CommandError {
    /// Also carries `--help` output for a single command.
    #[error("{0}")]
    Clap(#[from] clap::Error),

    #[error("expected key=value, got {0:?}")]
    BadField(String),
}

#[derive(Debug, Parser)]
#[command(multicall = true, disable_help_subcommand = true)]
struct Line {
    #[command(subcommand)]
    command: LineCommand,
}

/// Commands of the terminal host.
#[derive(Debug, Subcommand)]
enum LineCommand {
    /// Refresh the entity count.
    Count,
    /// Search entities.
    Search {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        term: Vec<String>,
    },
    /// List every entity.
    List,
    /// Add an entity: `add name=Acme Corp email=hi@acme.test`.
    Add {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        fields: Vec<String>,
    },
    /// Update an entity: `update <id> phone=555-0100`.
    Update {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        fields: Vec<String>,
    },
    /// Delete an entity (asks first).
    Delete { id: String },
    /// Clear search results.
    Clear,
    /// Save the spreadsheet export.
    Download {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Show this help.
    #[command(alias = "?")]
    Help,
    /// Leave.
    #[command(alias = "exit")]
    Quit,
}

/// Rendered command overview.
pub fn help() -> String {
    Line::command().render_help().to_string()
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let parsed = Line::try_parse_from(line.split_whitespace())?;

    let command = match parsed.command {
        LineCommand::Count => Command::Count,
        LineCommand::Search { term } => Command::Search(term.join(" ")),
        LineCommand::List => Command::List,
        LineCommand::Add { fields } => Command::Add(parse_fields(&fields)?),
        LineCommand::Update { id, fields } => Command::Update {
            id,
            fields: parse_fields(&fields)?,
        },
        LineCommand::Delete { id } => Command::Delete(id),
        LineCommand::Clear => Command::Clear,
        LineCommand::Download { dir } => Command::Download(dir),
        LineCommand::Help => Command::Help,
        LineCommand::Quit => Command::Quit,
    };
    Ok(Some(command))
}

/// `name=Acme Corp email=a@b.c` → two fields; a token without `=` continues
/// the previous value.
fn parse_fields(tokens: &[String]) -> Result<Vec<FormField>, CommandError> {
    let mut fields: Vec<FormField> = Vec::new();
    for token in tokens {
        match token.split_once('=') {
            Some((name, value)) if !name.is_empty() => fields.push(FormField::new(name, value)),
            _ => match fields.last_mut() {
                Some(last) => {
                    last.value.push(' ');
                    last.value.push_str(token);
                }
                None => return Err(CommandError::BadField(token.clone())),
            },
        }
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parsed(line: &str) -> Command {
        parse_command(line).unwrap().expect("a command")
    }

    #[test]
    fn parses_simple_verbs() {
        assert!(parse_command("  ").unwrap().is_none());
        assert_eq!(parsed("count"), Command::Count);
        assert_eq!(parsed("list"), Command::List);
        assert_eq!(parsed("exit"), Command::Quit);
        assert_eq!(parsed("?"), Command::Help);
        assert_eq!(parsed("download"), Command::Download(PathBuf::from(".")));
        assert_eq!(
            parsed("download /tmp/out"),
            Command::Download(PathBuf::from("/tmp/out"))
        );
    }

    #[test]
    fn search_joins_words() {
        assert_eq!(
            parsed("search  acme corp "),
            Command::Search("acme corp".to_string())
        );
        assert_eq!(parsed("search"), Command::Search(String::new()));
    }

    #[test]
    fn add_fields_may_contain_spaces() {
        assert_eq!(
            parsed("add name=Acme Corp email=hi@acme.test cost_estimate=10"),
            Command::Add(vec![
                FormField::new("name", "Acme Corp"),
                FormField::new("email", "hi@acme.test"),
                FormField::new("cost_estimate", "10"),
            ])
        );
        assert!(matches!(
            parse_command("add Acme"),
            Err(CommandError::BadField(token)) if token == "Acme"
        ));
    }

    #[test]
    fn update_and_delete_need_an_id() {
        assert_eq!(
            parsed("update 42 phone=555"),
            Command::Update {
                id: "42".to_string(),
                fields: vec![FormField::new("phone", "555")],
            }
        );
        assert_eq!(parsed("delete 42"), Command::Delete("42".to_string()));

        for line in ["delete", "update"] {
            match parse_command(line) {
                Err(CommandError::Clap(err)) => {
                    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
                }
                other => panic!("unexpected parse of {line:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_verb_is_rejected() {
        assert!(matches!(
            parse_command("frobnicate now"),
            Err(CommandError::Clap(_))
        ));
    }

    #[test]
    fn help_lists_commands() {
        let text = help();
        for verb in ["count", "search", "add", "update", "delete", "download"] {
            assert!(text.contains(verb), "{verb} missing from help");
        }
    }
}
