//! Parsing of one input line into a command

use std::fmt;
use std::str::FromStr;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DirPath, DomainError};

/// A single line of input, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create every directory along the path
    Create(DirPath),
    /// Print the whole tree, sorted and indented
    List,
    /// Move the first path under the second
    Move {
        source: DirPath,
        destination: DirPath,
    },
    /// Delete the directory and its subtree
    Delete(DirPath),
}

impl Command {
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Create(_) => "CREATE",
            Command::List => "LIST",
            Command::Move { .. } => "MOVE",
            Command::Delete(_) => "DELETE",
        }
    }

    /// Parse `KEYWORD [ARGS]...`. Keywords are case-insensitive, arity is strict.
    pub fn parse(line: &str) -> ApplicationResult<Self> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens
            .next()
            .ok_or_else(|| DomainError::invalid_argument("no command provided"))?;
        let args: Vec<&str> = tokens.collect();

        match keyword.to_uppercase().as_str() {
            "CREATE" => {
                expect_arity("CREATE", 1, "path", &args)?;
                Ok(Command::Create(DirPath::parse(args[0])?))
            }
            "LIST" => {
                expect_arity("LIST", 0, "no arguments", &args)?;
                Ok(Command::List)
            }
            "MOVE" => {
                expect_arity("MOVE", 2, "source path and destination path", &args)?;
                Ok(Command::Move {
                    source: DirPath::parse(args[0])?,
                    destination: DirPath::parse(args[1])?,
                })
            }
            "DELETE" => {
                expect_arity("DELETE", 1, "path", &args)?;
                Ok(Command::Delete(DirPath::parse(args[0])?))
            }
            _ => Err(ApplicationError::InvalidCommand(keyword.to_string())),
        }
    }
}

fn expect_arity(
    command: &'static str,
    expected: usize,
    usage: &'static str,
    args: &[&str],
) -> ApplicationResult<()> {
    if args.len() != expected {
        return Err(ApplicationError::InvalidArity {
            command,
            expected,
            usage,
            got: args.len(),
        });
    }
    Ok(())
}

impl FromStr for Command {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Create(path) | Command::Delete(path) => {
                write!(f, "{} {}", self.keyword(), path)
            }
            Command::List => write!(f, "{}", self.keyword()),
            Command::Move {
                source,
                destination,
            } => write!(f, "{} {} {}", self.keyword(), source, destination),
        }
    }
}
