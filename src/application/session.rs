//! Command dispatch against the process-wide forest

use std::fmt;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, Command};
use crate::domain::Forest;

/// One user-facing output line of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    /// The input line as read
    Echo(String),
    /// One directory of a LIST
    Entry(String),
    /// Expected condition, command skipped
    Warning(String),
    /// Command rejected
    Error(String),
}

impl TranscriptLine {
    pub fn message(&self) -> &str {
        match self {
            TranscriptLine::Echo(s)
            | TranscriptLine::Entry(s)
            | TranscriptLine::Warning(s)
            | TranscriptLine::Error(s) => s,
        }
    }
}

impl fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptLine::Echo(s) | TranscriptLine::Entry(s) => write!(f, "{}", s),
            TranscriptLine::Warning(s) => write!(f, "Warning: {}", s),
            TranscriptLine::Error(s) => write!(f, "Error: {}", s),
        }
    }
}

/// Owns the forest for the lifetime of a run and applies one line at a time.
///
/// Every failure of a single line is turned into a transcript line here;
/// nothing a command does can end the run.
#[derive(Debug, Default)]
pub struct Session {
    forest: Forest,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forest(forest: Forest) -> Self {
        Self { forest }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Process one raw input line: echo it, run it, report the outcome.
    #[instrument(level = "debug", skip(self))]
    pub fn execute(&mut self, input: &str) -> Vec<TranscriptLine> {
        let input = input.trim();
        let mut lines = vec![TranscriptLine::Echo(input.to_string())];

        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(e) => {
                lines.push(TranscriptLine::Error(e.to_string()));
                return lines;
            }
        };

        debug!(%command, "dispatching");
        match self.dispatch(&command) {
            Ok(mut output) => lines.append(&mut output),
            Err(e) => {
                let message = format!("Cannot {} - {}", describe(&command), e);
                if e.is_warning() {
                    lines.push(TranscriptLine::Warning(message));
                } else {
                    lines.push(TranscriptLine::Error(message));
                }
            }
        }
        lines
    }

    fn dispatch(&mut self, command: &Command) -> ApplicationResult<Vec<TranscriptLine>> {
        match command {
            Command::Create(path) => {
                self.forest.create_path(path.segments())?;
                Ok(Vec::new())
            }
            Command::List => Ok(self
                .forest
                .list_all()
                .map(|entry| TranscriptLine::Entry(entry.to_string()))
                .collect()),
            Command::Move {
                source,
                destination,
            } => {
                self.forest
                    .move_path(source.segments(), destination.segments())?;
                Ok(Vec::new())
            }
            Command::Delete(path) => {
                self.forest.delete_path(path.segments())?;
                Ok(Vec::new())
            }
        }
    }
}

fn describe(command: &Command) -> String {
    match command {
        Command::Create(path) => format!("create {}", path),
        Command::List => "list".to_string(),
        Command::Move {
            source,
            destination,
        } => format!("move {} to {}", source, destination),
        Command::Delete(path) => format!("delete {}", path),
    }
}
