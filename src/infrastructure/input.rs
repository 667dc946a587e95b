//! Command input: a file given on the command line, or stdin

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use tracing::debug;

use super::error::{InfraError, InfraResult};

/// Where command lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    pub fn from_arg(file: Option<PathBuf>) -> Self {
        match file {
            Some(path) => InputSource::File(path),
            None => InputSource::Stdin,
        }
    }

    /// Open the source for line-by-line reading.
    ///
    /// A missing or unreadable file is an error; stdin always opens.
    pub fn open(&self) -> InfraResult<Box<dyn BufRead>> {
        match self {
            InputSource::File(path) => {
                debug!(path = %path.display(), "reading commands from file");
                let file = File::open(path).map_err(|source| InfraError::Input {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            InputSource::Stdin => {
                debug!("reading commands from stdin");
                Ok(Box::new(BufReader::new(io::stdin())))
            }
        }
    }
}
