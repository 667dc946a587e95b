//! CLI layer: argument parsing and command loop

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::Cli;
pub use commands::{execute_command, run};
pub use error::{usage_exit_code, CliError, CliResult};
