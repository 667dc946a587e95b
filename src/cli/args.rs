//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// In-memory directory tree driven by CREATE, LIST, MOVE and DELETE commands.
///
/// Commands are read one per line from FILE, or from stdin when no file is given.
#[derive(Parser, Debug)]
#[command(name = "vdirs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short = 'f', long = "file", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Diagnostics on stderr, repeat for more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Directory for per-run log files
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub log_dir: Option<PathBuf>,

    /// Do not write a log file
    #[arg(long)]
    pub no_log_file: bool,

    /// Print the merged settings as TOML and exit
    #[arg(long)]
    pub show_config: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completion: Option<clap_complete::Shell>,
}
