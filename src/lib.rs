//! vdirs: an in-memory directory tree driven by line commands
//!
//! Layers, innermost first:
//! - [`domain`]: the forest of directories and its structural operations
//! - [`application`]: command parsing and dispatch into transcript lines
//! - [`infrastructure`]: input sources, transcript sinks, diagnostics
//! - [`cli`]: argument parsing and the command loop

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
