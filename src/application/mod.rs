//! Application layer: command parsing and dispatch
//!
//! Turns input lines into forest operations and their outcomes into
//! transcript lines. No I/O happens here.

pub mod command;
pub mod error;
pub mod session;

pub use command::Command;
pub use error::{ApplicationError, ApplicationResult};
pub use session::{Session, TranscriptLine};
