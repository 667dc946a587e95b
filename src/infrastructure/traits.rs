//! I/O boundary traits for testability
//!
//! The transcript fans each line out to sinks; tests swap in an in-memory one.

use std::io;

use crate::application::TranscriptLine;

/// Destination for transcript lines.
pub trait TranscriptSink {
    /// Write one line, newline-terminated.
    fn write_line(&mut self, line: &TranscriptLine) -> io::Result<()>;

    /// Flush buffered output.
    fn flush(&mut self) -> io::Result<()>;
}
