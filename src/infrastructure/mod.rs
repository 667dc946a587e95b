//! Infrastructure layer: input, transcript output and diagnostics
//!
//! This layer implements the I/O boundary traits.

pub mod error;
pub mod input;
pub mod logging;
pub mod traits;
pub mod transcript;

pub use error::{InfraError, InfraResult};
pub use input::InputSource;
pub use traits::TranscriptSink;
pub use transcript::{ConsoleSink, FileSink, Transcript};
