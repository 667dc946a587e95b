//! Domain layer: the directory tree and its structural operations
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod forest;
pub mod path;

pub use arena::{Directory, DirectoryArena};
pub use error::{DomainError, DomainResult};
pub use forest::{Forest, ListEntry, Listing, INDENT_WIDTH};
pub use path::DirPath;
