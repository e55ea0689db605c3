//! Filesystem collaborator for rulesync
//!
//! Provides normalized path handling, atomic writes, and the injected
//! [`FileSystem`] interface the conversion engine reads and writes through.

pub mod error;
pub mod filesystem;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use filesystem::{FileSystem, LocalFs, MemoryFs};
pub use path::NormalizedPath;
