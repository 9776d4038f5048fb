//! Filesystem abstraction.
//!
//! The credential store and key resolver only touch disk through
//! [`FileSystem`], so tests can substitute failing or in-memory backends.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `FileSystem` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use std::io;
use std::path::Path;

mod local;

pub use local::Local;

/// Minimal file operations needed by the core.
///
/// Every call opens, operates and closes; nothing is held across calls.
pub trait FileSystem {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate `path` and write `contents`.
    ///
    /// With `mode`, the file ends up with exactly those permission bits
    /// (Unix only), including when it already existed.
    fn write(&self, path: &Path, contents: &[u8], mode: Option<u32>) -> io::Result<()>;

    /// Atomically replace `to` with `from`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Delete a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create a directory and its parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Permission bits of `path`, where the platform has them.
    fn mode(&self, path: &Path) -> Option<u32>;
}

/// Default backend for the local disk.
pub fn default_backend() -> Box<dyn FileSystem> {
    Box::new(Local)
}
