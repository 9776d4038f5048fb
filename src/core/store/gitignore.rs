//! `.gitignore` maintenance for the key file.

use std::path::Path;

use tracing::debug;

use crate::core::constants;
use crate::core::fs::FileSystem;
use crate::error::Result;

/// Ensure `.gitignore` in `dir` lists the key file.
///
/// Creates the file when missing. Otherwise appends a comment line and the
/// key file name, adding a newline first only when the existing content does
/// not already end with one. Returns `true` when the file changed.
///
/// # Errors
///
/// Returns error if reading or writing `.gitignore` fails.
pub fn update_gitignore(fs: &dyn FileSystem, dir: &Path) -> Result<bool> {
    let path = dir.join(".gitignore");

    let existing = if fs.exists(&path) {
        String::from_utf8_lossy(&fs.read(&path)?).into_owned()
    } else {
        String::new()
    };

    let listed = existing.lines().map(str::trim).any(|line| {
        line == constants::KEY_FILE || line.strip_prefix('/') == Some(constants::KEY_FILE)
    });
    if listed {
        debug!(path = %path.display(), "key file already ignored");
        return Ok(false);
    }

    let mut updated = existing;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(constants::GITIGNORE_COMMENT);
    updated.push('\n');
    updated.push_str(constants::KEY_FILE);
    updated.push('\n');

    fs.write(&path, updated.as_bytes(), None)?;
    debug!(path = %path.display(), "added key file to .gitignore");
    Ok(true)
}
