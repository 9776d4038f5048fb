//! Init command - generate a master key and an encrypted template.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::config;
use crate::core::constants;
use crate::core::domain::KeySource;
use crate::core::env::SystemEnv;
use crate::core::store::{CredentialStore, StoreOptions};
use crate::error::Result;

/// Initialize credentials in the working directory.
pub fn execute(options: &StoreOptions, name: Option<String>) -> Result<()> {
    let mut store = CredentialStore::locate(options, &SystemEnv)?;
    let inherited = store.key_source().cloned();

    let name = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| default_name(&options.working_dir));
    info!(app = %name, "initializing credentials");

    let key = store.initialize(config::template(&name).as_bytes())?;
    let gitignore_changed = store.update_gitignore()?;

    output::success(&format!("initialized {}", output::path(store.path())));
    output::kv("key", output::path(&store.key_path()));
    output::kv("fingerprint", key.fingerprint());
    if gitignore_changed {
        output::kv(".gitignore", format!("added {}", constants::KEY_FILE));
    }

    // a key from the flag or env would shadow the new key file on every read
    match inherited {
        Some(KeySource::Env) => output::warn(&format!(
            "{} is set and takes precedence over the new key file",
            constants::MASTER_KEY_ENV
        )),
        Some(KeySource::Flag(path)) => output::warn(&format!(
            "--master-key {} takes precedence over the new key file",
            path.display()
        )),
        _ => {}
    }

    println!();
    output::hint(&format!(
        "fill in provider credentials: {}",
        output::cmd("nvoi credentials edit")
    ));
    Ok(())
}

/// Directory name of `dir`, or `app` when it has none.
fn default_name(dir: &Path) -> String {
    std::fs::canonicalize(dir)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "app".to_string())
}
