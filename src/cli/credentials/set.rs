//! Set command - change one value by dot path.
//!
//! The edited document must still parse. Rule violations only warn, so a
//! configuration can be filled in one field at a time.

use tracing::info;

use crate::cli::output;
use crate::core::config::{document, Configuration};
use crate::core::store::StoreOptions;
use crate::error::Result;

pub fn execute(options: &StoreOptions, path: &str, value: &str) -> Result<()> {
    let store = super::open(options)?;
    let current = store.read()?;

    let updated = document::set_value(&current, path, value)?;
    let config = Configuration::parse(&updated)?;
    store.write(&updated)?;
    info!(path, "credential value set");

    output::success(&format!("set {}", output::key(path)));
    if let Some(problem) = config.validate() {
        output::warn(&format!("configuration not yet valid: {}", problem));
    }
    Ok(())
}
