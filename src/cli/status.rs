//! Status command - where the credentials and key are.

use crate::cli::output;
use crate::core::constants;
use crate::core::env::SystemEnv;
use crate::core::store::{CredentialStore, StoreOptions};
use crate::error::Result;

/// Show credentials path and key source without decrypting anything.
pub fn execute(options: &StoreOptions) -> Result<()> {
    let store = CredentialStore::locate(options, &SystemEnv)?;

    output::kv("credentials", output::path(store.path()));
    output::kv("exists", if store.exists() { "yes" } else { "no" });

    match (store.key_source(), store.master_key()) {
        (Some(source), Some(key)) => {
            output::kv("key", source);
            output::kv("fingerprint", key.fingerprint());
        }
        _ => {
            output::kv("key", "not found");
            output::hint(&format!(
                "run {} or set {}",
                output::cmd("nvoi init"),
                constants::MASTER_KEY_ENV
            ));
        }
    }

    Ok(())
}
