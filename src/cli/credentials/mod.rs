//! Credentials commands.
//!
//! Each subcommand opens the store, which requires a master key.

mod edit;
mod set;
mod show;

use crate::core::env::SystemEnv;
use crate::core::store::{CredentialStore, StoreOptions};
use crate::error::{ConfigError, Result};

pub use edit::execute as edit;
pub use set::execute as set;
pub use show::execute as show;

fn open(options: &StoreOptions) -> Result<CredentialStore> {
    CredentialStore::open(options, &SystemEnv)
}

/// Decrypt and decode as UTF-8 text.
fn read_text(store: &CredentialStore) -> Result<String> {
    let bytes = store.read()?;
    String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8.into())
}
