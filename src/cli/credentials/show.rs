//! Show command - print the decrypted YAML to stdout.

use crate::cli::output;
use crate::core::store::StoreOptions;
use crate::error::Result;

pub fn execute(options: &StoreOptions) -> Result<()> {
    let store = super::open(options)?;
    output::raw(&super::read_text(&store)?);
    Ok(())
}
